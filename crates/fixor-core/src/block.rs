//! Block types and the block map

use std::fmt;

use rustc_hash::FxHashMap;

use crate::kind::TokenKind;
use crate::token::Token;

/// A kind of matched opening/closing token pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    /// `(` `)`
    Parenthesis,
    /// `{` `}`
    CurlyBrace,
    /// `$a[0]`
    IndexSquareBrace,
    /// `[1, 2]`
    ArraySquareBrace,
    /// `$a->{$b}`
    DynamicPropBrace,
    /// `${$b}`
    DynamicVarBrace,
    /// `$a{0}`
    ArrayIndexCurlyBrace,
    /// `use A\{B, C}`
    GroupImportBrace,
    /// `[$a, $b] = $c`
    DestructuringSquareBrace,
    /// `(new Foo)`
    BraceClassInstantiation,
    /// `#[Attr]`
    Attribute,
    /// `"{$a}"`
    CurlyInterpolation,
    /// `"${a}"`
    ComplexStringVariable,
}

/// Which side of a block a token sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockEdge {
    Open,
    Close,
}

impl BlockType {
    pub const ALL: [BlockType; 13] = [
        BlockType::Parenthesis,
        BlockType::CurlyBrace,
        BlockType::IndexSquareBrace,
        BlockType::ArraySquareBrace,
        BlockType::DynamicPropBrace,
        BlockType::DynamicVarBrace,
        BlockType::ArrayIndexCurlyBrace,
        BlockType::GroupImportBrace,
        BlockType::DestructuringSquareBrace,
        BlockType::BraceClassInstantiation,
        BlockType::Attribute,
        BlockType::CurlyInterpolation,
        BlockType::ComplexStringVariable,
    ];

    pub fn open_kind(self) -> TokenKind {
        self.kinds().0
    }

    pub fn close_kind(self) -> TokenKind {
        self.kinds().1
    }

    fn kinds(self) -> (TokenKind, TokenKind) {
        use TokenKind::*;
        match self {
            BlockType::Parenthesis => (OpenParen, CloseParen),
            BlockType::CurlyBrace => (OpenCurly, CloseCurly),
            BlockType::IndexSquareBrace => (OpenBracket, CloseBracket),
            BlockType::ArraySquareBrace => (ArraySquareBraceOpen, ArraySquareBraceClose),
            BlockType::DynamicPropBrace => (DynamicPropBraceOpen, DynamicPropBraceClose),
            BlockType::DynamicVarBrace => (DynamicVarBraceOpen, DynamicVarBraceClose),
            BlockType::ArrayIndexCurlyBrace => {
                (ArrayIndexCurlyBraceOpen, ArrayIndexCurlyBraceClose)
            }
            BlockType::GroupImportBrace => (GroupImportBraceOpen, GroupImportBraceClose),
            BlockType::DestructuringSquareBrace => {
                (DestructuringSquareBraceOpen, DestructuringSquareBraceClose)
            }
            BlockType::BraceClassInstantiation => {
                (BraceClassInstantiationOpen, BraceClassInstantiationClose)
            }
            BlockType::Attribute => (TokenKind::Attribute, AttributeClose),
            BlockType::CurlyInterpolation => (CurlyOpen, CurlyClose),
            BlockType::ComplexStringVariable => (DollarOpenCurlyBraces, DollarCloseCurlyBraces),
        }
    }

    /// The block type and edge a token kind stands for, if any.
    pub fn detect(kind: TokenKind) -> Option<(BlockType, BlockEdge)> {
        Self::ALL.iter().find_map(|&block_type| {
            if block_type.open_kind() == kind {
                Some((block_type, BlockEdge::Open))
            } else if block_type.close_kind() == kind {
                Some((block_type, BlockEdge::Close))
            } else {
                None
            }
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Parenthesis => "parenthesis",
            BlockType::CurlyBrace => "curly brace",
            BlockType::IndexSquareBrace => "index square brace",
            BlockType::ArraySquareBrace => "array square brace",
            BlockType::DynamicPropBrace => "dynamic property brace",
            BlockType::DynamicVarBrace => "dynamic variable brace",
            BlockType::ArrayIndexCurlyBrace => "array index curly brace",
            BlockType::GroupImportBrace => "group import brace",
            BlockType::DestructuringSquareBrace => "destructuring square brace",
            BlockType::BraceClassInstantiation => "brace class instantiation",
            BlockType::Attribute => "attribute",
            BlockType::CurlyInterpolation => "curly interpolation",
            BlockType::ComplexStringVariable => "complex string variable",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for BlockEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockEdge::Open => f.write_str("opening"),
            BlockEdge::Close => f.write_str("closing"),
        }
    }
}

/// Pairs of matched block boundaries
///
/// Both directions live in one map: an index is either an opening or a
/// closing boundary, never both. Boundaries without a partner are absent.
#[derive(Debug, Clone, Default)]
pub(crate) struct BlockMap {
    pairs: FxHashMap<usize, usize>,
}

impl BlockMap {
    /// Single pass with one stack shared by every block type.
    ///
    /// A closing token pops openers until it meets one of its own type. The
    /// skipped openers stay unmatched; a closer with no opener of its type on
    /// the stack stays unmatched as well.
    pub(crate) fn compute(tokens: &[Token]) -> Self {
        let mut pairs = FxHashMap::default();
        let mut stack: Vec<(BlockType, usize)> = Vec::new();

        for (index, token) in tokens.iter().enumerate() {
            let Some((block_type, edge)) = BlockType::detect(token.kind()) else {
                continue;
            };
            match edge {
                BlockEdge::Open => stack.push((block_type, index)),
                BlockEdge::Close => {
                    let Some(position) = stack.iter().rposition(|(t, _)| *t == block_type) else {
                        continue;
                    };
                    let (_, open) = stack[position];
                    stack.truncate(position);
                    pairs.insert(open, index);
                    pairs.insert(index, open);
                }
            }
        }

        Self { pairs }
    }

    pub(crate) fn partner(&self, index: usize) -> Option<usize> {
        self.pairs.get(&index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(kind: TokenKind) -> Token {
        Token::of(kind)
    }

    #[test]
    fn test_detect() {
        assert_eq!(
            BlockType::detect(TokenKind::CloseParen),
            Some((BlockType::Parenthesis, BlockEdge::Close))
        );
        assert_eq!(
            BlockType::detect(TokenKind::Attribute),
            Some((BlockType::Attribute, BlockEdge::Open))
        );
        assert_eq!(BlockType::detect(TokenKind::Semicolon), None);
    }

    #[test]
    fn test_nested_pairs() {
        use TokenKind::*;
        let tokens = vec![
            tok(OpenCurly),
            tok(OpenParen),
            tok(OpenParen),
            tok(CloseParen),
            tok(CloseParen),
            tok(CloseCurly),
        ];
        let map = BlockMap::compute(&tokens);
        assert_eq!(map.partner(0), Some(5));
        assert_eq!(map.partner(1), Some(4));
        assert_eq!(map.partner(2), Some(3));
        assert_eq!(map.partner(3), Some(2));
    }

    #[test]
    fn test_partial_overlap_leaves_inner_opener_unmatched() {
        use TokenKind::*;
        let tokens = vec![tok(OpenParen), tok(OpenBracket), tok(CloseParen), tok(CloseBracket)];
        let map = BlockMap::compute(&tokens);
        assert_eq!(map.partner(0), Some(2));
        assert_eq!(map.partner(1), None);
        assert_eq!(map.partner(3), None);
    }
}
