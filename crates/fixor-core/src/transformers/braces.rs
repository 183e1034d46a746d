use super::{next_meaningful_kind, prev_meaningful_kind, Transformer};
use crate::block::BlockType;
use crate::error::Result;
use crate::kind::TokenKind;
use crate::tokens::Tokens;

const CURLY_OPENERS: &[TokenKind] = &[
    TokenKind::OpenCurly,
    TokenKind::CurlyOpen,
    TokenKind::DollarOpenCurlyBraces,
    TokenKind::DynamicPropBraceOpen,
    TokenKind::DynamicVarBraceOpen,
    TokenKind::ArrayIndexCurlyBraceOpen,
    TokenKind::GroupImportBraceOpen,
];

const CURLY_CLOSERS: &[TokenKind] = &[
    TokenKind::CloseCurly,
    TokenKind::CurlyClose,
    TokenKind::DollarCloseCurlyBraces,
    TokenKind::DynamicPropBraceClose,
    TokenKind::DynamicVarBraceClose,
    TokenKind::ArrayIndexCurlyBraceClose,
    TokenKind::GroupImportBraceClose,
];

/// Any curly closer balances any curly opener: interpolation ends are
/// plain `}` until this pass has run.
fn find_curly_close(tokens: &Tokens, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for i in open..tokens.len() {
        let token = &tokens[i];
        if token.is_any_kind(CURLY_OPENERS) {
            depth += 1;
        } else if token.is_any_kind(CURLY_CLOSERS) {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Classifies curly braces by what precedes them.
pub struct CurlyBraceTransformer;

impl CurlyBraceTransformer {
    fn block_type_for(tokens: &Tokens, index: usize) -> Option<BlockType> {
        let prev_index = tokens.get_prev_meaningful_token(index)?;
        let prev = &tokens[prev_index];
        match prev.kind() {
            TokenKind::ObjectOperator | TokenKind::NullsafeObjectOperator => {
                Some(BlockType::DynamicPropBrace)
            }
            TokenKind::Dollar if prev_index + 1 == index => Some(BlockType::DynamicVarBrace),
            TokenKind::NsSeparator => Some(BlockType::GroupImportBrace),
            TokenKind::Variable
            | TokenKind::CloseBracket
            | TokenKind::ArrayIndexCurlyBraceClose => Some(BlockType::ArrayIndexCurlyBrace),
            TokenKind::Identifier => {
                let before = prev_meaningful_kind(tokens, prev_index);
                matches!(
                    before,
                    Some(TokenKind::ObjectOperator | TokenKind::NullsafeObjectOperator)
                )
                .then_some(BlockType::ArrayIndexCurlyBrace)
            }
            _ => None,
        }
    }
}

impl Transformer for CurlyBraceTransformer {
    fn name(&self) -> &'static str {
        "curly_brace"
    }

    fn custom_kinds(&self) -> &'static [TokenKind] {
        &[
            TokenKind::CurlyClose,
            TokenKind::DollarCloseCurlyBraces,
            TokenKind::DynamicPropBraceOpen,
            TokenKind::DynamicPropBraceClose,
            TokenKind::DynamicVarBraceOpen,
            TokenKind::DynamicVarBraceClose,
            TokenKind::ArrayIndexCurlyBraceOpen,
            TokenKind::ArrayIndexCurlyBraceClose,
            TokenKind::GroupImportBraceOpen,
            TokenKind::GroupImportBraceClose,
        ]
    }

    fn process(&self, tokens: &mut Tokens, index: usize) -> Result<()> {
        let (open_kind, close_kind) = match tokens.at(index)?.kind() {
            TokenKind::CurlyOpen => (TokenKind::CurlyOpen, TokenKind::CurlyClose),
            TokenKind::DollarOpenCurlyBraces => {
                (TokenKind::DollarOpenCurlyBraces, TokenKind::DollarCloseCurlyBraces)
            }
            TokenKind::OpenCurly => match Self::block_type_for(tokens, index) {
                Some(block_type) => (block_type.open_kind(), block_type.close_kind()),
                None => return Ok(()),
            },
            _ => return Ok(()),
        };

        let Some(close) = find_curly_close(tokens, index) else {
            return Ok(());
        };
        tokens.set_kind(index, open_kind)?;
        tokens.set_kind(close, close_kind)
    }
}

/// Marks `(new Foo)` parentheses.
pub struct BraceClassInstantiationTransformer;

impl Transformer for BraceClassInstantiationTransformer {
    fn name(&self) -> &'static str {
        "brace_class_instantiation"
    }

    fn custom_kinds(&self) -> &'static [TokenKind] {
        &[
            TokenKind::BraceClassInstantiationOpen,
            TokenKind::BraceClassInstantiationClose,
        ]
    }

    fn process(&self, tokens: &mut Tokens, index: usize) -> Result<()> {
        use TokenKind::*;

        if !tokens.at(index)?.is_kind(OpenParen) || next_meaningful_kind(tokens, index) != Some(New) {
            return Ok(());
        }
        // A call or a control structure owns these parentheses.
        if matches!(
            prev_meaningful_kind(tokens, index),
            Some(
                CloseParen
                    | CloseBracket
                    | ArrayIndexCurlyBraceClose
                    | ArraySquareBraceClose
                    | BraceClassInstantiationClose
                    | Array
                    | Class
                    | Catch
                    | ElseIf
                    | Empty
                    | Exit
                    | For
                    | Foreach
                    | If
                    | Isset
                    | List
                    | Match
                    | Static
                    | Identifier
                    | Switch
                    | Unset
                    | Variable
                    | While
            )
        ) {
            return Ok(());
        }

        let close = tokens.find_block_end(BlockType::Parenthesis, index)?;
        tokens.retag_block(index, close, BlockType::BraceClassInstantiation)
    }
}

/// Tells short arrays and destructuring apart from index access.
pub struct SquareBraceTransformer;

impl SquareBraceTransformer {
    fn follows_indexable(tokens: &Tokens, index: usize) -> bool {
        use TokenKind::*;
        matches!(
            prev_meaningful_kind(tokens, index),
            Some(
                CloseParen
                    | CloseBracket
                    | CloseCurly
                    | CurlyClose
                    | DollarCloseCurlyBraces
                    | DoubleQuote
                    | ConstantEncapsedString
                    | Identifier
                    | StringVarname
                    | Variable
                    | ArraySquareBraceClose
                    | DynamicPropBraceClose
                    | DynamicVarBraceClose
                    | ArrayIndexCurlyBraceClose
            )
        )
    }

    fn is_destructuring(tokens: &Tokens, index: usize) -> Result<bool> {
        if Self::follows_indexable(tokens, index) {
            return Ok(false);
        }
        let prev = tokens.get_prev_meaningful_token(index);
        match prev.map(|i| tokens[i].kind()) {
            Some(TokenKind::As) => return Ok(true),
            // foreach ($a as $k => [$x, $y])
            Some(TokenKind::DoubleArrow) => {
                let variable = prev.and_then(|i| tokens.get_prev_meaningful_token(i));
                if let Some(variable) = variable.filter(|&i| tokens[i].is_kind(TokenKind::Variable)) {
                    if prev_meaningful_kind(tokens, variable) == Some(TokenKind::As) {
                        return Ok(true);
                    }
                }
            }
            _ => {}
        }
        let end = tokens.find_block_end(BlockType::IndexSquareBrace, index)?;
        Ok(next_meaningful_kind(tokens, end) == Some(TokenKind::Equals))
    }

    fn is_short_array(tokens: &Tokens, index: usize) -> bool {
        !Self::follows_indexable(tokens, index)
    }

    /// Retag `[open, end]` and every nested list element as destructuring.
    fn mark_destructuring(tokens: &mut Tokens, open: usize, end: usize) -> Result<()> {
        tokens.retag_block(open, end, BlockType::DestructuringSquareBrace)?;

        let mut previous = open;
        let mut current = tokens.get_next_meaningful_token(open);
        while let Some(index) = current.filter(|&i| i < end) {
            let nested = tokens[index].is_kind(TokenKind::OpenBracket)
                && tokens[previous].is_any_kind(&[
                    TokenKind::DestructuringSquareBraceOpen,
                    TokenKind::Comma,
                    TokenKind::DoubleArrow,
                ]);
            if nested {
                let nested_end = tokens.find_block_end(BlockType::IndexSquareBrace, index)?;
                tokens.retag_block(index, nested_end, BlockType::DestructuringSquareBrace)?;
            }
            previous = index;
            current = tokens.get_next_meaningful_token(index);
        }
        Ok(())
    }
}

impl Transformer for SquareBraceTransformer {
    fn name(&self) -> &'static str {
        "square_brace"
    }

    fn custom_kinds(&self) -> &'static [TokenKind] {
        &[
            TokenKind::ArraySquareBraceOpen,
            TokenKind::ArraySquareBraceClose,
            TokenKind::DestructuringSquareBraceOpen,
            TokenKind::DestructuringSquareBraceClose,
        ]
    }

    fn process(&self, tokens: &mut Tokens, index: usize) -> Result<()> {
        if !tokens.at(index)?.is_kind(TokenKind::OpenBracket) {
            return Ok(());
        }

        let end = tokens.find_block_end(BlockType::IndexSquareBrace, index)?;
        if next_meaningful_kind(tokens, index) != Some(TokenKind::CloseBracket)
            && Self::is_destructuring(tokens, index)?
        {
            return Self::mark_destructuring(tokens, index, end);
        }
        if Self::is_short_array(tokens, index) {
            tokens.retag_block(index, end, BlockType::ArraySquareBrace)?;
        }
        Ok(())
    }
}
