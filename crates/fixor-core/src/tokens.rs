//! The token stream
//!
//! [`Tokens`] owns the tokens of one source file. Structural data derived
//! from the tokens (the block map, the code hash) is cached and dropped
//! whenever a mutation could make it stale.

use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::ops::Index;

use rustc_hash::FxHashMap;
use xxhash_rust::xxh3::xxh3_64;

use crate::block::{BlockEdge, BlockMap, BlockType};
use crate::error::{Result, TokenError};
use crate::kind::TokenKind;
use crate::lexer;
use crate::token::Token;
use crate::transformers;

/// Scan direction for sibling lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// Mutable, indexable token sequence for one file
#[derive(Debug, Clone)]
pub struct Tokens {
    tokens: Vec<Token>,
    kind_counts: FxHashMap<TokenKind, usize>,
    blocks: OnceCell<BlockMap>,
    hash: OnceCell<u64>,
    changed: bool,
}

impl Tokens {
    /// Lex `code` and run every transformer over the result.
    ///
    /// The returned stream reports itself unchanged.
    pub fn from_code(code: &str) -> Self {
        let mut tokens = Self::from_tokens(lexer::tokenize(code));
        transformers::transform(&mut tokens);
        tokens.mark_unchanged();
        tokens
    }

    /// Wrap raw tokens without running transformers.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        let mut kind_counts = FxHashMap::default();
        for token in tokens.iter().filter(|t| !t.is_empty()) {
            *kind_counts.entry(token.kind()).or_insert(0) += 1;
        }
        Self {
            tokens,
            kind_counts,
            blocks: OnceCell::new(),
            hash: OnceCell::new(),
            changed: false,
        }
    }

    pub fn count(&self) -> usize {
        self.tokens.len()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn at(&self, index: usize) -> Result<&Token> {
        self.tokens.get(index).ok_or(TokenError::IndexOutOfRange {
            index,
            len: self.tokens.len(),
        })
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    /// Concatenation of all token texts
    pub fn generate_code(&self) -> String {
        self.tokens.iter().map(Token::text).collect()
    }

    /// Code of the tokens in `start..=end`
    pub fn generate_partial_code(&self, start: usize, end: usize) -> Result<String> {
        self.check_index(end)?;
        if start > end {
            return Err(TokenError::InvalidArgument(format!(
                "range start {start} is after range end {end}"
            )));
        }
        Ok(self.tokens[start..=end].iter().map(Token::text).collect())
    }

    /// xxh3 hash of the generated code, cached until the text changes
    pub fn code_hash(&self) -> u64 {
        *self
            .hash
            .get_or_init(|| xxh3_64(self.generate_code().as_bytes()))
    }

    /// Whether any mutation happened since the last [`mark_unchanged`](Self::mark_unchanged)
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn mark_unchanged(&mut self) {
        self.changed = false;
    }

    // ---- blocks ----

    fn blocks(&self) -> &BlockMap {
        self.blocks.get_or_init(|| {
            tracing::trace!(tokens = self.tokens.len(), "computing block map");
            BlockMap::compute(&self.tokens)
        })
    }

    /// The block type and edge of the token at `index`, if it is a block boundary.
    pub fn detect_block_type(&self, index: usize) -> Option<(BlockType, BlockEdge)> {
        self.tokens
            .get(index)
            .and_then(|t| BlockType::detect(t.kind()))
    }

    /// Index of the token closing the block opened at `open`.
    pub fn find_block_end(&self, block_type: BlockType, open: usize) -> Result<usize> {
        self.find_partner(block_type, open, BlockEdge::Open)
    }

    /// Index of the token opening the block closed at `close`.
    pub fn find_block_start(&self, block_type: BlockType, close: usize) -> Result<usize> {
        self.find_partner(block_type, close, BlockEdge::Close)
    }

    fn find_partner(&self, block_type: BlockType, index: usize, edge: BlockEdge) -> Result<usize> {
        let token = self.at(index)?;
        let expected = match edge {
            BlockEdge::Open => block_type.open_kind(),
            BlockEdge::Close => block_type.close_kind(),
        };
        if token.kind() != expected {
            return Err(TokenError::BlockMismatch {
                index,
                block_type,
                edge,
            });
        }
        self.blocks()
            .partner(index)
            .ok_or(TokenError::UnbalancedBlock { index, block_type })
    }

    // ---- navigation ----

    pub fn get_next_token_matching(
        &self,
        index: usize,
        predicate: impl Fn(&Token) -> bool,
    ) -> Option<usize> {
        (index + 1..self.tokens.len()).find(|&i| predicate(&self.tokens[i]))
    }

    pub fn get_prev_token_matching(
        &self,
        index: usize,
        predicate: impl Fn(&Token) -> bool,
    ) -> Option<usize> {
        (0..index.min(self.tokens.len()))
            .rev()
            .find(|&i| predicate(&self.tokens[i]))
    }

    /// Next index that is neither whitespace nor a comment
    pub fn get_next_meaningful_token(&self, index: usize) -> Option<usize> {
        self.get_next_token_matching(index, Token::is_meaningful)
    }

    /// Previous index that is neither whitespace nor a comment
    pub fn get_prev_meaningful_token(&self, index: usize) -> Option<usize> {
        self.get_prev_token_matching(index, Token::is_meaningful)
    }

    /// Next token that is not whitespace.
    ///
    /// With `Some(chars)`, only whitespace made of those characters is
    /// skipped; other whitespace counts as a hit.
    pub fn get_next_non_whitespace(&self, index: usize, chars: Option<&str>) -> Option<usize> {
        self.get_next_token_matching(index, |t| !skippable_whitespace(t, chars))
    }

    pub fn get_prev_non_whitespace(&self, index: usize, chars: Option<&str>) -> Option<usize> {
        self.get_prev_token_matching(index, |t| !skippable_whitespace(t, chars))
    }

    pub fn get_next_token_of_kind(&self, index: usize, kinds: &[TokenKind]) -> Option<usize> {
        self.get_next_token_matching(index, |t| t.is_any_kind(kinds))
    }

    pub fn get_prev_token_of_kind(&self, index: usize, kinds: &[TokenKind]) -> Option<usize> {
        self.get_prev_token_matching(index, |t| t.is_any_kind(kinds))
    }

    /// Nearest token in `direction` that is not a cleared slot.
    pub fn get_non_empty_sibling(&self, index: usize, direction: Direction) -> Option<usize> {
        match direction {
            Direction::Next => self.get_next_token_matching(index, |t| !t.is_empty()),
            Direction::Prev => self.get_prev_token_matching(index, |t| !t.is_empty()),
        }
    }

    // ---- kind queries ----

    pub fn is_token_kind_found(&self, kind: TokenKind) -> bool {
        self.count_token_kind(kind) > 0
    }

    pub fn is_any_token_kinds_found(&self, kinds: &[TokenKind]) -> bool {
        kinds.iter().any(|&k| self.is_token_kind_found(k))
    }

    pub fn is_all_token_kinds_found(&self, kinds: &[TokenKind]) -> bool {
        kinds.iter().all(|&k| self.is_token_kind_found(k))
    }

    /// Occurrences of `kind`, cleared slots excluded
    pub fn count_token_kind(&self, kind: TokenKind) -> usize {
        self.kind_counts.get(&kind).copied().unwrap_or(0)
    }

    /// Indices of `kind` within `start..end`
    pub fn find_kind(&self, kind: TokenKind, start: usize, end: usize) -> Vec<usize> {
        if !self.is_token_kind_found(kind) {
            return Vec::new();
        }
        let end = end.min(self.tokens.len());
        (start.min(end)..end)
            .filter(|&i| self.tokens[i].is_kind(kind) && !self.tokens[i].is_empty())
            .collect()
    }

    // ---- mutation ----

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.tokens.len() {
            Ok(())
        } else {
            Err(TokenError::IndexOutOfRange {
                index,
                len: self.tokens.len(),
            })
        }
    }

    fn count_in(&mut self, token: &Token) {
        if !token.is_empty() {
            *self.kind_counts.entry(token.kind()).or_insert(0) += 1;
        }
    }

    fn count_out(&mut self, token: &Token) {
        if token.is_empty() {
            return;
        }
        if let Some(count) = self.kind_counts.get_mut(&token.kind()) {
            *count = count.saturating_sub(1);
        }
    }

    fn text_changed(&mut self) {
        self.changed = true;
        self.hash = OnceCell::new();
    }

    fn invalidate_blocks(&mut self) {
        self.blocks = OnceCell::new();
    }

    /// Insert `tokens` before `index`; `index == len()` appends.
    pub fn insert_at(&mut self, index: usize, tokens: impl IntoIterator<Item = Token>) -> Result<()> {
        if index > self.tokens.len() {
            return Err(TokenError::IndexOutOfRange {
                index,
                len: self.tokens.len(),
            });
        }
        let new: Vec<Token> = tokens.into_iter().collect();
        if new.is_empty() {
            return Ok(());
        }
        for token in &new {
            self.count_in(token);
        }
        self.tokens.splice(index..index, new);
        self.invalidate_blocks();
        self.text_changed();
        Ok(())
    }

    /// Several insertions keyed by the original index they go before.
    pub fn insert_slices(&mut self, slices: BTreeMap<usize, Vec<Token>>) -> Result<()> {
        for (index, tokens) in slices.into_iter().rev() {
            self.insert_at(index, tokens)?;
        }
        Ok(())
    }

    /// Physically remove the token at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<Token> {
        self.check_index(index)?;
        let token = self.tokens.remove(index);
        self.count_out(&token);
        self.invalidate_blocks();
        if !token.is_empty() {
            self.text_changed();
        }
        Ok(token)
    }

    /// Replace the token at `index`.
    ///
    /// Replacing a token with an equal one is not a change.
    pub fn set_token_at(&mut self, index: usize, token: Token) -> Result<()> {
        self.check_index(index)?;
        let old = &self.tokens[index];
        if old.equals(&token) {
            return Ok(());
        }
        let text_differs = old.text() != token.text();
        let structural = BlockType::detect(old.kind()).is_some()
            || BlockType::detect(token.kind()).is_some();
        let old = std::mem::replace(&mut self.tokens[index], token.clone());
        self.count_out(&old);
        self.count_in(&token);
        if structural {
            self.invalidate_blocks();
        }
        if text_differs {
            self.text_changed();
        } else {
            self.changed = true;
        }
        Ok(())
    }

    /// Retag the token at `index`, keeping its text.
    pub fn set_kind(&mut self, index: usize, kind: TokenKind) -> Result<()> {
        let text = self.at(index)?.text().to_string();
        self.set_token_at(index, Token::new(kind, text))
    }

    /// Retag a matched pair as another block type.
    ///
    /// The pairing itself is unchanged, so the cached block map is patched
    /// instead of recomputed.
    pub fn retag_block(&mut self, open: usize, close: usize, block_type: BlockType) -> Result<()> {
        self.check_index(open)?;
        self.check_index(close)?;
        if open >= close || !matches!(self.detect_block_type(open), Some((_, BlockEdge::Open))) {
            return Err(TokenError::BlockMismatch {
                index: open,
                block_type,
                edge: BlockEdge::Open,
            });
        }
        if self.blocks().partner(open) != Some(close) {
            return Err(TokenError::UnbalancedBlock {
                index: open,
                block_type,
            });
        }
        for (index, kind) in [(open, block_type.open_kind()), (close, block_type.close_kind())] {
            let old_kind = self.tokens[index].kind();
            if old_kind == kind {
                continue;
            }
            let old = self.tokens[index].clone();
            self.count_out(&old);
            self.tokens[index].set_kind(kind);
            let new = self.tokens[index].clone();
            self.count_in(&new);
            self.changed = true;
        }
        Ok(())
    }

    /// Turn the token at `index` into an empty placeholder.
    pub fn clear_at(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        if self.tokens[index].is_empty() {
            return Ok(());
        }
        self.set_token_at(index, Token::empty())
    }

    /// Clear every token in `start..=end`.
    pub fn clear_range(&mut self, start: usize, end: usize) -> Result<()> {
        if start > end {
            return Ok(());
        }
        self.check_index(end)?;
        for index in start..=end {
            self.clear_at(index)?;
        }
        Ok(())
    }

    /// Drop cleared placeholders. Returns whether anything was removed.
    pub fn clear_empty_tokens(&mut self) -> bool {
        let before = self.tokens.len();
        self.tokens.retain(|t| !t.is_empty());
        let removed = before != self.tokens.len();
        if removed {
            self.invalidate_blocks();
        }
        removed
    }

    /// Replace `start..=end` with `tokens`.
    pub fn override_range(
        &mut self,
        start: usize,
        end: usize,
        tokens: impl IntoIterator<Item = Token>,
    ) -> Result<()> {
        self.check_index(end)?;
        if start > end {
            return Err(TokenError::InvalidArgument(format!(
                "range start {start} is after range end {end}"
            )));
        }
        let new: Vec<Token> = tokens.into_iter().collect();
        if self.tokens[start..=end].len() == new.len()
            && self.tokens[start..=end].iter().zip(&new).all(|(a, b)| a.equals(b))
        {
            return Ok(());
        }
        for token in &new {
            self.count_in(token);
        }
        let removed: Vec<Token> = self.tokens.splice(start..=end, new).collect();
        for token in &removed {
            self.count_out(token);
        }
        self.invalidate_blocks();
        self.text_changed();
        Ok(())
    }

    /// Make sure whitespace reading exactly `whitespace` sits at `index`.
    ///
    /// An existing whitespace token at `index` is replaced (or cleared when
    /// `whitespace` is empty). Otherwise a new token is inserted at
    /// `index + offset`. Returns whether a token was inserted.
    pub fn ensure_whitespace_at_index(
        &mut self,
        index: usize,
        offset: usize,
        whitespace: &str,
    ) -> Result<bool> {
        self.check_index(index)?;
        if self.tokens[index].is_whitespace() {
            if whitespace.is_empty() {
                self.clear_at(index)?;
            } else {
                self.set_token_at(index, Token::whitespace(whitespace))?;
            }
            return Ok(false);
        }
        if whitespace.is_empty() {
            return Ok(false);
        }
        self.insert_at(index + offset, [Token::whitespace(whitespace)])?;
        Ok(true)
    }

    /// Clear the token at `index` without leaving adjacent whitespace tokens.
    ///
    /// Whitespace following the token is folded into the whitespace before
    /// it, or moved into the cleared slot.
    pub fn clear_token_and_merge_surrounding_whitespace(&mut self, index: usize) -> Result<()> {
        self.clear_at(index)?;

        let Some(next) = self.get_non_empty_sibling(index, Direction::Next) else {
            return Ok(());
        };
        if !self.tokens[next].is_whitespace() {
            return Ok(());
        }

        let Some(prev) = self.get_non_empty_sibling(index, Direction::Prev) else {
            return Ok(());
        };
        if self.tokens[prev].is_whitespace() {
            let merged = format!("{}{}", self.tokens[prev].text(), self.tokens[next].text());
            self.set_token_at(prev, Token::whitespace(merged))?;
        } else {
            let moved = self.tokens[next].text().to_string();
            self.set_token_at(prev + 1, Token::whitespace(moved))?;
        }
        self.clear_at(next)
    }
}

fn skippable_whitespace(token: &Token, chars: Option<&str>) -> bool {
    match chars {
        Some(chars) => token.is_whitespace_of(chars),
        None => token.is_whitespace(),
    }
}

impl Index<usize> for Tokens {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a Tokens {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn index_of(tokens: &Tokens, kind: TokenKind) -> usize {
        tokens
            .iter()
            .position(|t| t.is_kind(kind))
            .expect("kind present")
    }

    #[test]
    fn test_round_trip() {
        let code = "<?php\nclass A { public function b(): ?array { return [1, 2]; } }\n";
        let tokens = Tokens::from_code(code);
        assert_eq!(tokens.generate_code(), code);
        assert!(!tokens.is_changed());
    }

    #[test]
    fn test_at_out_of_range() {
        let tokens = Tokens::from_code("<?php echo 1;");
        assert!(tokens.at(0).is_ok());
        assert_eq!(
            tokens.at(99),
            Err(TokenError::IndexOutOfRange { index: 99, len: 5 })
        );
    }

    #[test]
    fn test_find_block_end_and_start() {
        let tokens = Tokens::from_code("<?php foo(bar(1), [2]) { }");
        // 0:<?php 1:foo 2:( 3:bar 4:( 5:1 6:) 7:, 8:ws 9:[ 10:2 11:] 12:) 13:ws 14:{ 15:ws 16:}
        assert_eq!(tokens.find_block_end(BlockType::Parenthesis, 2), Ok(12));
        assert_eq!(tokens.find_block_end(BlockType::Parenthesis, 4), Ok(6));
        assert_eq!(tokens.find_block_start(BlockType::Parenthesis, 12), Ok(2));
        assert_eq!(tokens.find_block_end(BlockType::ArraySquareBrace, 9), Ok(11));
        assert_eq!(tokens.find_block_end(BlockType::CurlyBrace, 14), Ok(16));
    }

    #[test]
    fn test_find_block_errors() {
        let tokens = Tokens::from_code("<?php foo(1;");
        assert_eq!(
            tokens.find_block_end(BlockType::CurlyBrace, 2),
            Err(TokenError::BlockMismatch {
                index: 2,
                block_type: BlockType::CurlyBrace,
                edge: BlockEdge::Open
            })
        );
        assert_eq!(
            tokens.find_block_end(BlockType::Parenthesis, 2),
            Err(TokenError::UnbalancedBlock {
                index: 2,
                block_type: BlockType::Parenthesis
            })
        );
        assert!(matches!(
            tokens.find_block_end(BlockType::Parenthesis, 40),
            Err(TokenError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_block_map_follows_insertions() {
        let mut tokens = Tokens::from_code("<?php if ($a) { b(); }");
        let open = index_of(&tokens, TokenKind::OpenCurly);
        let close = tokens.find_block_end(BlockType::CurlyBrace, open).unwrap();
        tokens
            .insert_at(open + 1, [Token::whitespace(" "), Token::new(TokenKind::Variable, "$x"), Token::of(TokenKind::Semicolon)])
            .unwrap();
        assert_eq!(tokens.find_block_end(BlockType::CurlyBrace, open), Ok(close + 3));
        tokens.remove_at(open + 1).unwrap();
        assert_eq!(tokens.find_block_end(BlockType::CurlyBrace, open), Ok(close + 2));
    }

    #[test]
    fn test_meaningful_navigation() {
        let tokens = Tokens::from_code("<?php $a /* c */ = // d\n 1;");
        let var = index_of(&tokens, TokenKind::Variable);
        let eq = index_of(&tokens, TokenKind::Equals);
        let num = index_of(&tokens, TokenKind::LNumber);
        assert_eq!(tokens.get_next_meaningful_token(var), Some(eq));
        assert_eq!(tokens.get_next_meaningful_token(eq), Some(num));
        assert_eq!(tokens.get_prev_meaningful_token(eq), Some(var));
        assert_eq!(tokens.get_next_meaningful_token(tokens.len() - 1), None);
        assert_eq!(tokens.get_prev_meaningful_token(0), None);
        assert_eq!(tokens.get_next_meaningful_token(num), Some(num + 1));
    }

    #[test]
    fn test_non_whitespace_with_character_set() {
        let tokens = Tokens::from_code("<?php $a  \n  ;");
        // 1:$a 2:ws 3:;
        assert_eq!(tokens.get_next_non_whitespace(1, None), Some(3));
        assert_eq!(tokens.get_next_non_whitespace(1, Some(" \t")), Some(2));
        assert_eq!(tokens.get_prev_non_whitespace(3, None), Some(1));
    }

    #[test]
    fn test_kind_queries_track_mutations() {
        let mut tokens = Tokens::from_code("<?php foo(); foo();");
        assert_eq!(tokens.count_token_kind(TokenKind::Semicolon), 2);
        assert!(tokens.is_all_token_kinds_found(&[TokenKind::Identifier, TokenKind::Semicolon]));
        let semicolon = index_of(&tokens, TokenKind::Semicolon);
        tokens.clear_at(semicolon).unwrap();
        assert_eq!(tokens.count_token_kind(TokenKind::Semicolon), 1);
        tokens.set_kind(semicolon + 2, TokenKind::Variable).unwrap();
        assert!(tokens.is_any_token_kinds_found(&[TokenKind::Variable]));
        assert_eq!(tokens.find_kind(TokenKind::Semicolon, 0, tokens.len()).len(), 1);
    }

    #[test]
    fn test_set_token_at_same_content_is_not_a_change() {
        let mut tokens = Tokens::from_code("<?php echo 1;");
        let token = tokens[1].clone();
        tokens.set_token_at(1, token).unwrap();
        assert!(!tokens.is_changed());
        tokens
            .set_token_at(1, Token::new(TokenKind::Print, "print"))
            .unwrap();
        assert!(tokens.is_changed());
        assert_eq!(tokens.generate_code(), "<?php print 1;");
    }

    #[test]
    fn test_code_hash_follows_text() {
        let mut tokens = Tokens::from_code("<?php echo 1;");
        let before = tokens.code_hash();
        tokens.set_kind(3, TokenKind::DNumber).unwrap();
        assert_eq!(tokens.code_hash(), before);
        tokens.set_token_at(3, Token::new(TokenKind::LNumber, "2")).unwrap();
        assert_ne!(tokens.code_hash(), before);
    }

    #[test]
    fn test_clear_merges_whitespace_around_token() {
        let mut tokens = Tokens::from_code("<?php $a = 1; /* x */ $b = 2;");
        let comment = index_of(&tokens, TokenKind::Comment);
        tokens
            .clear_token_and_merge_surrounding_whitespace(comment)
            .unwrap();
        assert_eq!(tokens.generate_code(), "<?php $a = 1;  $b = 2;");
        tokens.clear_empty_tokens();
        let adjacent = tokens
            .as_slice()
            .windows(2)
            .any(|w| w[0].is_whitespace() && w[1].is_whitespace());
        assert!(!adjacent);
    }

    #[test]
    fn test_clear_moves_whitespace_into_cleared_slot() {
        let mut tokens = Tokens::from_code("<?php {} // {}");
        // 1:{ 2:} 3:ws 4:comment
        tokens.clear_token_and_merge_surrounding_whitespace(2).unwrap();
        tokens.clear_token_and_merge_surrounding_whitespace(1).unwrap();
        assert_eq!(tokens.generate_code(), "<?php  // {}");
        assert_eq!(tokens[1].text(), " ");
        assert!(tokens[2].is_empty());
        assert!(tokens[3].is_empty());
    }

    #[test]
    fn test_clear_last_token_keeps_blanks_before_it() {
        let mut tokens = Tokens::from_code("<?php echo 1; 2 ;");
        let last = tokens.len() - 1;
        tokens
            .clear_token_and_merge_surrounding_whitespace(last)
            .unwrap();
        assert_eq!(tokens.generate_code(), "<?php echo 1; 2 ");

        let two = index_of(&tokens, TokenKind::LNumber) + 3;
        tokens.clear_token_and_merge_surrounding_whitespace(two).unwrap();
        assert_eq!(tokens.generate_code(), "<?php echo 1;  ");
    }

    #[test]
    fn test_ensure_whitespace_at_index() {
        let mut tokens = Tokens::from_code("<?php $a=1;");
        // 1:$a 2:= 3:1
        assert_eq!(tokens.ensure_whitespace_at_index(2, 0, " "), Ok(true));
        assert_eq!(tokens.generate_code(), "<?php $a =1;");
        // 2:ws 3:=
        assert_eq!(tokens.ensure_whitespace_at_index(2, 0, "  "), Ok(false));
        assert_eq!(tokens.generate_code(), "<?php $a  =1;");
        assert_eq!(tokens.ensure_whitespace_at_index(3, 1, " "), Ok(true));
        assert_eq!(tokens.generate_code(), "<?php $a  = 1;");
        assert_eq!(tokens.ensure_whitespace_at_index(2, 0, ""), Ok(false));
        assert_eq!(tokens.generate_code(), "<?php $a= 1;");
    }

    #[test]
    fn test_override_range_and_insert_slices() {
        let mut tokens = Tokens::from_code("<?php a(); b();");
        // 1:a 2:( 3:) 4:;
        tokens
            .override_range(1, 1, [Token::new(TokenKind::Identifier, "c")])
            .unwrap();
        assert_eq!(tokens.generate_code(), "<?php c(); b();");

        let mut slices = BTreeMap::new();
        slices.insert(1, vec![Token::of(TokenKind::At)]);
        slices.insert(6, vec![Token::of(TokenKind::At)]);
        tokens.insert_slices(slices).unwrap();
        assert_eq!(tokens.generate_code(), "<?php @c(); @b();");
    }

    #[test]
    fn test_retag_block_keeps_pairs() {
        let mut tokens = Tokens::from_code("<?php $a[1];");
        // 1:$a 2:[ 3:1 4:]
        assert_eq!(tokens.find_block_end(BlockType::IndexSquareBrace, 2), Ok(4));
        tokens
            .retag_block(2, 4, BlockType::ArraySquareBrace)
            .unwrap();
        assert_eq!(tokens.find_block_end(BlockType::ArraySquareBrace, 2), Ok(4));
        assert!(tokens.find_block_end(BlockType::IndexSquareBrace, 2).is_err());
        assert_eq!(tokens.generate_code(), "<?php $a[1];");
    }

    #[test]
    fn test_retag_block_rejects_swapped_edges() {
        let mut tokens = Tokens::from_code("<?php $a[1];");
        assert_eq!(
            tokens.retag_block(4, 2, BlockType::ArraySquareBrace),
            Err(TokenError::BlockMismatch {
                index: 4,
                block_type: BlockType::ArraySquareBrace,
                edge: BlockEdge::Open,
            })
        );
        assert_eq!(tokens[2].kind(), TokenKind::OpenBracket);
        assert_eq!(tokens[4].kind(), TokenKind::CloseBracket);
        assert_eq!(tokens.find_block_end(BlockType::IndexSquareBrace, 2), Ok(4));
    }

    fn php_snippet() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop::sample::select(vec![
                "$a", "foo", "(", ")", "[", "]", "{", "}", ";", " ", "\n", "// c\n", "/* d */",
                "=", "1", ",", "->", "::", "'s'",
            ]),
            0..40,
        )
        .prop_map(|parts| format!("<?php {}", parts.concat()))
    }

    proptest! {
        #[test]
        fn prop_from_code_round_trips(code in php_snippet()) {
            prop_assert_eq!(Tokens::from_code(&code).generate_code(), code);
        }

        #[test]
        fn prop_block_matching_is_symmetric(code in php_snippet()) {
            let tokens = Tokens::from_code(&code);
            for index in 0..tokens.len() {
                let Some((block_type, edge)) = tokens.detect_block_type(index) else { continue };
                match edge {
                    BlockEdge::Open => {
                        if let Ok(end) = tokens.find_block_end(block_type, index) {
                            prop_assert!(end > index);
                            prop_assert_eq!(tokens.find_block_start(block_type, end), Ok(index));
                        }
                    }
                    BlockEdge::Close => {
                        if let Ok(start) = tokens.find_block_start(block_type, index) {
                            prop_assert!(start < index);
                            prop_assert_eq!(tokens.find_block_end(block_type, start), Ok(index));
                        }
                    }
                }
            }
        }

        #[test]
        fn prop_meaningful_navigation(code in php_snippet()) {
            let tokens = Tokens::from_code(&code);
            for index in 0..tokens.len() {
                if let Some(next) = tokens.get_next_meaningful_token(index) {
                    prop_assert!(tokens[next].is_meaningful());
                    prop_assert!((index + 1..next).all(|i| !tokens[i].is_meaningful()));
                }
                if index + 1 < tokens.len() && tokens[index + 1].is_meaningful() {
                    prop_assert_eq!(tokens.get_next_meaningful_token(index), Some(index + 1));
                }
            }
        }

        #[test]
        fn prop_clearing_never_leaves_adjacent_whitespace(
            code in php_snippet(),
            picks in prop::collection::vec(any::<prop::sample::Index>(), 0..10),
        ) {
            let mut tokens = Tokens::from_code(&code);
            for pick in picks {
                let meaningful: Vec<usize> = (1..tokens.len())
                    .filter(|&i| tokens[i].is_meaningful() && !tokens[i].is_empty())
                    .collect();
                if meaningful.is_empty() {
                    break;
                }
                let index = meaningful[pick.index(meaningful.len())];
                tokens.clear_token_and_merge_surrounding_whitespace(index).unwrap();
            }
            tokens.clear_empty_tokens();
            let adjacent = tokens
                .as_slice()
                .windows(2)
                .any(|w| w[0].is_whitespace() && w[1].is_whitespace());
            prop_assert!(!adjacent);
        }
    }
}
