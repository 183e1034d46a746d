//! Remove trailing commas in list() calls

use fixor_core::{BlockType, Result, TokenKind, Tokens};

use crate::fixers::{Fixer, FixerConfig, FixerOption};

/// `list($a, $b, ) = $c` becomes `list($a, $b) = $c`
///
/// A run of trailing empty slots is dropped as a whole. A comment between
/// the last comma and `)` keeps the list as written.
pub struct NoTrailingCommaInListCallFixer;

impl Fixer for NoTrailingCommaInListCallFixer {
    fn name(&self) -> &'static str {
        "no_trailing_comma_in_list_call"
    }

    fn description(&self) -> &'static str {
        "Remove trailing commas in list function calls"
    }

    fn priority(&self) -> i32 {
        0
    }

    fn is_risky(&self) -> bool {
        false
    }

    fn options(&self) -> Vec<FixerOption> {
        Vec::new()
    }

    fn is_candidate(&self, tokens: &Tokens) -> bool {
        tokens.is_token_kind_found(TokenKind::List)
    }

    fn apply(&self, tokens: &mut Tokens, _config: &FixerConfig) -> Result<()> {
        for index in (0..tokens.len()).rev() {
            if !tokens[index].is_kind(TokenKind::List) {
                continue;
            }
            let Some(open) = tokens
                .get_next_meaningful_token(index)
                .filter(|&i| tokens[i].is_kind(TokenKind::OpenParen))
            else {
                continue;
            };
            let close = tokens.find_block_end(BlockType::Parenthesis, open)?;

            let mut first_trailing = None;
            let mut prev = tokens.get_prev_non_whitespace(close, None);
            while let Some(comma) = prev.filter(|&i| tokens[i].is_kind(TokenKind::Comma)) {
                first_trailing = Some(comma);
                prev = tokens.get_prev_non_whitespace(comma, None);
            }

            if let (Some(_), Some(last_kept)) = (first_trailing, prev) {
                tokens.clear_range(last_kept + 1, close - 1)?;
            }
        }
        Ok(())
    }
}
