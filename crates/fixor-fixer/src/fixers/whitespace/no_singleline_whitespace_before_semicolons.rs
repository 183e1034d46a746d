//! No whitespace before semicolons

use fixor_core::{Result, TokenKind, Tokens};

use crate::fixers::{Fixer, FixerConfig, FixerOption};

/// Drops blanks between a statement and its `;` on the same line
///
/// A `;` on its own line keeps its indentation, and the blank after an
/// empty `for` clause shrinks to one space instead of vanishing.
pub struct NoSinglelineWhitespaceBeforeSemicolonsFixer;

impl Fixer for NoSinglelineWhitespaceBeforeSemicolonsFixer {
    fn name(&self) -> &'static str {
        "no_singleline_whitespace_before_semicolons"
    }

    fn description(&self) -> &'static str {
        "Single-line whitespace before closing semicolon are prohibited"
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
        tokens.is_token_kind_found(TokenKind::Semicolon)
    }

    fn apply(&self, tokens: &mut Tokens, _config: &FixerConfig) -> Result<()> {
        for index in 2..tokens.len() {
            if !tokens[index].is_kind(TokenKind::Semicolon)
                || !tokens[index - 1].is_whitespace_of(" \t")
            {
                continue;
            }
            if tokens[index - 2].is_kind(TokenKind::Semicolon) {
                tokens.ensure_whitespace_at_index(index - 1, 0, " ")?;
            } else if !tokens[index - 2].is_comment() {
                tokens.clear_at(index - 1)?;
            }
        }
        Ok(())
    }
}
