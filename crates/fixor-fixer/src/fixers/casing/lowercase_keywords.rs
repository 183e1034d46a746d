//! Lowercase PHP keywords

use fixor_core::{Result, Token, TokenKind, Tokens};

use crate::fixers::{Fixer, FixerConfig, FixerOption};

/// Ensures PHP keywords are lowercase
///
/// `__halt_compiler` keeps its spelling. `true`, `false` and `null` are
/// constants, not keywords, and are left to `constant_case`-style rules.
pub struct LowercaseKeywordsFixer;

fn needs_lowering(token: &Token) -> bool {
    token.is_keyword()
        && !token.is_kind(TokenKind::HaltCompiler)
        && token.text().bytes().any(|b| b.is_ascii_uppercase())
}

impl Fixer for LowercaseKeywordsFixer {
    fn name(&self) -> &'static str {
        "lowercase_keywords"
    }

    fn description(&self) -> &'static str {
        "PHP keywords must be in lower case"
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
        tokens.iter().any(needs_lowering)
    }

    fn apply(&self, tokens: &mut Tokens, _config: &FixerConfig) -> Result<()> {
        for index in 0..tokens.len() {
            if needs_lowering(&tokens[index]) {
                let token = &tokens[index];
                let lowered = Token::new(token.kind(), token.text().to_ascii_lowercase());
                tokens.set_token_at(index, lowered)?;
            }
        }
        Ok(())
    }
}
