//! Remove leading slashes in use statements

use fixor_core::{Result, Token, TokenKind, Tokens};

use crate::fixers::{Fixer, FixerConfig, FixerOption};

/// `use \A\B;` becomes `use A\B;`
///
/// Trait `use` and closure `use` are different token kinds and never
/// match here.
pub struct NoLeadingImportSlashFixer;

impl NoLeadingImportSlashFixer {
    fn remove_slash(tokens: &mut Tokens, slash: usize) -> Result<()> {
        let glued = tokens
            .get_prev_non_whitespace(slash, None)
            .is_some_and(|prev| prev + 1 == slash && !tokens[prev].is_comment());
        if glued {
            // `use\Foo`: the slash is the only separator
            tokens.set_token_at(slash, Token::whitespace(" "))
        } else {
            tokens.clear_at(slash)
        }
    }
}

impl Fixer for NoLeadingImportSlashFixer {
    fn name(&self) -> &'static str {
        "no_leading_import_slash"
    }

    fn description(&self) -> &'static str {
        "Remove leading slashes in `use` clauses"
    }

    fn priority(&self) -> i32 {
        -20
    }

    fn is_risky(&self) -> bool {
        false
    }

    fn options(&self) -> Vec<FixerOption> {
        Vec::new()
    }

    fn is_candidate(&self, tokens: &Tokens) -> bool {
        tokens.is_token_kind_found(TokenKind::Use)
    }

    fn apply(&self, tokens: &mut Tokens, _config: &FixerConfig) -> Result<()> {
        for index in 0..tokens.len() {
            if !tokens[index].is_kind(TokenKind::Use) {
                continue;
            }
            let mut next = tokens.get_next_meaningful_token(index);
            if let Some(i) = next.filter(|&i| {
                tokens[i].is_any_kind(&[TokenKind::FunctionImport, TokenKind::ConstImport])
            }) {
                next = tokens.get_next_meaningful_token(i);
            }
            if let Some(slash) = next.filter(|&i| tokens[i].is_kind(TokenKind::NsSeparator)) {
                Self::remove_slash(tokens, slash)?;
            }
        }
        Ok(())
    }
}
