//! Normalize empty loop bodies

use fixor_core::{BlockType, Result, Token, TokenKind, Tokens};

use crate::fixers::{ConfigValue, Fixer, FixerConfig, FixerOption, OptionType};

const STYLE_BRACES: &str = "braces";
const STYLE_SEMICOLON: &str = "semicolon";

/// Writes empty `for`, `foreach` and `while` bodies as `;` or as `{}`
pub struct EmptyLoopBodyFixer;

impl EmptyLoopBodyFixer {
    /// `while(x){}` to `while(x);`
    fn to_semicolon(tokens: &mut Tokens, condition_end: usize) -> Result<()> {
        let Some(open) = tokens
            .get_next_meaningful_token(condition_end)
            .filter(|&i| tokens[i].is_kind(TokenKind::OpenCurly))
        else {
            return Ok(());
        };
        // a comment inside the body keeps it
        let Some(close) = tokens
            .get_next_non_whitespace(open, None)
            .filter(|&i| tokens[i].is_kind(TokenKind::CloseCurly))
        else {
            return Ok(());
        };
        tokens.set_token_at(open, Token::of(TokenKind::Semicolon))?;
        tokens.clear_token_and_merge_surrounding_whitespace(close)
    }

    /// `while(x);` to `while(x){}`
    fn to_braces(tokens: &mut Tokens, loop_index: usize, condition_end: usize) -> Result<()> {
        if tokens[loop_index].is_kind(TokenKind::While) && is_do_while_tail(tokens, loop_index)? {
            return Ok(());
        }
        let Some(semicolon) = tokens
            .get_next_meaningful_token(condition_end)
            .filter(|&i| tokens[i].is_kind(TokenKind::Semicolon))
        else {
            return Ok(());
        };
        tokens.set_token_at(semicolon, Token::of(TokenKind::CloseCurly))?;
        tokens.insert_at(semicolon, [Token::of(TokenKind::OpenCurly)])
    }
}

/// Whether this `while` closes a `do { ... } while (...)` loop.
fn is_do_while_tail(tokens: &Tokens, while_index: usize) -> Result<bool> {
    let Some(end) = tokens
        .get_prev_meaningful_token(while_index)
        .filter(|&i| tokens[i].is_kind(TokenKind::CloseCurly))
    else {
        return Ok(false);
    };
    let start = tokens.find_block_start(BlockType::CurlyBrace, end)?;
    Ok(tokens
        .get_prev_meaningful_token(start)
        .is_some_and(|i| tokens[i].is_kind(TokenKind::Do)))
}

impl Fixer for EmptyLoopBodyFixer {
    fn name(&self) -> &'static str {
        "empty_loop_body"
    }

    fn description(&self) -> &'static str {
        "Empty loop-body must be in configured style"
    }

    fn priority(&self) -> i32 {
        39
    }

    fn is_risky(&self) -> bool {
        false
    }

    fn options(&self) -> Vec<FixerOption> {
        vec![FixerOption {
            name: "style",
            description: "Style of empty loop-bodies",
            option_type: OptionType::Enum(&[STYLE_BRACES, STYLE_SEMICOLON]),
            default: ConfigValue::String(STYLE_SEMICOLON.to_string()),
        }]
    }

    fn is_candidate(&self, tokens: &Tokens) -> bool {
        tokens.is_any_token_kinds_found(&[TokenKind::For, TokenKind::Foreach, TokenKind::While])
    }

    fn apply(&self, tokens: &mut Tokens, config: &FixerConfig) -> Result<()> {
        let braces = config.str_option("style") == Some(STYLE_BRACES);

        for index in (1..tokens.len()).rev() {
            if !tokens[index].is_any_kind(&[TokenKind::For, TokenKind::Foreach, TokenKind::While]) {
                continue;
            }
            let Some(open) = tokens.get_next_token_of_kind(index, &[TokenKind::OpenParen]) else {
                continue;
            };
            let condition_end = tokens.find_block_end(BlockType::Parenthesis, open)?;
            if braces {
                Self::to_braces(tokens, index, condition_end)?;
            } else {
                Self::to_semicolon(tokens, condition_end)?;
            }
        }
        Ok(())
    }
}
