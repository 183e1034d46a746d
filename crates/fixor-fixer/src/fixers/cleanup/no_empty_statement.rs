//! Remove useless semicolons and no-op statements

use fixor_core::{BlockType, Result, TokenKind, Tokens};

use crate::fixers::{Fixer, FixerConfig, FixerOption};

/// Removes empty statements
///
/// Handles `;;`, a `;` after a block that is not an expression, literal
/// statements like `1;` and the redundant level in `break 1`.
pub struct NoEmptyStatementFixer;

/// Statements consisting of a single value have no effect
const NOOP_VALUES: &[TokenKind] = &[
    TokenKind::ConstantEncapsedString,
    TokenKind::DNumber,
    TokenKind::LNumber,
    TokenKind::Identifier,
    TokenKind::Variable,
];

impl NoEmptyStatementFixer {
    fn fix_semicolon(tokens: &mut Tokens, index: usize) -> Result<()> {
        let Some(prev) = tokens.get_prev_meaningful_token(index) else {
            return Ok(());
        };

        if tokens[prev].is_any_kind(&[TokenKind::OpenCurly, TokenKind::Semicolon, TokenKind::OpenTag])
        {
            return tokens.clear_token_and_merge_surrounding_whitespace(index);
        }

        if tokens[prev].is_kind(TokenKind::CloseCurly) {
            return Self::fix_semicolon_after_block(tokens, index, prev);
        }

        let starts_statement = tokens.get_prev_meaningful_token(prev).is_some_and(|i| {
            tokens[i].is_any_kind(&[
                TokenKind::Semicolon,
                TokenKind::OpenCurly,
                TokenKind::CloseCurly,
                TokenKind::OpenTag,
            ])
        });
        if starts_statement && tokens[prev].is_any_kind(NOOP_VALUES) {
            tokens.clear_token_and_merge_surrounding_whitespace(index)?;
            tokens.clear_token_and_merge_surrounding_whitespace(prev)?;
        }
        Ok(())
    }

    /// A `;` after `}` is empty unless the block ends an expression
    /// (closure, anonymous class, `match`).
    fn fix_semicolon_after_block(tokens: &mut Tokens, index: usize, close: usize) -> Result<()> {
        let open = tokens.find_block_start(BlockType::CurlyBrace, close)?;
        let Some(before) = tokens.get_prev_meaningful_token(open) else {
            return Ok(());
        };

        if tokens[before].is_any_kind(&[
            TokenKind::Else,
            TokenKind::Finally,
            TokenKind::Namespace,
            TokenKind::OpenTag,
            TokenKind::Semicolon,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
        ]) {
            return tokens.clear_token_and_merge_surrounding_whitespace(index);
        }

        // class, interface, trait, enum and namespace declarations
        if tokens[before].is_kind(TokenKind::Identifier) {
            let mut head = tokens.get_prev_meaningful_token(before);
            while let Some(i) = head {
                if !tokens[i].is_any_kind(&[
                    TokenKind::Comma,
                    TokenKind::Identifier,
                    TokenKind::NsSeparator,
                    TokenKind::Extends,
                    TokenKind::Implements,
                ]) {
                    break;
                }
                head = tokens.get_prev_meaningful_token(i);
            }
            let declaration = head.is_some_and(|i| {
                tokens[i].is_kind(TokenKind::Namespace)
                    || (tokens[i].is_classy() && !is_anonymous_class(tokens, i))
            });
            if declaration {
                tokens.clear_token_and_merge_surrounding_whitespace(index)?;
            }
            return Ok(());
        }

        if !tokens[before].is_kind(TokenKind::CloseParen) {
            return Ok(());
        }
        let paren = tokens.find_block_start(BlockType::Parenthesis, before)?;
        let Some(owner) = tokens.get_prev_meaningful_token(paren) else {
            return Ok(());
        };

        if tokens[owner].is_any_kind(&[
            TokenKind::If,
            TokenKind::ElseIf,
            TokenKind::For,
            TokenKind::Foreach,
            TokenKind::While,
            TokenKind::Switch,
            TokenKind::Catch,
            TokenKind::Declare,
        ]) {
            return tokens.clear_token_and_merge_surrounding_whitespace(index);
        }

        // named function; a closure has no name between `function` and `(`
        if tokens[owner].is_kind(TokenKind::Identifier)
            && tokens
                .get_prev_meaningful_token(owner)
                .is_some_and(|i| tokens[i].is_kind(TokenKind::Function))
        {
            tokens.clear_token_and_merge_surrounding_whitespace(index)?;
        }
        Ok(())
    }
}

/// `new class`, `new readonly class` or `new #[Attr] class`
fn is_anonymous_class(tokens: &Tokens, class: usize) -> bool {
    let mut prev = tokens.get_prev_meaningful_token(class);
    while let Some(i) = prev {
        if tokens[i].is_kind(TokenKind::Readonly) {
            prev = tokens.get_prev_meaningful_token(i);
        } else if tokens[i].is_kind(TokenKind::AttributeClose) {
            prev = tokens
                .find_block_start(BlockType::Attribute, i)
                .ok()
                .and_then(|start| tokens.get_prev_meaningful_token(start));
        } else {
            break;
        }
    }
    prev.is_some_and(|i| tokens[i].is_kind(TokenKind::New))
}

impl Fixer for NoEmptyStatementFixer {
    fn name(&self) -> &'static str {
        "no_empty_statement"
    }

    fn description(&self) -> &'static str {
        "Remove useless (semicolon) statements"
    }

    fn priority(&self) -> i32 {
        40
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
        let mut index = 0;
        while index < tokens.len() {
            match tokens[index].kind() {
                TokenKind::Break | TokenKind::Continue => {
                    if let Some(level) = tokens.get_next_meaningful_token(index) {
                        if tokens[level].is_kind(TokenKind::LNumber) && tokens[level].text() == "1" {
                            tokens.clear_token_and_merge_surrounding_whitespace(level)?;
                        }
                        index = level;
                    }
                }
                // `for (;;)` separators are not statements
                TokenKind::For => {
                    if let Some(paren) = tokens
                        .get_next_meaningful_token(index)
                        .filter(|&i| tokens[i].is_kind(TokenKind::OpenParen))
                    {
                        index = tokens.find_block_end(BlockType::Parenthesis, paren)?;
                    }
                }
                TokenKind::Semicolon => Self::fix_semicolon(tokens, index)?,
                _ => {}
            }
            index += 1;
        }
        Ok(())
    }
}
