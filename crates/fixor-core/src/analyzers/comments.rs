//! Queries about comments and what follows them

use crate::block::BlockType;
use crate::error::{Result, TokenError};
use crate::kind::TokenKind;
use crate::token::Token;
use crate::tokens::Tokens;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommentStyle {
    DoubleSlash,
    Hash,
    SlashAsterisk,
}

impl CommentStyle {
    fn of(text: &str) -> Self {
        if text.starts_with("//") {
            CommentStyle::DoubleSlash
        } else if text.starts_with('#') {
            CommentStyle::Hash
        } else {
            CommentStyle::SlashAsterisk
        }
    }
}

/// Kinds that start a declaration a leading comment can document
const DECLARATION_KINDS: &[TokenKind] = &[
    TokenKind::Private,
    TokenKind::Protected,
    TokenKind::Public,
    TokenKind::Var,
    TokenKind::Function,
    TokenKind::Fn,
    TokenKind::Abstract,
    TokenKind::Const,
    TokenKind::Namespace,
    TokenKind::Require,
    TokenKind::RequireOnce,
    TokenKind::Include,
    TokenKind::IncludeOnce,
    TokenKind::Final,
    TokenKind::Readonly,
];

const CONTROL_KINDS: &[TokenKind] = &[
    TokenKind::For,
    TokenKind::Foreach,
    TokenKind::If,
    TokenKind::Switch,
    TokenKind::While,
];

pub struct CommentsAnalyzer;

impl CommentsAnalyzer {
    fn ensure_comment(tokens: &Tokens, index: usize) -> Result<&Token> {
        let token = tokens.at(index)?;
        if token.is_comment() {
            Ok(token)
        } else {
            Err(TokenError::InvalidArgument(format!(
                "index {index} must point to a comment"
            )))
        }
    }

    /// Indices of the run of same-style single-line comments starting at `index`.
    ///
    /// `/* */` and doc comments form a run of one. A blank line or a change
    /// between `//` and `#` ends the run.
    pub fn get_comment_block_indices(tokens: &Tokens, index: usize) -> Result<Vec<usize>> {
        let style = CommentStyle::of(Self::ensure_comment(tokens, index)?.text());
        let mut indices = vec![index];
        if style == CommentStyle::SlashAsterisk {
            return Ok(indices);
        }

        for i in index + 1..tokens.len() {
            let token = &tokens[i];
            if token.is_comment() {
                if CommentStyle::of(token.text()) != style {
                    break;
                }
                indices.push(i);
                continue;
            }
            if !token.is_whitespace() || line_break_count(token.text()) > 1 {
                break;
            }
        }
        Ok(indices)
    }

    /// Whether the comment at `index` is the file header: first thing after
    /// the opening tag (or after a leading `declare(...);`) with code after it.
    pub fn is_header_comment(tokens: &Tokens, index: usize) -> Result<bool> {
        Self::ensure_comment(tokens, index)?;
        if tokens.get_next_meaningful_token(index).is_none() {
            return Ok(false);
        }

        let Some(mut prev) = tokens.get_prev_non_whitespace(index, None) else {
            return Ok(false);
        };
        if tokens[prev].is_kind(TokenKind::Semicolon) {
            let Some(close) = tokens
                .get_prev_meaningful_token(prev)
                .filter(|&i| tokens[i].is_kind(TokenKind::CloseParen))
            else {
                return Ok(false);
            };
            let open = tokens.find_block_start(BlockType::Parenthesis, close)?;
            let Some(declare) = tokens
                .get_prev_meaningful_token(open)
                .filter(|&i| tokens[i].is_kind(TokenKind::Declare))
            else {
                return Ok(false);
            };
            match tokens.get_prev_non_whitespace(declare, None) {
                Some(i) => prev = i,
                None => return Ok(false),
            }
        }
        Ok(tokens[prev].is_kind(TokenKind::OpenTag))
    }

    /// Whether the comment at `index` documents the code right after it.
    ///
    /// True for declarations (classy, function, property, constant, enum
    /// case, namespace, include/require, trait use) and for statements
    /// whose variables the comment names: control structures, assignments,
    /// `list`, `print`, `echo` and destructuring.
    pub fn is_before_structural_element(tokens: &Tokens, index: usize) -> Result<bool> {
        let comment = Self::ensure_comment(tokens, index)?;
        let Some(next) = Self::next_code_index(tokens, index)? else {
            return Ok(false);
        };
        if tokens[next].is_kind(TokenKind::CloseCurly) {
            return Ok(false);
        }

        Ok(Self::is_declaration(tokens, next)
            || Self::is_documented_control(tokens, comment, next)?
            || Self::is_assigned_variable(tokens, next)
            || Self::is_documented_assignment(tokens, comment, next)
            || tokens[next].is_kind(TokenKind::UseTrait))
    }

    /// Whether a `return` statement directly follows the comment at `index`.
    pub fn is_before_return(tokens: &Tokens, index: usize) -> Result<bool> {
        Self::ensure_comment(tokens, index)?;
        let next = Self::next_code_index(tokens, index)?;
        Ok(next.is_some_and(|i| tokens[i].is_kind(TokenKind::Return)))
    }

    /// Next meaningful index, stepping over attributes and opening parentheses.
    fn next_code_index(tokens: &Tokens, index: usize) -> Result<Option<usize>> {
        let mut next = tokens.get_next_meaningful_token(index);
        loop {
            while let Some(attribute) = next.filter(|&i| tokens[i].is_kind(TokenKind::Attribute)) {
                let end = tokens.find_block_end(BlockType::Attribute, attribute)?;
                next = tokens.get_next_meaningful_token(end);
            }
            match next {
                Some(i) if tokens[i].is_kind(TokenKind::OpenParen) => {
                    next = tokens.get_next_meaningful_token(i);
                }
                _ => return Ok(next),
            }
        }
    }

    fn is_declaration(tokens: &Tokens, index: usize) -> bool {
        let token = &tokens[index];
        if token.is_classy() || token.is_any_kind(DECLARATION_KINDS) {
            return true;
        }
        match token.kind() {
            // enum case, not switch case
            TokenKind::Case => tokens
                .get_prev_token_of_kind(index, &[TokenKind::Enum, TokenKind::Switch])
                .is_some_and(|i| tokens[i].is_kind(TokenKind::Enum)),
            TokenKind::Static => {
                tokens.get_next_meaningful_token(index).map(|i| tokens[i].kind())
                    != Some(TokenKind::DoubleColon)
            }
            _ => false,
        }
    }

    fn is_documented_control(tokens: &Tokens, comment: &Token, index: usize) -> Result<bool> {
        if !tokens[index].is_any_kind(CONTROL_KINDS) {
            return Ok(false);
        }
        let Some(open) = tokens
            .get_next_meaningful_token(index)
            .filter(|&i| tokens[i].is_kind(TokenKind::OpenParen))
        else {
            return Ok(false);
        };
        let close = tokens.find_block_end(BlockType::Parenthesis, open)?;
        Ok(names_variable_in(tokens, comment, open + 1, close))
    }

    fn is_assigned_variable(tokens: &Tokens, index: usize) -> bool {
        tokens[index].is_kind(TokenKind::Variable)
            && tokens
                .get_next_meaningful_token(index)
                .is_some_and(|i| tokens[i].is_kind(TokenKind::Equals))
    }

    fn is_documented_assignment(tokens: &Tokens, comment: &Token, index: usize) -> bool {
        let end_kind = match tokens[index].kind() {
            TokenKind::List | TokenKind::Print | TokenKind::Echo => TokenKind::CloseParen,
            TokenKind::DestructuringSquareBraceOpen => TokenKind::DestructuringSquareBraceClose,
            _ => return false,
        };
        let end = tokens
            .get_next_token_of_kind(index, &[end_kind])
            .unwrap_or(tokens.len());
        names_variable_in(tokens, comment, index + 1, end)
    }
}

fn names_variable_in(tokens: &Tokens, comment: &Token, start: usize, end: usize) -> bool {
    (start..end).any(|i| {
        tokens[i].is_kind(TokenKind::Variable) && comment.text().contains(tokens[i].text())
    })
}

/// `\r\n` counts once, lone `\r` and `\n` count once each.
fn line_break_count(text: &str) -> usize {
    text.replace("\r\n", "\n").chars().filter(|&c| c == '\n' || c == '\r').count()
}
