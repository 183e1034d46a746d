use super::{next_meaningful_kind, prev_meaningful_kind, Transformer};
use crate::error::Result;
use crate::kind::TokenKind;
use crate::tokens::Tokens;

/// `foo(name: $value)`
pub struct NamedArgumentTransformer;

impl Transformer for NamedArgumentTransformer {
    fn name(&self) -> &'static str {
        "named_argument"
    }

    fn custom_kinds(&self) -> &'static [TokenKind] {
        &[TokenKind::NamedArgumentName, TokenKind::NamedArgumentColon]
    }

    fn process(&self, tokens: &mut Tokens, index: usize) -> Result<()> {
        if !tokens.at(index)?.is_kind(TokenKind::Colon) {
            return Ok(());
        }
        let Some(name) = tokens.get_prev_meaningful_token(index) else {
            return Ok(());
        };
        if !tokens[name].is_kind(TokenKind::Identifier) {
            return Ok(());
        }
        // Anything else in front is a goto label, a ternary or a case label.
        if !matches!(
            prev_meaningful_kind(tokens, name),
            Some(TokenKind::Comma | TokenKind::OpenParen)
        ) {
            return Ok(());
        }
        tokens.set_kind(name, TokenKind::NamedArgumentName)?;
        tokens.set_kind(index, TokenKind::NamedArgumentColon)
    }
}

/// `strlen(...)`
pub struct FirstClassCallableTransformer;

impl Transformer for FirstClassCallableTransformer {
    fn name(&self) -> &'static str {
        "first_class_callable"
    }

    fn custom_kinds(&self) -> &'static [TokenKind] {
        &[TokenKind::FirstClassCallable]
    }

    fn process(&self, tokens: &mut Tokens, index: usize) -> Result<()> {
        if tokens.at(index)?.is_kind(TokenKind::Ellipsis)
            && prev_meaningful_kind(tokens, index) == Some(TokenKind::OpenParen)
            && next_meaningful_kind(tokens, index) == Some(TokenKind::CloseParen)
        {
            tokens.set_kind(index, TokenKind::FirstClassCallable)?;
        }
        Ok(())
    }
}
