use super::Transformer;
use crate::error::Result;
use crate::kind::TokenKind;
use crate::tokens::Tokens;

const OPENERS: &[TokenKind] = &[
    TokenKind::Attribute,
    TokenKind::OpenBracket,
    TokenKind::ArraySquareBraceOpen,
    TokenKind::DestructuringSquareBraceOpen,
];

const CLOSERS: &[TokenKind] = &[
    TokenKind::AttributeClose,
    TokenKind::CloseBracket,
    TokenKind::ArraySquareBraceClose,
    TokenKind::DestructuringSquareBraceClose,
];

/// Marks the `]` that closes `#[`.
pub struct AttributeTransformer;

impl Transformer for AttributeTransformer {
    fn name(&self) -> &'static str {
        "attribute"
    }

    fn custom_kinds(&self) -> &'static [TokenKind] {
        &[TokenKind::AttributeClose]
    }

    fn process(&self, tokens: &mut Tokens, index: usize) -> Result<()> {
        if !tokens.at(index)?.is_kind(TokenKind::Attribute) {
            return Ok(());
        }

        let mut depth = 0usize;
        for i in index..tokens.len() {
            let token = &tokens[i];
            if token.is_any_kind(OPENERS) {
                depth += 1;
            } else if token.is_any_kind(CLOSERS) {
                depth -= 1;
                if depth == 0 {
                    return tokens.set_kind(i, TokenKind::AttributeClose);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockType;

    #[test]
    fn test_attribute_close() {
        let tokens = Tokens::from_code("<?php #[Foo([1, 2]), Bar] function a() {}");
        let close = tokens
            .iter()
            .position(|t| t.is_kind(TokenKind::AttributeClose))
            .unwrap();
        assert_eq!(tokens[close - 1].text(), "Bar");
        assert_eq!(tokens.find_block_end(BlockType::Attribute, 1), Ok(close));
        assert_eq!(tokens.count_token_kind(TokenKind::AttributeClose), 1);
    }

    #[test]
    fn test_unterminated_attribute_is_left_alone() {
        let tokens = Tokens::from_code("<?php #[Foo(");
        assert!(!tokens.is_token_kind_found(TokenKind::AttributeClose));
    }
}
