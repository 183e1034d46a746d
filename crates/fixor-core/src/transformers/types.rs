use super::{prev_meaningful_kind, Transformer};
use crate::block::BlockType;
use crate::error::Result;
use crate::kind::TokenKind;
use crate::tokens::Tokens;

/// Return-type colons and enum backing-type colons
pub struct TypeColonTransformer;

impl Transformer for TypeColonTransformer {
    fn name(&self) -> &'static str {
        "type_colon"
    }

    fn custom_kinds(&self) -> &'static [TokenKind] {
        &[TokenKind::TypeColon]
    }

    fn process(&self, tokens: &mut Tokens, index: usize) -> Result<()> {
        if !tokens.at(index)?.is_kind(TokenKind::Colon) {
            return Ok(());
        }
        let Some(end) = tokens.get_prev_meaningful_token(index) else {
            return Ok(());
        };

        // enum Suit: string
        if prev_meaningful_kind(tokens, end) == Some(TokenKind::Enum) {
            return tokens.set_kind(index, TokenKind::TypeColon);
        }
        if !tokens[end].is_kind(TokenKind::CloseParen) {
            return Ok(());
        }

        let start = tokens.find_block_start(BlockType::Parenthesis, end)?;
        let mut owner = tokens.get_prev_meaningful_token(start);
        // skip the function name, then a by-reference marker
        for skip in [TokenKind::Identifier, TokenKind::ReturnRef] {
            if owner.is_some_and(|i| tokens[i].is_kind(skip)) {
                owner = owner.and_then(|i| tokens.get_prev_meaningful_token(i));
            }
        }
        let is_signature = owner.is_some_and(|i| {
            tokens[i].is_any_kind(&[TokenKind::Function, TokenKind::Fn, TokenKind::UseLambda])
        });
        if is_signature {
            tokens.set_kind(index, TokenKind::TypeColon)?;
        }
        Ok(())
    }
}

/// `?` in front of a type
pub struct NullableTypeTransformer;

impl Transformer for NullableTypeTransformer {
    fn name(&self) -> &'static str {
        "nullable_type"
    }

    fn custom_kinds(&self) -> &'static [TokenKind] {
        &[TokenKind::NullableType]
    }

    fn process(&self, tokens: &mut Tokens, index: usize) -> Result<()> {
        use TokenKind::*;

        if !tokens.at(index)?.is_kind(Question) {
            return Ok(());
        }
        let in_type_position = matches!(
            prev_meaningful_kind(tokens, index),
            Some(
                OpenParen
                    | Comma
                    | TypeColon
                    | AttributeClose
                    | Private
                    | Protected
                    | Public
                    | Var
                    | Static
                    | Const
                    | Abstract
                    | Final
                    | Readonly
            )
        );
        if in_type_position {
            tokens.set_kind(index, NullableType)?;
        }
        Ok(())
    }
}

/// Tokens that may make up one member of a union type
const TYPE_WORDS: &[TokenKind] = &[
    TokenKind::Identifier,
    TokenKind::NsSeparator,
    TokenKind::Array,
    TokenKind::ArrayTypehint,
    TokenKind::Callable,
    TokenKind::Static,
    TokenKind::NullableType,
    TokenKind::Pipe,
    TokenKind::TypeAlternation,
];

/// `|` between the members of a union type
pub struct TypeAlternationTransformer;

impl TypeAlternationTransformer {
    fn skip_type(tokens: &Tokens, index: usize, forward: bool) -> Option<usize> {
        let is_type_part =
            |t: &crate::token::Token| t.is_any_kind(TYPE_WORDS) || !t.is_meaningful();
        if forward {
            tokens.get_next_token_matching(index, |t| !is_type_part(t))
        } else {
            tokens.get_prev_token_matching(index, |t| !is_type_part(t))
        }
    }

    fn is_part_of_type(tokens: &Tokens, index: usize) -> bool {
        use TokenKind::*;

        let Some(before) = Self::skip_type(tokens, index, false) else {
            return false;
        };
        match tokens[before].kind() {
            TypeColon => return true,
            Const | OpenParen | Comma | AttributeClose | Public | Protected | Private | Var
            | Readonly => {}
            _ => return false,
        }

        let Some(after) = Self::skip_type(tokens, index, true) else {
            return false;
        };
        if tokens[before].is_kind(Const) {
            // the constant name is swallowed by the type run: `const int|string X = ...`
            return tokens[after].is_kind(Equals);
        }
        match tokens[after].kind() {
            Variable | Ellipsis => true,
            // `&` is a by-reference parameter only when a variable follows
            Ampersand => tokens
                .get_next_meaningful_token(after)
                .is_some_and(|i| tokens[i].is_any_kind(&[Variable, Ellipsis])),
            _ => false,
        }
    }
}

impl Transformer for TypeAlternationTransformer {
    fn name(&self) -> &'static str {
        "type_alternation"
    }

    fn custom_kinds(&self) -> &'static [TokenKind] {
        &[TokenKind::TypeAlternation]
    }

    fn process(&self, tokens: &mut Tokens, index: usize) -> Result<()> {
        if tokens.at(index)?.is_kind(TokenKind::Pipe) && Self::is_part_of_type(tokens, index) {
            tokens.set_kind(index, TokenKind::TypeAlternation)?;
        }
        Ok(())
    }
}
