//! Passes that refine lexer kinds into contextual kinds
//!
//! Transformers run once, in a fixed order, right after lexing. Each one
//! visits every index front to back and may only retag tokens: the token
//! count and every token text stay as they are. When a pass cannot tell what
//! a token is, the token keeps its lexer kind.

mod attribute;
mod braces;
mod keywords;
mod types;
mod calls;

pub use attribute::AttributeTransformer;
pub use braces::{BraceClassInstantiationTransformer, CurlyBraceTransformer, SquareBraceTransformer};
pub use calls::{FirstClassCallableTransformer, NamedArgumentTransformer};
pub use keywords::{
    ArrayTypehintTransformer, ClassConstantTransformer, ImportTransformer,
    NamespaceOperatorTransformer, ReturnRefTransformer, UseTransformer,
};
pub use types::{NullableTypeTransformer, TypeAlternationTransformer, TypeColonTransformer};

use crate::error::Result;
use crate::kind::TokenKind;
use crate::tokens::Tokens;

/// A retagging pass over a freshly lexed stream
pub trait Transformer: Send + Sync {
    fn name(&self) -> &'static str;

    /// Synthesized kinds this pass may assign
    fn custom_kinds(&self) -> &'static [TokenKind];

    /// Inspect the token at `index` and retag it (and its partners) if needed.
    fn process(&self, tokens: &mut Tokens, index: usize) -> Result<()>;
}

/// Every transformer in execution order
pub fn all() -> Vec<Box<dyn Transformer>> {
    vec![
        Box::new(AttributeTransformer),
        Box::new(CurlyBraceTransformer),
        Box::new(ClassConstantTransformer),
        Box::new(ImportTransformer),
        Box::new(UseTransformer),
        Box::new(NamespaceOperatorTransformer),
        Box::new(ReturnRefTransformer),
        Box::new(BraceClassInstantiationTransformer),
        Box::new(SquareBraceTransformer),
        Box::new(TypeColonTransformer),
        Box::new(NullableTypeTransformer),
        Box::new(TypeAlternationTransformer),
        Box::new(ArrayTypehintTransformer),
        Box::new(NamedArgumentTransformer),
        Box::new(FirstClassCallableTransformer),
    ]
}

/// Run every transformer over `tokens`.
pub fn transform(tokens: &mut Tokens) {
    for transformer in all() {
        run(transformer.as_ref(), tokens);
    }
}

/// Run a single transformer over every index of `tokens` and return how
/// many tokens it retagged.
pub fn run(transformer: &dyn Transformer, tokens: &mut Tokens) -> usize {
    let before: Vec<TokenKind> = tokens.iter().map(|t| t.kind()).collect();
    for index in 0..tokens.len() {
        if let Err(err) = transformer.process(tokens, index) {
            tracing::debug!(
                transformer = transformer.name(),
                index,
                error = %err,
                "token left at its lexer kind"
            );
        }
    }

    let retagged = before
        .iter()
        .zip(tokens.iter())
        .filter(|(kind, token)| **kind != token.kind())
        .count();
    if retagged > 0 {
        tracing::debug!(transformer = transformer.name(), retagged, "transformer pass");
    }
    retagged
}

fn prev_meaningful_kind(tokens: &Tokens, index: usize) -> Option<TokenKind> {
    tokens
        .get_prev_meaningful_token(index)
        .map(|i| tokens[i].kind())
}

fn next_meaningful_kind(tokens: &Tokens, index: usize) -> Option<TokenKind> {
    tokens
        .get_next_meaningful_token(index)
        .map(|i| tokens[i].kind())
}
