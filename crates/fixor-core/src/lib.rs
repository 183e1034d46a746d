//! fixor-core: token stream for PHP source rewriting
//!
//! This crate provides:
//! - `lexer::tokenize`: a lossless PHP lexer
//! - `Token` / `TokenKind`: one lexical unit and its kind tag
//! - `Tokens`: a mutable token stream with block matching and navigation
//! - `transformers`: passes that refine lexer kinds into contextual kinds
//! - `analyzers`: comment, switch and case-structure queries

pub mod analyzers;
mod block;
mod error;
pub mod kind;
pub mod lexer;
mod token;
mod tokens;
pub mod transformers;

pub use block::{BlockEdge, BlockType};
pub use error::{Result, TokenError};
pub use kind::TokenKind;
pub use token::Token;
pub use tokens::{Direction, Tokens};
