//! Errors raised by token stream operations and analyzers

use thiserror::Error;

use crate::block::{BlockEdge, BlockType};

/// Errors that can occur while querying or mutating a token stream
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Index {index} out of range for a stream of {len} tokens")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Token at index {index} is not the {edge} token of a {block_type} block")]
    BlockMismatch {
        index: usize,
        block_type: BlockType,
        edge: BlockEdge,
    },

    #[error("Unbalanced {block_type} block at index {index}")]
    UnbalancedBlock { index: usize, block_type: BlockType },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Malformed structure at index {index}: {message}")]
    MalformedStructure { index: usize, message: String },
}

pub type Result<T> = std::result::Result<T, TokenError>;
