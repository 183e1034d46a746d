use fixor_core::TokenError;
use thiserror::Error;

/// Errors raised while configuring or running fixers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FixError {
    #[error("Fixer {fixer} failed: {source}")]
    Fixer {
        fixer: String,
        #[source]
        source: TokenError,
    },

    #[error(
        "Code did not stabilize after {passes} passes; still changing: {}",
        .fixers.join(", ")
    )]
    IterationLimitExceeded { passes: usize, fixers: Vec<String> },

    #[error("Unknown fixer: {0}")]
    UnknownFixer(String),

    #[error("Invalid option '{option}' for fixer {fixer}: {message}")]
    InvalidOption {
        fixer: String,
        option: String,
        message: String,
    },
}
