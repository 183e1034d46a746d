//! Whitespace fixers for PHP code formatting
//!
//! These fixers only ever touch whitespace tokens and the blank inside
//! the opening tag.

mod no_singleline_whitespace_before_semicolons;
mod trailing_whitespace;

pub use no_singleline_whitespace_before_semicolons::NoSinglelineWhitespaceBeforeSemicolonsFixer;
pub use trailing_whitespace::TrailingWhitespaceFixer;
