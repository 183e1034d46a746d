//! Casing fixers for PHP code

mod lowercase_keywords;

pub use lowercase_keywords::LowercaseKeywordsFixer;
