//! Syntax fixers
//!
//! Fixers that pick between equivalent spellings of the same construct.

mod empty_loop_body;

pub use empty_loop_body::EmptyLoopBodyFixer;
