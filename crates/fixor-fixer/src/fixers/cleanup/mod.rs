//! Cleanup fixers
//!
//! These fixers drop tokens that carry no meaning: empty statements and
//! trailing list commas.

mod no_empty_statement;
mod no_trailing_comma_in_list_call;

pub use no_empty_statement::NoEmptyStatementFixer;
pub use no_trailing_comma_in_list_call::NoTrailingCommaInListCallFixer;
