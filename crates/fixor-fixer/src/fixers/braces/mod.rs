//! Brace and control structure fixers
//!
//! These fixers remove needless blocks and normalize `switch` labels.

mod no_unneeded_braces;
mod switch_case_semicolon_to_colon;

pub use no_unneeded_braces::NoUnneededBracesFixer;
pub use switch_case_semicolon_to_colon::SwitchCaseSemicolonToColonFixer;
