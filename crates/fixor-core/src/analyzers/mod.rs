//! Read-only structural queries over a token stream

mod comments;
mod control_case;
mod switch;

pub use comments::CommentsAnalyzer;
pub use control_case::{
    CaseAnalysis, ControlCaseStructure, ControlCaseStructuresAnalyzer, DefaultAnalysis,
    CASE_STRUCTURE_KINDS,
};
pub use switch::SwitchAnalyzer;
