//! Whitespace settings and rule presets

mod presets;
mod whitespace;

pub use presets::{get_preset_options, get_preset_rules, Preset};
pub use whitespace::{IndentStyle, LineEnding, WhitespaceConfig};
