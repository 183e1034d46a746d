//! Fixer implementations for PHP-CS-Fixer compatibility
//!
//! Each fixer edits a [`Tokens`] stream in place. Fixers never see each
//! other; ordering and convergence are the pipeline's job.

mod registry;
pub mod braces;
pub mod casing;
pub mod cleanup;
pub mod comments;
pub mod imports;
pub mod syntax;
pub mod whitespace;

pub use registry::{FixerInfo, FixerRegistry};

use std::collections::HashMap;
use std::fmt;

use fixor_core::Tokens;
use serde::{Deserialize, Serialize};

use crate::config::WhitespaceConfig;
use crate::error::FixError;

/// Configuration passed to a fixer
///
/// `options` holds the fixer's resolved options: every declared option is
/// present, defaults filled in.
#[derive(Debug, Clone, Default)]
pub struct FixerConfig {
    pub whitespace: WhitespaceConfig,
    pub options: HashMap<String, ConfigValue>,
}

impl FixerConfig {
    pub fn new(whitespace: WhitespaceConfig) -> Self {
        Self {
            whitespace,
            options: HashMap::new(),
        }
    }

    pub fn with_option(mut self, name: &str, value: ConfigValue) -> Self {
        self.options.insert(name.to_string(), value);
        self
    }

    /// Value of a bool option, false when absent
    pub fn bool_option(&self, name: &str) -> bool {
        matches!(self.options.get(name), Some(ConfigValue::Bool(true)))
    }

    pub fn str_option(&self, name: &str) -> Option<&str> {
        match self.options.get(name) {
            Some(ConfigValue::String(s)) => Some(s),
            _ => None,
        }
    }
}

/// A fixer option value as written in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Number(i64),
    String(String),
    StringArray(Vec<String>),
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Bool(b) => write!(f, "{b}"),
            ConfigValue::Number(n) => write!(f, "{n}"),
            ConfigValue::String(s) => write!(f, "'{s}'"),
            ConfigValue::StringArray(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

/// Accepted type of a fixer option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    Bool,
    String,
    Number,
    StringArray,
    /// A string restricted to the listed values
    Enum(&'static [&'static str]),
}

impl OptionType {
    fn accepts(&self, value: &ConfigValue) -> bool {
        match (self, value) {
            (OptionType::Bool, ConfigValue::Bool(_))
            | (OptionType::String, ConfigValue::String(_))
            | (OptionType::Number, ConfigValue::Number(_))
            | (OptionType::StringArray, ConfigValue::StringArray(_)) => true,
            (OptionType::Enum(allowed), ConfigValue::String(s)) => allowed.contains(&s.as_str()),
            _ => false,
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Bool => f.write_str("bool"),
            OptionType::String => f.write_str("string"),
            OptionType::Number => f.write_str("number"),
            OptionType::StringArray => f.write_str("string[]"),
            OptionType::Enum(allowed) => write!(f, "one of {}", allowed.join(", ")),
        }
    }
}

/// A configurable option declared by a fixer
#[derive(Debug, Clone)]
pub struct FixerOption {
    pub name: &'static str,
    pub description: &'static str,
    pub option_type: OptionType,
    pub default: ConfigValue,
}

/// Check `given` against the options a fixer declares and fill in defaults.
///
/// Unknown names, mistyped values and values outside an enum are rejected.
pub fn resolve_options(
    fixer: &str,
    declared: &[FixerOption],
    given: &HashMap<String, ConfigValue>,
) -> Result<HashMap<String, ConfigValue>, FixError> {
    let invalid = |option: &str, message: String| FixError::InvalidOption {
        fixer: fixer.to_string(),
        option: option.to_string(),
        message,
    };

    if let Some(unknown) = given
        .keys()
        .filter(|name| !declared.iter().any(|o| o.name == name.as_str()))
        .min()
    {
        let expected = if declared.is_empty() {
            "the fixer has no options".to_string()
        } else {
            let names: Vec<_> = declared.iter().map(|o| o.name).collect();
            format!("expected one of {}", names.join(", "))
        };
        return Err(invalid(unknown, format!("unknown option, {expected}")));
    }

    let mut resolved = HashMap::with_capacity(declared.len());
    for option in declared {
        let value = match given.get(option.name) {
            Some(value) if option.option_type.accepts(value) => value.clone(),
            Some(value) => {
                return Err(invalid(
                    option.name,
                    format!("expected {}, got {value}", option.option_type),
                ))
            }
            None => option.default.clone(),
        };
        resolved.insert(option.name.to_string(), value);
    }
    Ok(resolved)
}

/// A formatting fixer working on a token stream
///
/// Priorities follow PHP-CS-Fixer: higher runs first.
/// - 40: brace and statement removal that other fixers rely on
/// - 39..1: structural rewrites
/// - 0: the bulk of formatting fixers
/// - negative: import cleanup that must see the final statements
pub trait Fixer: Send + Sync {
    /// Configuration name, e.g. `no_unneeded_braces`
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn priority(&self) -> i32;

    /// Whether the fix may change behaviour of the code
    fn is_risky(&self) -> bool;

    fn options(&self) -> Vec<FixerOption>;

    /// Cheap pre-check, usually a kind lookup
    fn is_candidate(&self, tokens: &Tokens) -> bool;

    /// Rewrite `tokens` in place.
    ///
    /// `config.options` has already been through [`resolve_options`].
    fn apply(&self, tokens: &mut Tokens, config: &FixerConfig) -> fixor_core::Result<()>;
}
