//! Indentation and line ending settings shared by all fixers

use serde::{Deserialize, Serialize};

/// Indentation unit, written in configuration files as the literal unit:
/// `"    "` for four spaces, `"\t"` for a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum IndentStyle {
    Spaces(usize),
    Tabs,
}

impl Default for IndentStyle {
    fn default() -> Self {
        IndentStyle::Spaces(4)
    }
}

impl IndentStyle {
    /// One level of indentation
    pub fn unit(&self) -> String {
        match self {
            IndentStyle::Spaces(n) => " ".repeat(*n),
            IndentStyle::Tabs => "\t".to_string(),
        }
    }

    /// Column width of one level, counting a tab as four columns
    pub fn width(&self) -> usize {
        match self {
            IndentStyle::Spaces(n) => *n,
            IndentStyle::Tabs => 4,
        }
    }

    /// Parse a configured unit. The escaped form `\t` is accepted for tabs.
    ///
    /// Mixed or empty units are rejected.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "\t" | "\\t" => Some(IndentStyle::Tabs),
            "" => None,
            _ if s.chars().all(|c| c == ' ') => Some(IndentStyle::Spaces(s.len())),
            _ => None,
        }
    }
}

impl TryFrom<String> for IndentStyle {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| {
            format!("invalid indent {value:?}: use only spaces or a single tab")
        })
    }
}

impl From<IndentStyle> for String {
    fn from(style: IndentStyle) -> Self {
        style.unit()
    }
}

/// Line ending style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    /// Parse `"\n"` or `"\r\n"`, raw or escaped.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "\n" | "\\n" => Some(LineEnding::Lf),
            "\r\n" | "\\r\\n" => Some(LineEnding::CrLf),
            _ => None,
        }
    }
}

impl TryFrom<String> for LineEnding {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid line ending {value:?}"))
    }
}

impl From<LineEnding> for String {
    fn from(ending: LineEnding) -> Self {
        ending.as_str().to_string()
    }
}

/// Combined whitespace configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct WhitespaceConfig {
    pub indent: IndentStyle,
    pub line_ending: LineEnding,
}

impl WhitespaceConfig {
    pub fn new(indent: IndentStyle, line_ending: LineEnding) -> Self {
        Self {
            indent,
            line_ending,
        }
    }

    /// 4 spaces, LF
    pub fn psr12() -> Self {
        Self::new(IndentStyle::Spaces(4), LineEnding::Lf)
    }
}
