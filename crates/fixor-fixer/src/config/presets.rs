//! Rule presets
//!
//! Each preset is a list of fixer names, optionally with option overrides.
//! Larger presets extend smaller ones the way PHP-CS-Fixer's rule sets do.

use std::collections::HashMap;

use crate::fixers::ConfigValue;

/// Named rule sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Psr2,
    Psr12,
    Symfony,
    PhpCsFixer,
}

impl Preset {
    pub const ALL: [Preset; 4] = [Preset::Psr2, Preset::Psr12, Preset::Symfony, Preset::PhpCsFixer];

    /// Look a preset up by name. The leading `@` and case are optional.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.strip_prefix('@').unwrap_or(name);
        match name.to_ascii_lowercase().as_str() {
            "psr2" => Some(Preset::Psr2),
            "psr12" => Some(Preset::Psr12),
            "symfony" => Some(Preset::Symfony),
            "phpcsfixer" => Some(Preset::PhpCsFixer),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Psr2 => "@PSR2",
            Preset::Psr12 => "@PSR12",
            Preset::Symfony => "@Symfony",
            Preset::PhpCsFixer => "@PhpCsFixer",
        }
    }

    /// Fixer names enabled by this preset
    pub fn rules(&self) -> Vec<&'static str> {
        let mut rules = match self {
            Preset::Psr2 => Vec::new(),
            Preset::Psr12 => Preset::Psr2.rules(),
            Preset::Symfony => Preset::Psr12.rules(),
            Preset::PhpCsFixer => Preset::Symfony.rules(),
        };
        rules.extend_from_slice(match self {
            Preset::Psr2 => PSR2_RULES,
            Preset::Psr12 => PSR12_RULES,
            Preset::Symfony => SYMFONY_RULES,
            Preset::PhpCsFixer => &[],
        });
        rules
    }

    /// Option overrides keyed by fixer name
    pub fn options(&self) -> HashMap<String, HashMap<String, ConfigValue>> {
        let mut options: HashMap<String, HashMap<String, ConfigValue>> = HashMap::new();
        if *self == Preset::PhpCsFixer {
            options
                .entry("no_unneeded_braces".to_string())
                .or_default()
                .insert("namespaces".to_string(), ConfigValue::Bool(true));
        }
        options
    }
}

const PSR2_RULES: &[&str] = &[
    "lowercase_keywords",
    "no_trailing_whitespace",
    "switch_case_semicolon_to_colon",
];

const PSR12_RULES: &[&str] = &["no_leading_import_slash"];

const SYMFONY_RULES: &[&str] = &[
    "empty_loop_body",
    "no_empty_statement",
    "no_singleline_whitespace_before_semicolons",
    "no_trailing_comma_in_list_call",
    "no_unneeded_braces",
    "single_line_comment_spacing",
];

/// Rules of the named preset, empty when the name is unknown
pub fn get_preset_rules(name: &str) -> Vec<&'static str> {
    Preset::from_name(name).map(|p| p.rules()).unwrap_or_default()
}

/// Option overrides of the named preset, empty when the name is unknown
pub fn get_preset_options(name: &str) -> HashMap<String, HashMap<String, ConfigValue>> {
    Preset::from_name(name).map(|p| p.options()).unwrap_or_default()
}
