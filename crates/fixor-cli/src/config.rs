//! Configuration file support for fixor
//!
//! Loads `.fixor.toml` from current directory or parent directories.

use anyhow::{bail, Context, Result};
use fixor_fixer::{ConfigValue, Preset, WhitespaceConfig};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Config file name searched for in the working directory and its parents
pub const CONFIG_FILE: &str = ".fixor.toml";

/// Preset used when neither the command line nor the config picks rules
pub const DEFAULT_PRESET: &str = "@PSR12";

/// Configuration file structure
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fixer: FixerSection,
    pub whitespace: WhitespaceConfig,
    pub paths: PathsConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FixerSection {
    /// Preset to start from (`@PSR2`, `@PSR12`, `@Symfony`, `@PhpCsFixer`)
    pub preset: Option<String>,
    /// Rules added on top of the preset
    pub rules: Vec<String>,
    /// Rules removed after preset and additions
    pub exclude_rules: Vec<String>,
    /// Allow risky fixers
    pub risky: bool,
    pub max_passes: Option<usize>,
    /// Per-fixer options, keyed by fixer name
    pub options: HashMap<String, HashMap<String, ConfigValue>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Glob patterns to exclude from processing
    pub exclude: Vec<String>,
}

impl Config {
    /// Load config from `.fixor.toml` searching from current directory upward
    pub fn load() -> Result<Option<(Config, PathBuf)>> {
        Self::load_from(std::env::current_dir()?)
    }

    /// Load config searching from the given directory upward
    pub fn load_from(start_dir: PathBuf) -> Result<Option<(Config, PathBuf)>> {
        let mut current = Some(start_dir.as_path());

        while let Some(dir) = current {
            let config_path = dir.join(CONFIG_FILE);
            if config_path.exists() {
                let config = Self::load_path(&config_path)?;
                return Ok(Some((config, config_path)));
            }
            current = dir.parent();
        }

        Ok(None)
    }

    /// Load config from a specific path
    pub fn load_path(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// The preset in effect: command line first, then the config file.
    ///
    /// Falls back to [`DEFAULT_PRESET`] only when no rules are listed at all.
    pub fn effective_preset(&self, cli_preset: Option<&str>) -> Result<Option<Preset>> {
        let name = match (cli_preset, &self.fixer.preset) {
            (Some(name), _) => name,
            (None, Some(name)) => name.as_str(),
            (None, None) if self.fixer.rules.is_empty() => DEFAULT_PRESET,
            (None, None) => return Ok(None),
        };
        match Preset::from_name(name) {
            Some(preset) => Ok(Some(preset)),
            None => bail!(
                "Unknown preset '{}'. Valid presets: {}",
                name,
                Preset::ALL.map(|p| p.name()).join(", ")
            ),
        }
    }

    /// Compute the ordered list of enabled rules
    pub fn effective_rules(&self, cli_rules: &[String], preset: Option<Preset>) -> Vec<String> {
        // CLI rules override config completely
        if !cli_rules.is_empty() {
            return dedup(cli_rules.iter().cloned());
        }

        let from_preset = preset.map(|p| p.rules()).unwrap_or_default();
        let rules = from_preset
            .into_iter()
            .map(str::to_string)
            .chain(self.fixer.rules.iter().cloned())
            .filter(|rule| !self.fixer.exclude_rules.contains(rule));
        dedup(rules)
    }

    /// Preset options overlaid with the options from the config file
    pub fn effective_options(
        &self,
        preset: Option<Preset>,
    ) -> HashMap<String, HashMap<String, ConfigValue>> {
        let mut options = preset.map(|p| p.options()).unwrap_or_default();
        for (fixer, values) in &self.fixer.options {
            options
                .entry(fixer.clone())
                .or_default()
                .extend(values.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        options
    }

    /// Check if a path should be excluded based on config patterns
    pub fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.paths.exclude {
            if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
                if glob_pattern.matches(&path_str) {
                    return true;
                }
                // Also try matching against just the file/dir name
                if let Some(file_name) = path.file_name() {
                    if glob_pattern.matches(&file_name.to_string_lossy()) {
                        return true;
                    }
                }
            }

            // Directory patterns match anywhere in the path
            if pattern.ends_with('/') {
                let dir_pattern = pattern.trim_end_matches('/');
                if path_str.contains(&format!("/{}/", dir_pattern))
                    || path_str.starts_with(&format!("{}/", dir_pattern))
                {
                    return true;
                }
            }
        }

        false
    }
}

fn dedup(rules: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = Vec::new();
    for rule in rules {
        if !seen.contains(&rule) {
            seen.push(rule);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixor_fixer::{IndentStyle, LineEnding};
    use std::fs;
    use tempfile::TempDir;

    fn create_config(dir: &Path, content: &str) {
        fs::write(dir.join(CONFIG_FILE), content).unwrap();
    }

    #[test]
    fn test_load_full_config() {
        let temp = TempDir::new().unwrap();
        create_config(
            temp.path(),
            r#"
[fixer]
preset = "@Symfony"
rules = ["no_unneeded_braces"]
exclude_rules = ["lowercase_keywords"]
risky = true
max_passes = 5

[fixer.options.no_unneeded_braces]
namespaces = true

[fixer.options.empty_loop_body]
style = "braces"

[whitespace]
indent = "\t"
line_ending = "\r\n"

[paths]
exclude = ["vendor/", "*.generated.php"]
"#,
        );

        let (config, path) = Config::load_from(temp.path().to_path_buf())
            .unwrap()
            .unwrap();

        assert_eq!(path, temp.path().join(CONFIG_FILE));
        assert_eq!(config.fixer.preset.as_deref(), Some("@Symfony"));
        assert_eq!(config.fixer.rules, vec!["no_unneeded_braces".to_string()]);
        assert!(config.fixer.risky);
        assert_eq!(config.fixer.max_passes, Some(5));
        assert_eq!(
            config.fixer.options["no_unneeded_braces"]["namespaces"],
            ConfigValue::Bool(true)
        );
        assert_eq!(
            config.fixer.options["empty_loop_body"]["style"],
            ConfigValue::String("braces".to_string())
        );
        assert_eq!(config.whitespace.indent, IndentStyle::Tabs);
        assert_eq!(config.whitespace.line_ending, LineEnding::CrLf);
        assert_eq!(config.paths.exclude.len(), 2);
    }

    #[test]
    fn test_load_from_parent_directory() {
        let temp = TempDir::new().unwrap();
        create_config(temp.path(), "[fixer]\nrules = [\"no_trailing_whitespace\"]\n");
        let nested = temp.path().join("src/App");
        fs::create_dir_all(&nested).unwrap();

        let (config, path) = Config::load_from(nested).unwrap().unwrap();
        assert_eq!(path, temp.path().join(CONFIG_FILE));
        assert_eq!(config.fixer.rules, vec!["no_trailing_whitespace".to_string()]);
    }

    #[test]
    fn test_load_empty_config() {
        let temp = TempDir::new().unwrap();
        create_config(temp.path(), "");

        let (config, _) = Config::load_from(temp.path().to_path_buf())
            .unwrap()
            .unwrap();

        assert!(config.fixer.preset.is_none());
        assert!(config.fixer.rules.is_empty());
        assert_eq!(config.whitespace, WhitespaceConfig::default());
    }

    #[test]
    fn test_invalid_indent_is_rejected() {
        let temp = TempDir::new().unwrap();
        create_config(temp.path(), "[whitespace]\nindent = \"x\"\n");
        assert!(Config::load_from(temp.path().to_path_buf()).is_err());
    }

    #[test]
    fn test_effective_preset() {
        let config = Config::default();
        assert_eq!(config.effective_preset(None).unwrap(), Some(Preset::Psr12));
        assert_eq!(config.effective_preset(Some("symfony")).unwrap(), Some(Preset::Symfony));
        assert!(config.effective_preset(Some("@Nope")).is_err());

        let only_rules = Config {
            fixer: FixerSection {
                rules: vec!["no_trailing_whitespace".to_string()],
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(only_rules.effective_preset(None).unwrap(), None);
    }

    #[test]
    fn test_effective_rules_cli_override() {
        let config = Config::default();
        let cli_rules = vec!["no_empty_statement".to_string(), "no_empty_statement".to_string()];

        let effective = config.effective_rules(&cli_rules, Some(Preset::Symfony));
        assert_eq!(effective, vec!["no_empty_statement".to_string()]);
    }

    #[test]
    fn test_effective_rules_with_exclusions() {
        let config = Config {
            fixer: FixerSection {
                rules: vec!["empty_loop_body".to_string(), "lowercase_keywords".to_string()],
                exclude_rules: vec!["lowercase_keywords".to_string()],
                ..Default::default()
            },
            ..Default::default()
        };

        let effective = config.effective_rules(&[], Some(Preset::Psr2));
        assert_eq!(
            effective,
            vec![
                "no_trailing_whitespace".to_string(),
                "switch_case_semicolon_to_colon".to_string(),
                "empty_loop_body".to_string(),
            ]
        );
    }

    #[test]
    fn test_effective_options_overlay_preset() {
        let mut overrides = HashMap::new();
        overrides.insert(
            "no_unneeded_braces".to_string(),
            HashMap::from([("namespaces".to_string(), ConfigValue::Bool(false))]),
        );
        let config = Config {
            fixer: FixerSection {
                options: overrides,
                ..Default::default()
            },
            ..Default::default()
        };

        let options = config.effective_options(Some(Preset::PhpCsFixer));
        assert_eq!(
            options["no_unneeded_braces"]["namespaces"],
            ConfigValue::Bool(false)
        );
        assert!(config.effective_options(None).contains_key("no_unneeded_braces"));
    }

    #[test]
    fn test_should_exclude_glob() {
        let config = Config {
            paths: PathsConfig {
                exclude: vec!["*.generated.php".to_string()],
            },
            ..Default::default()
        };

        assert!(config.should_exclude(Path::new("foo.generated.php")));
        assert!(!config.should_exclude(Path::new("foo.php")));
    }

    #[test]
    fn test_should_exclude_directory() {
        let config = Config {
            paths: PathsConfig {
                exclude: vec!["cache/".to_string()],
            },
            ..Default::default()
        };

        assert!(config.should_exclude(Path::new("project/cache/file.php")));
        assert!(config.should_exclude(Path::new("cache/file.php")));
        assert!(!config.should_exclude(Path::new("src/cache.php")));
    }
}
