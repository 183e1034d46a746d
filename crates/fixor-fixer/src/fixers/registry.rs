//! Fixer registry for managing available fixers
//!
//! The registry is the catalog of built-in fixers. It looks them up by name
//! and assembles a [`FixerPipeline`] from a selection of rule names.

use std::collections::HashMap;
use std::sync::Arc;

use super::braces::{NoUnneededBracesFixer, SwitchCaseSemicolonToColonFixer};
use super::casing::LowercaseKeywordsFixer;
use super::cleanup::{NoEmptyStatementFixer, NoTrailingCommaInListCallFixer};
use super::comments::SingleLineCommentSpacingFixer;
use super::imports::NoLeadingImportSlashFixer;
use super::syntax::EmptyLoopBodyFixer;
use super::whitespace::{NoSinglelineWhitespaceBeforeSemicolonsFixer, TrailingWhitespaceFixer};
use super::{ConfigValue, Fixer, FixerConfig, FixerOption};
use crate::config::WhitespaceConfig;
use crate::{FixError, FixerPipeline};

/// Information about a registered fixer
#[derive(Debug, Clone)]
pub struct FixerInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub priority: i32,
    pub is_risky: bool,
    pub options: Vec<FixerOption>,
}

/// Registry of all available fixers
pub struct FixerRegistry {
    fixers: Vec<Arc<dyn Fixer>>,
    by_name: HashMap<&'static str, usize>,
}

impl FixerRegistry {
    /// Create a new registry with all built-in fixers
    pub fn new() -> Self {
        let mut registry = Self {
            fixers: Vec::new(),
            by_name: HashMap::new(),
        };

        registry.register(Arc::new(NoUnneededBracesFixer));
        registry.register(Arc::new(SwitchCaseSemicolonToColonFixer));
        registry.register(Arc::new(LowercaseKeywordsFixer));
        registry.register(Arc::new(NoEmptyStatementFixer));
        registry.register(Arc::new(NoTrailingCommaInListCallFixer));
        registry.register(Arc::new(SingleLineCommentSpacingFixer));
        registry.register(Arc::new(NoLeadingImportSlashFixer));
        registry.register(Arc::new(EmptyLoopBodyFixer));
        registry.register(Arc::new(NoSinglelineWhitespaceBeforeSemicolonsFixer));
        registry.register(Arc::new(TrailingWhitespaceFixer));

        // Sort by priority (descending - higher priority runs first)
        registry.fixers.sort_by(|a, b| b.priority().cmp(&a.priority()));

        // Rebuild indices after sorting
        registry.by_name.clear();
        for (idx, fixer) in registry.fixers.iter().enumerate() {
            registry.by_name.insert(fixer.name(), idx);
        }

        registry
    }

    fn register(&mut self, fixer: Arc<dyn Fixer>) {
        let idx = self.fixers.len();
        self.by_name.insert(fixer.name(), idx);
        self.fixers.push(fixer);
    }

    /// Get a fixer by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Fixer>> {
        self.by_name.get(name).map(|&idx| Arc::clone(&self.fixers[idx]))
    }

    /// Get all fixers in priority order
    pub fn all(&self) -> &[Arc<dyn Fixer>] {
        &self.fixers
    }

    /// Get information about all fixers
    pub fn list(&self) -> Vec<FixerInfo> {
        self.fixers
            .iter()
            .map(|f| FixerInfo {
                name: f.name(),
                description: f.description(),
                priority: f.priority(),
                is_risky: f.is_risky(),
                options: f.options(),
            })
            .collect()
    }

    /// Build a pipeline from rule names.
    ///
    /// Unknown names fail with [`FixError::UnknownFixer`]; risky fixers are
    /// skipped unless `allow_risky` is set. Options are validated per fixer.
    pub fn build_pipeline(
        &self,
        names: &[String],
        options: &HashMap<String, HashMap<String, ConfigValue>>,
        whitespace: &WhitespaceConfig,
        allow_risky: bool,
        max_passes: usize,
    ) -> Result<FixerPipeline, FixError> {
        let mut pipeline = FixerPipeline::new().with_max_passes(max_passes);

        for name in names {
            let fixer = self
                .get(name)
                .ok_or_else(|| FixError::UnknownFixer(name.clone()))?;
            if fixer.is_risky() && !allow_risky {
                tracing::warn!(fixer = %name, "skipping risky fixer");
                continue;
            }
            if pipeline.fixer_names().contains(&fixer.name()) {
                continue;
            }

            let mut config = FixerConfig::new(whitespace.clone());
            if let Some(given) = options.get(name) {
                config.options = given.clone();
            }
            pipeline.add(fixer, config)?;
        }

        Ok(pipeline)
    }

    /// Number of registered fixers
    pub fn len(&self) -> usize {
        self.fixers.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.fixers.is_empty()
    }
}

impl Default for FixerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
