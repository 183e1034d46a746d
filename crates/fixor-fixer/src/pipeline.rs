//! Runs fixers over a token stream until the code stops changing

use std::sync::Arc;

use fixor_core::Tokens;
use tracing::{debug, trace, warn};

use crate::error::FixError;
use crate::fixers::{resolve_options, Fixer, FixerConfig};

/// A fixer with its resolved configuration
#[derive(Clone)]
pub struct ConfiguredFixer {
    pub fixer: Arc<dyn Fixer>,
    pub config: FixerConfig,
}

/// Outcome of [`FixerPipeline::fix_code`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixResult {
    pub code: String,
    pub changed: bool,
    /// Fixers that changed the code, in first-change order
    pub applied: Vec<String>,
    /// Passes run, including the final pass that changed nothing
    pub passes: usize,
}

/// An ordered set of fixers applied to a fixed point
///
/// Fixers run by descending priority; equal priorities keep the order they
/// were added in. A pass runs every candidate fixer once. Passes repeat
/// until one changes nothing, up to `max_passes`
/// ([`DEFAULT_MAX_PASSES`](Self::DEFAULT_MAX_PASSES) unless overridden).
#[derive(Clone)]
pub struct FixerPipeline {
    fixers: Vec<ConfiguredFixer>,
    max_passes: usize,
}

impl Default for FixerPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl FixerPipeline {
    pub const DEFAULT_MAX_PASSES: usize = 20;

    pub fn new() -> Self {
        Self {
            fixers: Vec::new(),
            max_passes: Self::DEFAULT_MAX_PASSES,
        }
    }

    /// Override the pass cap. A cap of 0 is raised to 1.
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes.max(1);
        self
    }

    pub fn max_passes(&self) -> usize {
        self.max_passes
    }

    /// Add a fixer, validating `config.options` against its declared options.
    pub fn add(&mut self, fixer: Arc<dyn Fixer>, mut config: FixerConfig) -> Result<(), FixError> {
        config.options = resolve_options(fixer.name(), &fixer.options(), &config.options)?;
        let priority = fixer.priority();
        let at = self
            .fixers
            .iter()
            .position(|f| f.fixer.priority() < priority)
            .unwrap_or(self.fixers.len());
        self.fixers.insert(at, ConfiguredFixer { fixer, config });
        Ok(())
    }

    /// Fixer names in execution order
    pub fn fixer_names(&self) -> Vec<&'static str> {
        self.fixers.iter().map(|f| f.fixer.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.fixers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixers.is_empty()
    }

    /// Tokenize `code`, run the pipeline and regenerate the source.
    pub fn fix_code(&self, code: &str) -> Result<FixResult, FixError> {
        let mut tokens = Tokens::from_code(code);
        let (applied, passes) = self.run(&mut tokens)?;
        let fixed = tokens.generate_code();
        Ok(FixResult {
            changed: fixed != code,
            code: fixed,
            applied,
            passes,
        })
    }

    /// Run all fixers on `tokens` until a pass changes nothing.
    ///
    /// Returns the names of the fixers that changed code and the number of
    /// passes run.
    #[tracing::instrument(level = "debug", skip_all, fields(fixers = self.fixers.len()))]
    pub fn run(&self, tokens: &mut Tokens) -> Result<(Vec<String>, usize), FixError> {
        let mut applied: Vec<String> = Vec::new();
        let mut last_changed: Vec<String> = Vec::new();

        for pass in 1..=self.max_passes {
            last_changed.clear();

            for entry in &self.fixers {
                let name = entry.fixer.name();
                if !entry.fixer.is_candidate(tokens) {
                    continue;
                }

                let before = tokens.code_hash();
                tokens.mark_unchanged();
                entry
                    .fixer
                    .apply(tokens, &entry.config)
                    .map_err(|source| FixError::Fixer {
                        fixer: name.to_string(),
                        source,
                    })?;
                tokens.clear_empty_tokens();

                // a retag without a text change does not count
                if tokens.is_changed() && tokens.code_hash() != before {
                    trace!(fixer = name, pass, "fixer changed code");
                    last_changed.push(name.to_string());
                    if !applied.iter().any(|a| a == name) {
                        applied.push(name.to_string());
                    }
                }
            }

            debug!(pass, changed = last_changed.len(), "pipeline pass finished");
            if last_changed.is_empty() {
                return Ok((applied, pass));
            }
        }

        warn!(
            passes = self.max_passes,
            fixers = %last_changed.join(", "),
            "fixers did not converge"
        );
        Err(FixError::IterationLimitExceeded {
            passes: self.max_passes,
            fixers: last_changed,
        })
    }
}
