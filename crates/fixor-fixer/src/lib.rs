//! fixor-fixer: PHP-CS-Fixer compatible fixers for fixor
//!
//! Fixers rewrite a [`fixor_core::Tokens`] stream in place. The
//! [`FixerPipeline`] runs an ordered set of them until the code stops
//! changing, and the [`FixerRegistry`] is the catalog the pipeline is
//! assembled from.
//!
//! # Example
//!
//! ```
//! use fixor_fixer::{FixerConfig, FixerPipeline, FixerRegistry};
//!
//! let registry = FixerRegistry::new();
//! let mut pipeline = FixerPipeline::new();
//! let fixer = registry.get("no_unneeded_braces").unwrap();
//! pipeline.add(fixer, FixerConfig::default()).unwrap();
//!
//! let result = pipeline.fix_code("<?php { echo 1;}").unwrap();
//! assert_eq!(result.code, "<?php  echo 1;");
//! ```

pub mod config;
mod error;
pub mod fixers;
mod pipeline;
#[cfg(test)]
mod test_utils;

pub use config::{IndentStyle, LineEnding, Preset, WhitespaceConfig};
pub use error::FixError;
pub use fixers::{
    resolve_options, ConfigValue, Fixer, FixerConfig, FixerInfo, FixerOption, FixerRegistry,
    OptionType,
};
pub use pipeline::{ConfiguredFixer, FixResult, FixerPipeline};
