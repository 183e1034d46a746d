//! Shared fixture helpers for fixer tests

use std::sync::Arc;

use pretty_assertions::assert_eq;

use crate::fixers::{ConfigValue, Fixer, FixerConfig};
use crate::pipeline::FixerPipeline;

/// Run `fixer` to a fixed point on `input` and compare with `expected`.
///
/// With `input` of `None`, `expected` must come out untouched. In both
/// cases `expected` must itself be stable under the fixer.
pub fn assert_fix(fixer: impl Fixer + 'static, expected: &str, input: Option<&str>) {
    assert_fix_with(fixer, &[], expected, input);
}

/// [`assert_fix`] with fixer options
pub fn assert_fix_with(
    fixer: impl Fixer + 'static,
    options: &[(&str, ConfigValue)],
    expected: &str,
    input: Option<&str>,
) {
    let mut config = FixerConfig::default();
    for (name, value) in options {
        config = config.with_option(name, value.clone());
    }
    let mut pipeline = FixerPipeline::new();
    pipeline
        .add(Arc::new(fixer), config)
        .expect("fixture options are valid");

    if let Some(input) = input {
        let result = pipeline.fix_code(input).expect("fixer converges");
        assert_eq!(expected, result.code, "fixing the input");
        assert!(result.changed, "input should be changed");
    }

    let result = pipeline.fix_code(expected).expect("fixer converges");
    assert_eq!(expected, result.code, "expected output must be stable");
    assert!(!result.changed);
}
