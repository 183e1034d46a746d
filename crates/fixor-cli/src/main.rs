//! fixor CLI - PHP coding standards fixer
//!
//! Checks PHP files against a set of fixers and optionally rewrites them.
//! Run `fixor --list-fixers` for the catalog.

mod cache;
mod config;
mod output;
mod process;

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use colored::*;
use fixor_fixer::{FixerPipeline, FixerRegistry};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use cache::{hash_content, Cache, Signature, CACHE_FILE};
use config::Config;
use output::{OutputFormat, Reporter, Summary};
use process::{discover_files, process_file, write_file, FileStatus};

#[derive(Parser, Debug)]
#[command(name = "fixor")]
#[command(version)]
#[command(about = "Fix PHP coding standards issues")]
struct Cli {
    /// Files or directories to process
    #[arg(required_unless_present = "list_fixers")]
    paths: Vec<PathBuf>,

    /// Apply fixes to files (default is check mode)
    #[arg(long)]
    fix: bool,

    /// Show verbose output and debug logs
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Fixers to run (can be specified multiple times). Overrides config file.
    #[arg(long, short = 'r', value_name = "NAME")]
    rule: Vec<String>,

    /// Preset to use, e.g. @PSR12 or @Symfony
    #[arg(long, value_name = "NAME")]
    preset: Option<String>,

    /// Output format: text, json, diff
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    format: String,

    /// Shorthand for --format diff
    #[arg(long, conflicts_with = "format")]
    diff: bool,

    /// Path to config file (default: auto-detect .fixor.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Ignore config files
    #[arg(long, conflicts_with = "config")]
    no_config: bool,

    /// Do not read or write the cache
    #[arg(long)]
    no_cache: bool,

    /// Cache file location (default: .fixor-cache in the working directory)
    #[arg(long, value_name = "PATH")]
    cache_file: Option<PathBuf>,

    /// Allow risky fixers
    #[arg(long)]
    allow_risky: bool,

    /// Maximum pipeline passes per file
    #[arg(long, value_name = "N")]
    max_passes: Option<usize>,

    /// List available fixers and exit
    #[arg(long)]
    list_fixers: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red(), e);
            ExitCode::from(2)
        }
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let registry = FixerRegistry::new();

    if cli.list_fixers {
        print_fixers(&registry);
        return Ok(ExitCode::SUCCESS);
    }

    let output_format = if cli.diff {
        OutputFormat::Diff
    } else {
        OutputFormat::from_str(&cli.format).ok_or_else(|| {
            anyhow!(
                "Invalid output format '{}'. Valid options: text, json, diff",
                cli.format
            )
        })?
    };
    let text_output = output_format == OutputFormat::Text;

    // Load config file
    let config = if cli.no_config {
        Config::default()
    } else if let Some(config_path) = &cli.config {
        Config::load_path(config_path)?
    } else {
        match Config::load()? {
            Some((cfg, path)) => {
                if cli.verbose && text_output {
                    println!("{}: {}", "Using config".bold(), path.display());
                }
                cfg
            }
            None => Config::default(),
        }
    };

    let preset = config.effective_preset(cli.preset.as_deref())?;
    let rules = config.effective_rules(&cli.rule, preset);
    let options = config.effective_options(preset);
    let max_passes = cli
        .max_passes
        .or(config.fixer.max_passes)
        .unwrap_or(FixerPipeline::DEFAULT_MAX_PASSES);

    let pipeline = registry
        .build_pipeline(
            &rules,
            &options,
            &config.whitespace,
            cli.allow_risky || config.fixer.risky,
            max_passes,
        )
        .map_err(|e| anyhow!("{}. Use --list-fixers to see available fixers.", e))?;
    if pipeline.is_empty() {
        bail!("No fixers enabled");
    }

    let fix_mode = cli.fix;
    if cli.verbose && text_output {
        println!("{}: {}", "Mode".bold(), if fix_mode { "fix" } else { "check" });
        println!("{}: {}", "Fixers".bold(), pipeline.fixer_names().join(", "));
        println!();
    }

    let mut cache = if cli.no_cache {
        None
    } else {
        let path = cli.cache_file.clone().unwrap_or_else(|| PathBuf::from(CACHE_FILE));
        let signature = Signature::new(&rules, &options, &config.whitespace, max_passes);
        let cache = Cache::load_from(&path, signature.clone()).unwrap_or_else(|e| {
            tracing::warn!("{:#}", e);
            Cache::new(signature)
        });
        Some((cache, path))
    };

    let discovered = discover_files(&cli.paths, &config);
    for path in &discovered.missing {
        eprintln!("{}: Path does not exist: {}", "Warning".yellow(), path.display());
    }
    tracing::debug!(files = discovered.files.len(), "processing");

    // Process files in parallel; order follows the sorted file list
    let results: Vec<FileStatus> = {
        let cache_ref = cache.as_ref().map(|(c, _)| c);
        discovered
            .files
            .par_iter()
            .map(|path| process_file(path, &pipeline, cache_ref))
            .collect()
    };

    let mut reporter = Reporter::new(output_format, cli.verbose);
    for (path, status) in discovered.files.iter().zip(results) {
        let cache = cache.as_mut().map(|(c, _)| c);
        record_status(path, status, fix_mode, cache, &mut reporter);
    }

    if let Some((cache, path)) = &cache {
        if let Err(e) = cache.save_to(path) {
            tracing::warn!("{:#}", e);
        }
    }

    let code = exit_code(reporter.summary(), !fix_mode);
    reporter.finish(!fix_mode)?;
    Ok(code)
}

/// Report one file's outcome, writing it back in fix mode.
///
/// Failures are reported per file and never stop the batch.
fn record_status(
    path: &Path,
    status: FileStatus,
    fix_mode: bool,
    mut cache: Option<&mut Cache>,
    reporter: &mut Reporter,
) {
    match status {
        FileStatus::Clean { content_hash } => {
            if let Some(cache) = cache {
                cache.mark_clean(path.to_path_buf(), content_hash);
            }
            reporter.report_clean(path, false);
        }
        FileStatus::Cached => reporter.report_clean(path, true),
        FileStatus::Changed {
            old_source,
            new_source,
            applied,
        } => {
            if fix_mode {
                if let Err(e) = write_file(path, &new_source) {
                    if let Some(cache) = cache {
                        cache.forget(path);
                    }
                    reporter.report_error(path, &format!("{:#}", e));
                    return;
                }
                if let Some(cache) = cache.as_deref_mut() {
                    cache.mark_clean(path.to_path_buf(), hash_content(&new_source));
                }
            } else if let Some(cache) = cache {
                cache.forget(path);
            }
            reporter.report_changed(path, applied, &old_source, &new_source, fix_mode);
        }
        FileStatus::NotConverged { passes, fixers } => {
            if let Some(cache) = cache {
                cache.forget(path);
            }
            let message = format!(
                "did not converge after {} passes (still changing: {})",
                passes,
                fixers.join(", ")
            );
            reporter.report_error(path, &message);
        }
        FileStatus::Failed(message) => {
            if let Some(cache) = cache {
                cache.forget(path);
            }
            reporter.report_error(path, &message);
        }
    }
}

/// 0 clean, 1 changes pending in check mode, 2 errors
fn exit_code(summary: &Summary, check_mode: bool) -> ExitCode {
    ExitCode::from(exit_status(summary, check_mode))
}

fn exit_status(summary: &Summary, check_mode: bool) -> u8 {
    if summary.errors > 0 {
        2
    } else if check_mode && summary.files_with_changes > 0 {
        1
    } else {
        0
    }
}

fn print_fixers(registry: &FixerRegistry) {
    println!("{}", "Available fixers:".bold());
    for info in registry.list() {
        let risky = if info.is_risky { " (risky)".red().to_string() } else { String::new() };
        println!(
            "  {} [priority {}]{} - {}",
            info.name.green(),
            info.priority,
            risky,
            info.description
        );
        for option in &info.options {
            println!(
                "      {} ({}, default {}): {}",
                option.name, option.option_type, option.default, option.description
            );
        }
    }
}
