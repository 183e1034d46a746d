//! Output formatting for fixor
//!
//! Supports text (colored terminal), unified diff and JSON output formats.

use anyhow::Result;
use colored::*;
use serde::Serialize;
use similar::{ChangeTag, TextDiff};
use std::fmt::Write as _;
use std::path::Path;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Diff,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<OutputFormat> {
        match s.to_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            "diff" => Some(OutputFormat::Diff),
            _ => None,
        }
    }
}

/// Result of processing a single file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub applied_fixers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    pub files_processed: usize,
    pub files_with_changes: usize,
    pub files_cached: usize,
    pub errors: usize,
}

/// Full JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    pub version: String,
    pub summary: Summary,
    pub files: Vec<FileReport>,
}

/// Reporter for accumulating and outputting results
pub struct Reporter {
    format: OutputFormat,
    verbose: bool,
    results: Vec<FileReport>,
    summary: Summary,
}

impl Reporter {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self {
            format,
            verbose,
            results: Vec::new(),
            summary: Summary::default(),
        }
    }

    /// Report a file the pipeline changed; `written` is true in fix mode
    pub fn report_changed(
        &mut self,
        path: &Path,
        applied: Vec<String>,
        old_source: &str,
        new_source: &str,
        written: bool,
    ) {
        self.summary.files_processed += 1;
        self.summary.files_with_changes += 1;

        match self.format {
            OutputFormat::Text => {
                println!("{}", path.display().to_string().bold());
                print_line_diff(old_source, new_source);
                let verb = if written { "Fixed" } else { "Would fix" };
                println!("  {} {}: {}", "->".green(), verb, applied.join(", "));
                println!();
            }
            OutputFormat::Diff => {
                print!("{}", unified_diff(path, old_source, new_source));
            }
            OutputFormat::Json => {}
        }

        let diff = (self.format == OutputFormat::Json)
            .then(|| unified_diff(path, old_source, new_source));
        self.results.push(FileReport {
            path: path.display().to_string(),
            applied_fixers: applied,
            diff,
            error: None,
        });
    }

    /// Report a file with nothing to fix
    pub fn report_clean(&mut self, path: &Path, cached: bool) {
        self.summary.files_processed += 1;
        if cached {
            self.summary.files_cached += 1;
        }
        if self.verbose && self.format == OutputFormat::Text {
            let note = if cached { " (cached)" } else { "" };
            println!("{}: No changes needed{}", path.display(), note);
        }
        self.results.push(FileReport {
            path: path.display().to_string(),
            applied_fixers: Vec::new(),
            diff: None,
            error: None,
        });
    }

    /// Report an error processing a file
    pub fn report_error(&mut self, path: &Path, error: &str) {
        self.summary.files_processed += 1;
        self.summary.errors += 1;

        eprintln!("{}: {} - {}", "Warning".yellow(), path.display(), error);

        self.results.push(FileReport {
            path: path.display().to_string(),
            applied_fixers: Vec::new(),
            diff: None,
            error: Some(error.to_string()),
        });
    }

    /// Print final summary/output
    pub fn finish(self, check_mode: bool) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                println!("{}", "Summary".bold().underline());
                println!("  Files processed: {}", self.summary.files_processed);
                println!("  Files with changes: {}", self.summary.files_with_changes);
                if self.summary.files_cached > 0 {
                    println!("  Skipped via cache: {}", self.summary.files_cached);
                }
                if self.summary.errors > 0 {
                    println!("  Errors: {}", self.summary.errors);
                }

                if check_mode && self.summary.files_with_changes > 0 {
                    println!();
                    println!("{}", "Run with --fix to apply changes".yellow());
                }
            }
            OutputFormat::Json => {
                let output = JsonOutput {
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    summary: self.summary,
                    files: self.results,
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Diff => {
                // patch-compatible output carries no summary
            }
        }
        Ok(())
    }

    /// Get summary for exit code determination
    pub fn summary(&self) -> &Summary {
        &self.summary
    }
}

/// Print changed lines only, removed in red and added in green
fn print_line_diff(old: &str, new: &str) {
    let diff = TextDiff::from_lines(old, new);
    for change in diff.iter_all_changes() {
        let line = change.value().trim_end_matches(['\r', '\n']);
        match change.tag() {
            ChangeTag::Delete => println!("  {}", format!("- {}", line).red()),
            ChangeTag::Insert => println!("  {}", format!("+ {}", line).green()),
            ChangeTag::Equal => {}
        }
    }
}

/// Unified diff (`diff -u` compatible) of one file
pub fn unified_diff(path: &Path, old: &str, new: &str) -> String {
    let diff = TextDiff::from_lines(old, new);
    let path_str = path.display().to_string();
    let mut out = String::new();

    let _ = writeln!(out, "--- a/{}", path_str);
    let _ = writeln!(out, "+++ b/{}", path_str);

    for hunk in diff.unified_diff().context_radius(3).iter_hunks() {
        let _ = writeln!(out, "{}", hunk.header());
        for change in hunk.iter_changes() {
            let sign = match change.tag() {
                ChangeTag::Delete => "-",
                ChangeTag::Insert => "+",
                ChangeTag::Equal => " ",
            };
            let _ = write!(out, "{}{}", sign, change);
            if change.missing_newline() {
                out.push('\n');
            }
        }
    }
    out
}
