//! File discovery and per-file processing for fixor

use anyhow::{Context, Result};
use fixor_fixer::{FixError, FixerPipeline};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::cache::{hash_content, Cache};
use crate::config::Config;

/// Outcome of running the pipeline over one file
#[derive(Debug)]
pub enum FileStatus {
    /// Already clean; carries the content hash for the cache
    Clean { content_hash: u64 },
    /// Skipped because the cache knows the content is clean
    Cached,
    /// The pipeline rewrote the file
    Changed {
        old_source: String,
        new_source: String,
        applied: Vec<String>,
    },
    /// The pipeline hit its pass cap
    NotConverged { passes: usize, fixers: Vec<String> },
    Failed(String),
}

/// Files found under the given paths, plus paths that do not exist
#[derive(Debug, Default)]
pub struct Discovered {
    pub files: Vec<PathBuf>,
    pub missing: Vec<PathBuf>,
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name == "vendor"
}

/// Collect `.php` files, skipping `vendor`, hidden directories and
/// configured exclusions. The result is sorted for deterministic output.
pub fn discover_files(paths: &[PathBuf], config: &Config) -> Discovered {
    let mut discovered = Discovered::default();

    for path in paths {
        if path.is_file() {
            discovered.files.push(path.clone());
        } else if path.is_dir() {
            let walker = WalkDir::new(path)
                .into_iter()
                .filter_entry(|e| !is_skipped_dir(e) && !config.should_exclude(e.path()));
            for entry in walker.filter_map(|e| e.ok()) {
                let file_path = entry.path();
                if entry.file_type().is_file()
                    && file_path.extension().is_some_and(|ext| ext == "php")
                {
                    discovered.files.push(file_path.to_path_buf());
                }
            }
        } else {
            discovered.missing.push(path.clone());
        }
    }

    discovered.files.sort();
    discovered.files.dedup();
    discovered
}

/// Run the pipeline over one file without writing anything
pub fn process_file(path: &Path, pipeline: &FixerPipeline, cache: Option<&Cache>) -> FileStatus {
    match try_process_file(path, pipeline, cache) {
        Ok(status) => status,
        Err(e) => FileStatus::Failed(format!("{:#}", e)),
    }
}

fn try_process_file(
    path: &Path,
    pipeline: &FixerPipeline,
    cache: Option<&Cache>,
) -> Result<FileStatus> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let content_hash = hash_content(&source);

    if cache.is_some_and(|c| c.is_clean(path, content_hash)) {
        tracing::trace!(path = %path.display(), "cache hit");
        return Ok(FileStatus::Cached);
    }

    match pipeline.fix_code(&source) {
        Ok(result) if result.changed => Ok(FileStatus::Changed {
            old_source: source,
            new_source: result.code,
            applied: result.applied,
        }),
        Ok(_) => Ok(FileStatus::Clean { content_hash }),
        Err(FixError::IterationLimitExceeded { passes, fixers }) => {
            Ok(FileStatus::NotConverged { passes, fixers })
        }
        Err(e) => Err(e.into()),
    }
}

/// Write the processed result to the file
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write file: {}", path.display()))
}
