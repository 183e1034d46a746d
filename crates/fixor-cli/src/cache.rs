//! File caching for fixor to skip files already known to be clean
//!
//! Uses xxHash for fast content hashing and stores the cache in a
//! `.fixor-cache` JSON file.

use anyhow::{Context, Result};
use fixor_fixer::{ConfigValue, WhitespaceConfig};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use xxhash_rust::xxh3::xxh3_64;

/// Cache file name
pub const CACHE_FILE: &str = ".fixor-cache";

/// Cache version - increment when format changes
const CACHE_VERSION: u32 = 1;

/// What a cache was computed with; any difference invalidates every entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub version: u32,
    pub tool_version: String,
    /// Hash of rules, their options, whitespace settings and pass cap
    pub ruleset_hash: u64,
}

impl Signature {
    pub fn new(
        rules: &[String],
        options: &HashMap<String, HashMap<String, ConfigValue>>,
        whitespace: &WhitespaceConfig,
        max_passes: usize,
    ) -> Self {
        let mut sorted_rules: Vec<&str> = rules.iter().map(String::as_str).collect();
        sorted_rules.sort_unstable();
        // only options of enabled rules matter
        let options: BTreeMap<&str, BTreeMap<&str, &ConfigValue>> = options
            .iter()
            .filter(|(fixer, _)| rules.contains(*fixer))
            .map(|(fixer, values)| {
                let values = values.iter().map(|(k, v)| (k.as_str(), v)).collect();
                (fixer.as_str(), values)
            })
            .collect();

        let canonical = serde_json::json!({
            "rules": sorted_rules,
            "options": options,
            "whitespace": whitespace,
            "max_passes": max_passes,
        });

        Self {
            version: CACHE_VERSION,
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            ruleset_hash: xxh3_64(canonical.to_string().as_bytes()),
        }
    }
}

/// Cache structure stored on disk
#[derive(Debug, Serialize, Deserialize)]
pub struct Cache {
    pub signature: Signature,
    /// Content hash of each file when it was last seen clean
    pub entries: HashMap<PathBuf, u64>,
}

impl Cache {
    pub fn new(signature: Signature) -> Self {
        Self {
            signature,
            entries: HashMap::new(),
        }
    }

    /// Load cache from a specific path
    ///
    /// A missing file or a cache written with a different signature yields
    /// an empty cache.
    pub fn load_from(path: &Path, signature: Signature) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new(signature));
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read cache file: {}", path.display()))?;

        let cache: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache file: {}", path.display()))?;

        if cache.signature != signature {
            tracing::debug!(path = %path.display(), "cache signature changed, starting fresh");
            return Ok(Self::new(signature));
        }

        Ok(cache)
    }

    /// Save cache to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self).context("Failed to serialize cache")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write cache file: {}", path.display()))?;

        Ok(())
    }

    /// Whether `path` was clean the last time its content hashed to `content_hash`
    pub fn is_clean(&self, path: &Path, content_hash: u64) -> bool {
        self.entries.get(path) == Some(&content_hash)
    }

    pub fn mark_clean(&mut self, path: PathBuf, content_hash: u64) {
        self.entries.insert(path, content_hash);
    }

    pub fn forget(&mut self, path: &Path) {
        self.entries.remove(path);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Hash file contents using xxHash
pub fn hash_content(content: &str) -> u64 {
    xxh3_64(content.as_bytes())
}
