use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::file_scanner::is_glob_pattern;

pub const CONFIG_FILE_NAME: &str = ".lingotrc.json";

/// Python test modules skipped during extraction when `ignoreTestFiles` is set.
pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/test_*.py",
    "**/*_test.py",
    "**/conftest.py",
    "**/tests/**",
];

/// Project settings read from `.lingotrc.json`. Missing keys take defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Catalog paths or glob patterns, relative to the project root.
    pub catalogs: Vec<String>,
    /// Directory that `includes` and `ignores` are relative to.
    pub source_root: String,
    /// Source directories to extract from. Empty means all of `sourceRoot`.
    pub includes: Vec<String>,
    pub ignores: Vec<String>,
    /// Translations never reported as identical to their source.
    pub ignore_texts: Vec<String>,
    pub check_placeholders: bool,
    pub ignore_test_files: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalogs: vec!["translations/*.ts".to_string()],
            source_root: "./".to_string(),
            includes: vec!["src".to_string()],
            ignores: Vec::new(),
            ignore_texts: Vec::new(),
            check_placeholders: true,
            ignore_test_files: true,
        }
    }
}

impl Config {
    /// Reject glob patterns that cannot be compiled.
    ///
    /// `includes` entries without wildcards are literal directories and are
    /// accepted as-is, brackets included.
    pub fn validate(&self) -> Result<()> {
        check_patterns("catalogs", &self.catalogs, false)?;
        check_patterns("ignores", &self.ignores, false)?;
        check_patterns("includes", &self.includes, true)
    }
}

fn check_patterns(field: &str, patterns: &[String], literal_allowed: bool) -> Result<()> {
    for pattern in patterns {
        if literal_allowed && !is_glob_pattern(pattern) {
            continue;
        }
        Pattern::new(pattern)
            .with_context(|| format!("Invalid glob pattern in '{}': \"{}\"", field, pattern))?;
    }
    Ok(())
}

/// Default configuration as pretty-printed JSON, the content `lingot init` writes.
pub fn default_config_json() -> Result<String> {
    serde_json::to_string_pretty(&Config::default()).context("Failed to serialize default config")
}

/// Look for the config file in `start_dir` and its parents, stopping at the
/// first directory containing `.git`. The returned path is absolute.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let start = fs::canonicalize(start_dir)
        .or_else(|_| std::path::absolute(start_dir))
        .ok()?;
    for dir in start.ancestors() {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if dir.join(".git").exists() {
            break;
        }
    }
    None
}

/// Configuration together with where it came from.
pub struct LoadedConfig {
    pub config: Config,
    /// Config file that was read; `None` when defaults are in use.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<LoadedConfig> {
    let Some(path) = find_config_file(start_dir) else {
        return Ok(LoadedConfig {
            config: Config::default(),
            path: None,
        });
    };

    debug!(path = %path.display(), "loading config");
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config.validate()?;

    Ok(LoadedConfig {
        config,
        path: Some(path),
    })
}
