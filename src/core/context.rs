use std::{
    cell::OnceCell,
    collections::HashSet,
    path::{Component, Path, PathBuf},
};

use anyhow::{Result, bail};
use glob::glob;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::{
        catalog::Catalog,
        extract::{ExtractResult, extract_files},
        file_scanner::{is_glob_pattern, scan_files},
        parsers::ts::parse_catalog_file,
    },
    issues::{ParseErrorFileType, ParseErrorIssue},
};

/// A configured view of one project: its catalogs and its sources.
///
/// Catalogs are parsed eagerly, since every command needs them. Source files
/// are only scanned and extracted when a command asks for them (`update`).
///
/// # Configuration Priority
///
/// 1. CLI arguments (e.g., `--catalog translations/app_br.ts`)
/// 2. `.lingotrc.json` config file
/// 3. Built-in defaults
pub struct CheckContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Project root directory (for resolving relative paths).
    pub root_dir: PathBuf,

    /// Catalog paths, in the order they were resolved.
    pub catalog_files: Vec<String>,

    /// Catalog paths given literally that do not exist yet.
    pub missing_catalogs: Vec<String>,

    /// Translations to ignore (from config `ignoreTexts`).
    pub ignore_texts: HashSet<String>,

    /// Whether verbose diagnostics were requested.
    pub verbose: bool,

    /// Successfully parsed catalogs, sorted by file path.
    catalogs: Vec<Catalog>,

    /// Catalogs that failed to parse.
    catalog_parse_errors: Vec<ParseErrorIssue>,

    /// Python sources to extract from. Initialized on first call to `source_files()`.
    source_files: OnceCell<HashSet<String>>,

    /// Extraction output. Initialized on first call to `extracted()`.
    extracted: OnceCell<ExtractResult>,
}

impl CheckContext {
    /// Create a new `CheckContext` from command line arguments.
    ///
    /// # Errors
    ///
    /// Returns error if the config file is invalid or no catalog matches the
    /// configured patterns.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;
        let start_dir = common_args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let loaded = load_config(&start_dir)?;
        let root_dir = match loaded.path.as_deref().and_then(Path::parent) {
            Some(config_dir) => {
                let cwd = std::env::current_dir()
                    .ok()
                    .and_then(|dir| dir.canonicalize().ok());
                project_root(&start_dir, config_dir, cwd.as_deref())
            }
            None => {
                info!("no .lingotrc.json found, using default configuration");
                start_dir
            }
        };
        debug!(root = %root_dir.display(), "project root");
        let mut config = loaded.config;

        if !common_args.catalog.is_empty() {
            config.catalogs = common_args
                .catalog
                .iter()
                .map(|p| p.to_string_lossy().to_string())
                .collect();
        }

        let (catalog_files, missing_catalogs) = resolve_catalogs(&root_dir, &config.catalogs);
        if catalog_files.is_empty() && missing_catalogs.is_empty() {
            bail!(
                "No catalogs found matching {} in '{}'",
                config.catalogs.join(", "),
                root_dir.display()
            );
        }

        let (catalogs, catalog_parse_errors) = parse_catalogs(&catalog_files);
        debug!(
            catalogs = catalogs.len(),
            errors = catalog_parse_errors.len(),
            "loaded catalogs"
        );

        let ignore_texts = config.ignore_texts.iter().cloned().collect();

        Ok(Self {
            config,
            root_dir,
            catalog_files,
            missing_catalogs,
            ignore_texts,
            verbose,
            catalogs,
            catalog_parse_errors,
            source_files: OnceCell::new(),
            extracted: OnceCell::new(),
        })
    }

    /// Parsed catalogs, sorted by file path.
    pub fn catalogs(&self) -> &[Catalog] {
        &self.catalogs
    }

    /// Parse errors from catalog files.
    pub fn catalog_parse_errors(&self) -> &[ParseErrorIssue] {
        &self.catalog_parse_errors
    }

    /// Directory sources are scanned from (`sourceRoot` under the project root).
    pub fn source_dir(&self) -> PathBuf {
        resolve_path(&self.root_dir, &self.config.source_root)
    }

    /// Python sources selected by `includes`/`ignores` (lazy initialization).
    pub fn source_files(&self) -> &HashSet<String> {
        self.source_files.get_or_init(|| {
            let scan = scan_files(
                &self.source_dir(),
                &self.config.includes,
                &self.config.ignores,
                self.config.ignore_test_files,
            );
            if scan.skipped_count > 0 {
                warn!(
                    skipped = scan.skipped_count,
                    "paths skipped due to access errors"
                );
            }
            scan.files
        })
    }

    /// Strings extracted from all source files (lazy initialization).
    pub fn extracted(&self) -> &ExtractResult {
        self.extracted
            .get_or_init(|| extract_files(self.source_files()))
    }
}

/// Directory holding the config file, expressed relative to the working
/// directory when the search started from a relative path.
fn project_root(start_dir: &Path, config_dir: &Path, cwd: Option<&Path>) -> PathBuf {
    if start_dir.is_absolute() {
        return config_dir.to_path_buf();
    }
    match cwd.and_then(|cwd| pathdiff::diff_paths(config_dir, cwd)) {
        Some(rel) if rel.as_os_str().is_empty() => PathBuf::from("."),
        Some(rel) => rel,
        None => config_dir.to_path_buf(),
    }
}

/// Resolve `path` against the project root, leaving it untouched when the
/// root is the current directory or `path` is absolute.
pub fn resolve_path(root_dir: &Path, path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() || root_dir.components().all(|c| matches!(c, Component::CurDir)) {
        return p.to_path_buf();
    }
    let rel = p.strip_prefix(".").unwrap_or(p);
    root_dir.join(rel)
}

/// Expand catalog patterns. Returns `(existing files, missing literal paths)`.
fn resolve_catalogs(root_dir: &Path, patterns: &[String]) -> (Vec<String>, Vec<String>) {
    let mut found = Vec::new();
    let mut missing = Vec::new();

    for pattern in patterns {
        let path = resolve_path(root_dir, pattern);
        if is_glob_pattern(pattern) {
            match glob(&path.to_string_lossy()) {
                Ok(entries) => found.extend(
                    entries
                        .flatten()
                        .filter(|p| p.is_file())
                        .map(|p| p.to_string_lossy().to_string()),
                ),
                Err(e) => warn!(pattern = %pattern, error = %e, "invalid catalog pattern"),
            }
        } else if path.is_file() {
            found.push(path.to_string_lossy().to_string());
        } else {
            missing.push(path.to_string_lossy().to_string());
        }
    }

    found.sort();
    found.dedup();
    missing.sort();
    missing.dedup();
    (found, missing)
}

fn parse_catalogs(files: &[String]) -> (Vec<Catalog>, Vec<ParseErrorIssue>) {
    let results: Vec<_> = files
        .par_iter()
        .map(|file_path| (file_path, parse_catalog_file(file_path)))
        .collect();

    let mut catalogs = Vec::new();
    let mut errors = Vec::new();
    for (file_path, result) in results {
        match result {
            Ok(catalog) => catalogs.push(catalog),
            Err(e) => {
                debug!(file = %file_path, error = %e, "cannot parse catalog");
                errors.push(ParseErrorIssue {
                    file_path: file_path.clone(),
                    error: format!("{:#}", e),
                    file_type: ParseErrorFileType::Catalog,
                });
            }
        }
    }
    (catalogs, errors)
}
