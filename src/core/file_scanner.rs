use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use glob::{MatchOptions, Pattern, glob};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::TEST_FILE_PATTERNS;

/// `*` or `?` makes a pattern a glob; anything else is a literal path.
pub fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains(['*', '?'])
}

/// Python sources found by [`scan_files`].
pub struct ScanResult {
    pub files: HashSet<String>,
    /// Entries that could not be read while walking.
    pub skipped_count: usize,
}

/// `*` and `?` stay within one path component; only `**` crosses `/`.
const IGNORE_MATCH: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Paths excluded from extraction. Glob patterns apply to the path relative
/// to the scan base, so directories above the project never match.
struct IgnoreSet {
    base_dir: PathBuf,
    prefixes: Vec<PathBuf>,
    patterns: Vec<Pattern>,
}

impl IgnoreSet {
    fn new(base_dir: &Path, ignores: &[String], ignore_test_files: bool) -> Self {
        let (globs, literals): (Vec<&String>, Vec<&String>) =
            ignores.iter().partition(|p| is_glob_pattern(p));

        let mut patterns: Vec<Pattern> = globs
            .into_iter()
            .filter_map(|p| {
                Pattern::new(p)
                    .inspect_err(|e| warn!(pattern = %p, error = %e, "invalid ignore pattern"))
                    .ok()
            })
            .collect();
        if ignore_test_files {
            patterns.extend(TEST_FILE_PATTERNS.iter().filter_map(|p| Pattern::new(p).ok()));
        }

        Self {
            base_dir: base_dir.to_path_buf(),
            prefixes: literals.into_iter().map(|p| base_dir.join(p)).collect(),
            patterns,
        }
    }

    fn is_ignored(&self, path: &Path) -> bool {
        if self.prefixes.iter().any(|prefix| path.starts_with(prefix)) {
            return true;
        }
        let relative = path.strip_prefix(&self.base_dir).unwrap_or(path);
        self.patterns
            .iter()
            .any(|p| p.matches_path_with(relative, IGNORE_MATCH))
    }
}

/// Directories to walk: every `includes` entry under `base_dir`, or
/// `base_dir` itself when there are none.
fn scan_roots(base_dir: &Path, includes: &[String]) -> Vec<PathBuf> {
    if includes.is_empty() {
        return vec![base_dir.to_path_buf()];
    }

    let mut roots = Vec::new();
    for include in includes {
        let path = base_dir.join(include);
        if !is_glob_pattern(include) {
            if path.exists() {
                roots.push(path);
            } else {
                warn!(path = %path.display(), "include path does not exist");
            }
            continue;
        }
        match glob(&path.to_string_lossy()) {
            Ok(entries) => roots.extend(entries.flatten().filter(|p| p.is_dir())),
            Err(e) => warn!(pattern = %include, error = %e, "invalid include pattern"),
        }
    }
    roots
}

/// Collect the Python sources under `base_dir` that extraction should read.
pub fn scan_files(
    base_dir: &Path,
    includes: &[String],
    ignores: &[String],
    ignore_test_files: bool,
) -> ScanResult {
    let ignore_set = IgnoreSet::new(base_dir, ignores, ignore_test_files);
    let mut files = HashSet::new();
    let mut skipped_count = 0;

    for root in scan_roots(base_dir, includes) {
        for entry in WalkDir::new(root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "cannot access path");
                    skipped_count += 1;
                    continue;
                }
            };
            let path = entry.path();
            if path.is_file() && is_python_source(path) && !ignore_set.is_ignored(path) {
                files.insert(path.to_string_lossy().into_owned());
            }
        }
    }

    debug!(files = files.len(), skipped = skipped_count, "scanned sources");
    ScanResult {
        files,
        skipped_count,
    }
}

fn is_python_source(path: &Path) -> bool {
    matches!(path.extension().and_then(|e| e.to_str()), Some("py" | "pyw"))
}
