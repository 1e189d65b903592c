//! Small text and path helpers used by the parsers and rules.

use std::path::Path;

/// True when `text` has at least one letter in any script.
///
/// Used to skip numbers, punctuation and bare placeholders when comparing
/// translations with their source.
///
/// ```
/// use lingot::utils::contains_alphabetic;
///
/// assert!(contains_alphabetic("Demat"));
/// assert!(contains_alphabetic("%1 files"));
/// assert!(!contains_alphabetic("{count}/{total}"));
/// assert!(!contains_alphabetic("42"));
/// ```
pub fn contains_alphabetic(text: &str) -> bool {
    text.chars().any(char::is_alphabetic)
}

/// Byte offset of the start of every line in `content`.
pub fn build_line_index(content: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(content.match_indices('\n').map(|(i, _)| i + 1))
        .collect()
}

/// 1-based line containing `offset`, given an index from [`build_line_index`].
pub fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    line_index.partition_point(|&start| start <= offset).max(1)
}

/// Render a path with forward slashes, the form catalogs store in `<location>`.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
