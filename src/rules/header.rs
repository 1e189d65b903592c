//! Catalog header rules: `missing-language` and `unsupported-version`.

use crate::{
    core::{CheckContext, catalog::Catalog},
    issues::{MissingLanguageIssue, UnsupportedVersionIssue},
};

/// `TS@version` values this tool reads and writes.
pub const SUPPORTED_VERSIONS: &[&str] = &["2.0", "2.1"];

pub fn check_missing_language_issues(ctx: &CheckContext) -> Vec<MissingLanguageIssue> {
    check_missing_language(ctx.catalogs())
}

pub fn check_missing_language(catalogs: &[Catalog]) -> Vec<MissingLanguageIssue> {
    let mut issues: Vec<MissingLanguageIssue> = catalogs
        .iter()
        .filter(|c| c.language.as_deref().is_none_or(str::is_empty))
        .map(|c| MissingLanguageIssue {
            file_path: c.file_path.clone(),
        })
        .collect();
    issues.sort_by(|a, b| a.file_path.cmp(&b.file_path));
    issues
}

pub fn check_unsupported_version_issues(ctx: &CheckContext) -> Vec<UnsupportedVersionIssue> {
    check_unsupported_version(ctx.catalogs())
}

pub fn check_unsupported_version(catalogs: &[Catalog]) -> Vec<UnsupportedVersionIssue> {
    let mut issues: Vec<UnsupportedVersionIssue> = catalogs
        .iter()
        .filter(|c| !SUPPORTED_VERSIONS.contains(&c.version.as_str()))
        .map(|c| UnsupportedVersionIssue {
            file_path: c.file_path.clone(),
            version: c.version.clone(),
        })
        .collect();
    issues.sort_by(|a, b| a.file_path.cmp(&b.file_path));
    issues
}
