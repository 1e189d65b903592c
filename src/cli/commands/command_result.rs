use crate::{
    core::{CatalogStats, merge::MergeStats},
    issues::{Issue, ObsoleteEntryIssue},
};

#[derive(Debug)]
pub enum CommandSummary {
    Check,
    Stats(StatsSummary),
    Update(UpdateSummary),
    Clean(CleanSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct StatsSummary {
    pub catalogs: Vec<CatalogStats>,
    pub json: bool,
}

/// Outcome of merging into one catalog.
#[derive(Debug)]
pub struct CatalogUpdate {
    pub file_path: String,
    pub stats: MergeStats,
    /// The catalog did not exist before.
    pub created: bool,
    /// Writing the merged catalog changes the file.
    pub changed: bool,
}

#[derive(Debug)]
pub struct UpdateSummary {
    pub catalogs: Vec<CatalogUpdate>,
    pub source_files: usize,
    pub extracted_count: usize,
    pub is_apply: bool,
}

#[derive(Debug)]
pub struct CleanSummary {
    pub removed_count: usize,
    pub file_count: usize,
    pub is_apply: bool,
    pub entries: Vec<ObsoleteEntryIssue>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    pub error: Option<String>,
}

/// Result of running lingot commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    /// If false, always exit 0 (used for dry-run commands that report work to do).
    pub exit_on_errors: bool,
    /// Issues to report, sorted.
    pub issues: Vec<Issue>,
    /// Number of catalogs that were loaded.
    pub catalogs_checked: usize,
}
