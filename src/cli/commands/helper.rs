use super::{CommandResult, CommandSummary};
use crate::{
    core::CheckContext,
    issues::{Issue, ParseErrorFileType, ParseErrorIssue, Severity},
};

pub fn finish(
    summary: CommandSummary,
    mut issues: Vec<Issue>,
    catalogs_checked: usize,
    exit_on_errors: bool,
) -> CommandResult {
    issues.sort();

    let mut error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let warning_count = issues.len() - error_count;

    if let CommandSummary::Init(ref summary) = summary
        && summary.error.is_some()
    {
        error_count += 1;
    }

    CommandResult {
        summary,
        error_count,
        warning_count,
        exit_on_errors,
        issues,
        catalogs_checked,
    }
}

/// Catalogs that could not be loaded: parse failures and missing literal paths.
pub fn catalog_errors(ctx: &CheckContext) -> Vec<Issue> {
    let missing = ctx.missing_catalogs.iter().map(|path| ParseErrorIssue {
        file_path: path.clone(),
        error: "Catalog not found".to_string(),
        file_type: ParseErrorFileType::Catalog,
    });
    ctx.catalog_parse_errors()
        .iter()
        .cloned()
        .chain(missing)
        .map(Issue::ParseError)
        .collect()
}
