use anyhow::{Ok, Result};
use clap::ValueEnum;

use super::super::args::CheckCommand;
use super::{
    helper::{catalog_errors, finish},
    {CommandResult, CommandSummary},
};

use crate::{
    core::CheckContext,
    issues::Issue,
    rules::{
        duplicate::check_duplicate_message_issues,
        empty_source::check_empty_source_issues,
        header::{check_missing_language_issues, check_unsupported_version_issues},
        identical::check_identical_translation_issues,
        invalid_location::check_invalid_location_issues,
        obsolete::check_obsolete_entry_issues,
        placeholder::check_placeholder_mismatch_issues,
        unfinished::check_unfinished_issues,
        vanished_location::check_vanished_location_issues,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum CheckRule {
    EmptySource,
    InvalidLocation,
    VanishedLocation,
    DuplicateMessage,
    Unfinished,
    IdenticalTranslation,
    PlaceholderMismatch,
    MissingLanguage,
    UnsupportedVersion,
    ObsoleteEntry,
}

impl CheckRule {
    pub fn all() -> Vec<CheckRule> {
        vec![
            CheckRule::EmptySource,
            CheckRule::InvalidLocation,
            CheckRule::VanishedLocation,
            CheckRule::DuplicateMessage,
            CheckRule::Unfinished,
            CheckRule::IdenticalTranslation,
            CheckRule::PlaceholderMismatch,
            CheckRule::MissingLanguage,
            CheckRule::UnsupportedVersion,
            CheckRule::ObsoleteEntry,
        ]
    }

    /// Rules run when none are named on the command line.
    pub fn defaults() -> Vec<CheckRule> {
        Self::all()
            .into_iter()
            .filter(|rule| *rule != CheckRule::ObsoleteEntry)
            .collect()
    }
}

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = CheckContext::new(&cmd.args.common)?;

    let checks = if cmd.checks.is_empty() {
        CheckRule::defaults()
    } else {
        cmd.checks.clone()
    };

    let mut all_issues: Vec<Issue> = Vec::new();

    for check in checks {
        match check {
            CheckRule::EmptySource => {
                let issues = check_empty_source_issues(&ctx);
                all_issues.extend(issues.into_iter().map(Issue::EmptySource));
            }
            CheckRule::InvalidLocation => {
                let issues = check_invalid_location_issues(&ctx);
                all_issues.extend(issues.into_iter().map(Issue::InvalidLocation));
            }
            CheckRule::VanishedLocation => {
                let issues = check_vanished_location_issues(&ctx);
                all_issues.extend(issues.into_iter().map(Issue::VanishedLocation));
            }
            CheckRule::DuplicateMessage => {
                let issues = check_duplicate_message_issues(&ctx);
                all_issues.extend(issues.into_iter().map(Issue::DuplicateMessage));
            }
            CheckRule::Unfinished => {
                let issues = check_unfinished_issues(&ctx);
                all_issues.extend(issues.into_iter().map(Issue::Unfinished));
            }
            CheckRule::IdenticalTranslation => {
                let issues = check_identical_translation_issues(&ctx);
                all_issues.extend(issues.into_iter().map(Issue::IdenticalTranslation));
            }
            CheckRule::PlaceholderMismatch => {
                let issues = check_placeholder_mismatch_issues(&ctx);
                all_issues.extend(issues.into_iter().map(Issue::PlaceholderMismatch));
            }
            CheckRule::MissingLanguage => {
                let issues = check_missing_language_issues(&ctx);
                all_issues.extend(issues.into_iter().map(Issue::MissingLanguage));
            }
            CheckRule::UnsupportedVersion => {
                let issues = check_unsupported_version_issues(&ctx);
                all_issues.extend(issues.into_iter().map(Issue::UnsupportedVersion));
            }
            CheckRule::ObsoleteEntry => {
                let issues = check_obsolete_entry_issues(&ctx);
                all_issues.extend(issues.into_iter().map(Issue::ObsoleteEntry));
            }
        }
    }

    all_issues.extend(catalog_errors(&ctx));

    Ok(finish(
        CommandSummary::Check,
        all_issues,
        ctx.catalogs().len(),
        true,
    ))
}
