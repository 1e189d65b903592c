//! Unfinished translation detection rule.

use crate::{
    core::{
        CheckContext,
        catalog::{Catalog, TranslationType},
    },
    issues::UnfinishedIssue,
    rules::helpers::{message_context, sort_by_context},
};

pub fn check_unfinished_issues(ctx: &CheckContext) -> Vec<UnfinishedIssue> {
    check_unfinished(ctx.catalogs())
}

/// Find current messages still marked `unfinished`.
///
/// Obsolete messages are unfinished too but no longer shown in the
/// application, so they are left to the `obsolete-entry` rule.
pub fn check_unfinished(catalogs: &[Catalog]) -> Vec<UnfinishedIssue> {
    let mut issues: Vec<UnfinishedIssue> = catalogs
        .iter()
        .flat_map(|catalog| {
            catalog
                .messages()
                .filter(|(_, m)| m.status() == TranslationType::Unfinished)
                .map(move |(context, message)| UnfinishedIssue {
                    context: message_context(catalog, context, message),
                    has_draft: !message.translation.text.is_empty(),
                })
        })
        .collect();

    sort_by_context(&mut issues, |i| &i.context);
    issues
}
