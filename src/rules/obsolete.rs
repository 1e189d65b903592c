//! Obsolete entry listing.
//!
//! Vanished and obsolete messages are legitimate: lupdate keeps them so a
//! translation can be revived if the phrase comes back. This rule only runs
//! when requested explicitly (`lingot check obsolete-entry`).

use crate::{
    core::{CheckContext, catalog::Catalog},
    issues::ObsoleteEntryIssue,
    rules::helpers::{message_context, sort_by_context},
};

pub fn check_obsolete_entry_issues(ctx: &CheckContext) -> Vec<ObsoleteEntryIssue> {
    check_obsolete_entry(ctx.catalogs())
}

pub fn check_obsolete_entry(catalogs: &[Catalog]) -> Vec<ObsoleteEntryIssue> {
    let mut issues: Vec<ObsoleteEntryIssue> = catalogs
        .iter()
        .flat_map(|catalog| {
            catalog
                .messages()
                .filter(|(_, m)| !m.is_current())
                .map(move |(context, message)| ObsoleteEntryIssue {
                    context: message_context(catalog, context, message),
                    status: message.status(),
                })
        })
        .collect();

    sort_by_context(&mut issues, |i| &i.context);
    issues
}
