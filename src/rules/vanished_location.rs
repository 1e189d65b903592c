//! Vanished location detection rule.
//!
//! Messages retired from the sources (vanished or obsolete) must not point
//! at source locations anymore.

use crate::{
    core::{CheckContext, catalog::Catalog},
    issues::VanishedLocationIssue,
    rules::helpers::{message_context, sort_by_context},
};

pub fn check_vanished_location_issues(ctx: &CheckContext) -> Vec<VanishedLocationIssue> {
    check_vanished_location(ctx.catalogs())
}

pub fn check_vanished_location(catalogs: &[Catalog]) -> Vec<VanishedLocationIssue> {
    let mut issues: Vec<VanishedLocationIssue> = catalogs
        .iter()
        .flat_map(|catalog| {
            catalog
                .messages()
                .filter(|(_, m)| !m.is_current() && !m.locations.is_empty())
                .map(move |(context, message)| VanishedLocationIssue {
                    context: message_context(catalog, context, message),
                    status: message.status(),
                    location_count: message.locations.len(),
                })
        })
        .collect();

    sort_by_context(&mut issues, |i| &i.context);
    issues
}
