//! Empty source detection rule.
//!
//! A `<message>` is identified by its source phrase, so an empty `<source>`
//! leaves translators with nothing to translate and breaks lookups at runtime.

use crate::{
    core::{CheckContext, catalog::Catalog},
    issues::EmptySourceIssue,
    rules::helpers::{message_context, sort_by_context},
};

pub fn check_empty_source_issues(ctx: &CheckContext) -> Vec<EmptySourceIssue> {
    check_empty_source(ctx.catalogs())
}

/// Find messages whose source phrase is empty, whatever their status.
pub fn check_empty_source(catalogs: &[Catalog]) -> Vec<EmptySourceIssue> {
    let mut issues: Vec<EmptySourceIssue> = catalogs
        .iter()
        .flat_map(|catalog| {
            catalog
                .messages()
                .filter(|(_, message)| message.source.is_empty())
                .map(move |(context, message)| EmptySourceIssue {
                    context: message_context(catalog, context, message),
                })
        })
        .collect();

    sort_by_context(&mut issues, |i| &i.context);
    issues
}
