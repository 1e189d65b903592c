//! Duplicate message detection rule.
//!
//! Within one context, a source phrase and disambiguation pair identifies a
//! message. Two current messages with the same pair make the runtime lookup
//! ambiguous.

use std::collections::HashMap;

use crate::{
    core::{CheckContext, catalog::Catalog},
    issues::DuplicateMessageIssue,
    rules::helpers::{message_context, sort_by_context},
};

pub fn check_duplicate_message_issues(ctx: &CheckContext) -> Vec<DuplicateMessageIssue> {
    check_duplicate_message(ctx.catalogs())
}

pub fn check_duplicate_message(catalogs: &[Catalog]) -> Vec<DuplicateMessageIssue> {
    let mut issues = Vec::new();

    for catalog in catalogs {
        for context in &catalog.contexts {
            let mut first_lines = HashMap::new();
            for message in context.messages.iter().filter(|m| m.is_current()) {
                match first_lines.get(&message.key()) {
                    Some(&first_line) => issues.push(DuplicateMessageIssue {
                        context: message_context(catalog, context, message),
                        comment: message.comment.clone(),
                        first_line,
                    }),
                    None => {
                        first_lines.insert(message.key(), message.line);
                    }
                }
            }
        }
    }

    sort_by_context(&mut issues, |i| &i.context);
    issues
}
