//! Invalid location detection rule.
//!
//! `<location line>` must be a non-negative line number. Relative forms
//! written by `lupdate -locations relative` (`+3`, `-2`) are accepted.

use crate::{
    core::{
        CheckContext,
        catalog::{Catalog, Location},
    },
    issues::{InvalidLocationIssue, InvalidLocationReason},
    rules::helpers::{message_context, sort_by_context},
};

pub fn check_invalid_location_issues(ctx: &CheckContext) -> Vec<InvalidLocationIssue> {
    check_invalid_location(ctx.catalogs())
}

pub fn check_invalid_location(catalogs: &[Catalog]) -> Vec<InvalidLocationIssue> {
    let mut issues = Vec::new();

    for catalog in catalogs {
        for (context, message) in catalog.messages() {
            for location in &message.locations {
                if let Some(reason) = location_error(location) {
                    issues.push(InvalidLocationIssue {
                        context: message_context(catalog, context, message),
                        reason,
                    });
                }
            }
        }
    }

    sort_by_context(&mut issues, |i| &i.context);
    issues
}

fn location_error(location: &Location) -> Option<InvalidLocationReason> {
    if location.filename.as_deref() == Some("") {
        return Some(InvalidLocationReason::EmptyFilename);
    }
    let line = location.line.as_deref()?;
    let digits = line
        .strip_prefix('+')
        .or_else(|| line.strip_prefix('-'))
        .unwrap_or(line);
    let valid = !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit());
    (!valid).then(|| InvalidLocationReason::BadLine(line.to_string()))
}
