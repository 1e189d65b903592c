//! Placeholder mismatch detection rule.
//!
//! The application fills translated strings with `str.format()` (`{}`,
//! `{name}`) or Qt's `QString::arg()` (`%1`, `%L2`). A finished translation
//! must keep the placeholders of its source, or formatting fails at runtime.

use std::{collections::BTreeMap, sync::LazyLock};

use regex::Regex;

use crate::{
    core::{
        CheckContext,
        catalog::{Catalog, TranslationType},
    },
    issues::PlaceholderMismatchIssue,
    rules::helpers::{message_context, sort_by_context},
};

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{|\}\}|\{([A-Za-z_][A-Za-z0-9_]*|\d+)?(?:![rsa])?(?::[^{}]*)?\}|%L?(\d{1,2})")
        .unwrap()
});

pub fn check_placeholder_mismatch_issues(ctx: &CheckContext) -> Vec<PlaceholderMismatchIssue> {
    if !ctx.config.check_placeholders {
        return Vec::new();
    }
    check_placeholder_mismatch(ctx.catalogs())
}

pub fn check_placeholder_mismatch(catalogs: &[Catalog]) -> Vec<PlaceholderMismatchIssue> {
    let mut issues = Vec::new();

    for catalog in catalogs {
        for (context, message) in catalog.messages() {
            if message.status() != TranslationType::Finished {
                continue;
            }
            let expected = placeholders(&message.source);
            for text in message.translation.text.texts() {
                let (missing, unexpected) = diff(&expected, &placeholders(text));
                if !missing.is_empty() || !unexpected.is_empty() {
                    issues.push(PlaceholderMismatchIssue {
                        context: message_context(catalog, context, message),
                        missing,
                        unexpected,
                    });
                    break;
                }
            }
        }
    }

    sort_by_context(&mut issues, |i| &i.context);
    issues
}

/// Placeholders of a text with their occurrence count.
///
/// Positional `{}` fields count every occurrence. Named fields and Qt args
/// may repeat freely, so they count once.
pub fn placeholders(text: &str) -> BTreeMap<String, usize> {
    let mut found = BTreeMap::new();
    for caps in PLACEHOLDER_RE.captures_iter(text) {
        let whole = &caps[0];
        if whole == "{{" || whole == "}}" {
            continue;
        }
        let (key, repeatable) = match (caps.get(1), caps.get(2)) {
            (_, Some(arg)) => (format!("%{}", arg.as_str()), false),
            (Some(name), None) => (format!("{{{}}}", name.as_str()), false),
            (None, None) => ("{}".to_string(), true),
        };
        let count = found.entry(key).or_insert(0);
        if repeatable || *count == 0 {
            *count += 1;
        }
    }
    found
}

fn diff(
    expected: &BTreeMap<String, usize>,
    actual: &BTreeMap<String, usize>,
) -> (Vec<String>, Vec<String>) {
    let surplus = |from: &BTreeMap<String, usize>, other: &BTreeMap<String, usize>| {
        from.iter()
            .flat_map(|(key, &count)| {
                let extra = count.saturating_sub(other.get(key).copied().unwrap_or(0));
                std::iter::repeat_n(key.clone(), extra)
            })
            .collect::<Vec<_>>()
    };
    (surplus(expected, actual), surplus(actual, expected))
}
