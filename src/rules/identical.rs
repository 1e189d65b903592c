//! Identical translation detection rule.
//!
//! A finished translation equal to its source often means the translator
//! copied the phrase and never came back to it. Phrases without letters
//! (`"%1 %"`, `"..."`) and texts listed in `ignoreTexts` are skipped.

use std::collections::HashSet;

use crate::{
    core::{
        CheckContext,
        catalog::{Catalog, TranslationType},
    },
    issues::IdenticalTranslationIssue,
    rules::helpers::{message_context, sort_by_context},
    utils::contains_alphabetic,
};

pub fn check_identical_translation_issues(ctx: &CheckContext) -> Vec<IdenticalTranslationIssue> {
    check_identical_translation(ctx.catalogs(), &ctx.ignore_texts)
}

pub fn check_identical_translation(
    catalogs: &[Catalog],
    ignore_texts: &HashSet<String>,
) -> Vec<IdenticalTranslationIssue> {
    let mut issues: Vec<IdenticalTranslationIssue> = catalogs
        .iter()
        .flat_map(|catalog| {
            catalog
                .messages()
                .filter(|(_, m)| {
                    m.status() == TranslationType::Finished
                        && contains_alphabetic(&m.source)
                        && !ignore_texts.contains(&m.source)
                        && !m.translation.text.is_empty()
                        && m.translation.text.texts().iter().all(|t| *t == m.source)
                })
                .map(move |(context, message)| IdenticalTranslationIssue {
                    context: message_context(catalog, context, message),
                })
        })
        .collect();

    sort_by_context(&mut issues, |i| &i.context);
    issues
}
