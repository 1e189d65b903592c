//! Merge freshly extracted strings into an existing catalog.
//!
//! Messages are matched by context name and `(source, comment)`. Matched
//! messages keep their translation and take the template's locations.
//! Messages no longer present in the sources are retired (`finished` →
//! `vanished`, `unfinished` → `obsolete`) and come back to life if their
//! source string reappears.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::core::catalog::{
    Catalog, Context, Message, MessageKey, TS_VERSION, Translation, TranslationText,
    TranslationType,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOptions {
    /// Drop vanished and obsolete messages instead of keeping them.
    pub no_obsolete: bool,
    /// Pre-fill new messages whose source text already has a finished
    /// translation in another context.
    pub same_text_heuristic: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            no_obsolete: false,
            same_text_heuristic: true,
        }
    }
}

/// What a merge did, in the terms lupdate reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Messages in the template.
    pub found: usize,
    pub new: usize,
    pub existing: usize,
    /// New messages pre-filled from an identical source elsewhere.
    pub same_text: usize,
    /// Current messages retired because their source string disappeared.
    pub obsoleted: usize,
    /// Retired messages made current again.
    pub revived: usize,
    /// Messages dropped from the catalog.
    pub removed: usize,
}

impl MergeStats {
    /// True if merging changed anything beyond locations.
    pub fn has_changes(&self) -> bool {
        self.new > 0 || self.obsoleted > 0 || self.revived > 0 || self.removed > 0
    }
}

impl std::ops::AddAssign for MergeStats {
    fn add_assign(&mut self, rhs: Self) {
        self.found += rhs.found;
        self.new += rhs.new;
        self.existing += rhs.existing;
        self.same_text += rhs.same_text;
        self.obsoleted += rhs.obsoleted;
        self.revived += rhs.revived;
        self.removed += rhs.removed;
    }
}

pub fn merge(existing: &Catalog, template: &Catalog, options: MergeOptions) -> (Catalog, MergeStats) {
    let mut stats = MergeStats {
        found: template.message_count(),
        ..Default::default()
    };

    let template_index: HashMap<(&str, MessageKey), &Message> = template
        .messages()
        .map(|(ctx, msg)| ((ctx.name.as_str(), msg.key()), msg))
        .collect();
    let known_texts = finished_translations(existing);
    let mut used: HashSet<(&str, MessageKey)> = HashSet::new();

    let mut result = Catalog {
        version: TS_VERSION.to_string(),
        language: existing.language.clone(),
        source_language: existing.source_language.clone(),
        contexts: Vec::new(),
        file_path: existing.file_path.clone(),
    };

    for context in &existing.contexts {
        let mut merged = Context {
            name: context.name.clone(),
            comment: context.comment.clone(),
            messages: Vec::new(),
            line: context.line,
        };

        for message in &context.messages {
            let lookup = (context.name.as_str(), message.key());
            if used.contains(&lookup) {
                debug!(
                    context = %context.name,
                    source = %message.source,
                    "dropping duplicate message"
                );
                stats.removed += 1;
                continue;
            }

            match template_index.get(&lookup).copied() {
                Some(fresh) => {
                    let mut updated = message.clone();
                    updated.locations = fresh.locations.clone();
                    updated.extra_comment = fresh.extra_comment.clone();
                    if !message.is_current() {
                        debug!(context = %context.name, source = %message.source, "reviving message");
                        stats.revived += 1;
                    }
                    updated.translation.kind = message.status().revived();
                    stats.existing += 1;
                    used.insert(lookup);
                    merged.messages.push(updated);
                }
                None if message.is_current() => {
                    if message.status() == TranslationType::Unfinished
                        && message.translation.text.is_empty()
                    {
                        stats.removed += 1;
                        continue;
                    }
                    stats.obsoleted += 1;
                    if options.no_obsolete {
                        stats.removed += 1;
                        continue;
                    }
                    let mut retired = message.clone();
                    retired.locations.clear();
                    retired.translation.kind = message.status().retired();
                    merged.messages.push(retired);
                }
                None => {
                    if options.no_obsolete {
                        stats.removed += 1;
                    } else {
                        merged.messages.push(message.clone());
                    }
                }
            }
        }

        result.contexts.push(merged);
    }

    for template_context in &template.contexts {
        for fresh in &template_context.messages {
            let lookup = (template_context.name.as_str(), fresh.key());
            if used.contains(&lookup) {
                continue;
            }
            used.insert(lookup);

            let mut message = Message {
                id: fresh.id.clone(),
                numerus: fresh.numerus,
                locations: fresh.locations.clone(),
                comment: fresh.comment.clone(),
                extra_comment: fresh.extra_comment.clone(),
                translation: Translation::unfinished(),
                ..Message::new(fresh.source.clone())
            };
            if options.same_text_heuristic
                && !fresh.numerus
                && let Some(text) = known_texts.get(fresh.source.as_str())
            {
                message.translation.text = TranslationText::Single((*text).to_string());
                stats.same_text += 1;
            }
            stats.new += 1;

            let context = result.context_mut_or_insert(&template_context.name);
            insert_by_location(context, message);
        }
    }

    result.contexts.retain(|c| !c.messages.is_empty());
    debug!(?stats, file = %existing.file_path, "merge finished");
    (result, stats)
}

/// Remove vanished and obsolete messages. Returns how many were dropped.
pub fn drop_obsolete(catalog: &mut Catalog) -> usize {
    let before = catalog.message_count();
    for context in &mut catalog.contexts {
        context.messages.retain(Message::is_current);
    }
    catalog.contexts.retain(|c| !c.messages.is_empty());
    before - catalog.message_count()
}

/// Finished (or vanished) single-form translations by source text.
fn finished_translations(catalog: &Catalog) -> HashMap<&str, &str> {
    let mut texts = HashMap::new();
    for (_, message) in catalog.messages() {
        if matches!(
            message.status(),
            TranslationType::Finished | TranslationType::Vanished
        ) && let TranslationText::Single(text) = &message.translation.text
            && !text.is_empty()
        {
            texts.entry(message.source.as_str()).or_insert(text.as_str());
        }
    }
    texts
}

/// Insert before the first located sibling that sorts after `message`.
fn insert_by_location(context: &mut Context, message: Message) {
    let Some(key) = message.first_location().map(|l| l.sort_key()) else {
        context.messages.push(message);
        return;
    };
    let index = context
        .messages
        .iter()
        .position(|m| m.first_location().is_some_and(|l| l.sort_key() > key))
        .unwrap_or(context.messages.len());
    context.messages.insert(index, message);
}
