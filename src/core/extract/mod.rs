//! Extraction of translatable strings from Python sources.
//!
//! Recognises the calls PySide/PyQt applications use to mark UI text:
//!
//! - `self.tr("text")` / `self.tr("text", "disambiguation")`, context is the
//!   enclosing class
//! - `Name.tr("text")`, context is `Name` (e.g. `QObject.tr(...)`)
//! - `QCoreApplication.translate("Context", "text"[, "disambiguation"])`
//!
//! Only literal arguments are extracted; calls built from variables or
//! f-strings cannot be known statically and are skipped.

use std::{
    collections::{BTreeMap, HashSet},
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use rayon::prelude::*;
use regex::Regex;
use tracing::{debug, warn};

use crate::{
    core::{
        catalog::{Catalog, Location, Message, MessageKey},
        parsers::python::{ArgReader, PythonSource, indent_width},
    },
    issues::{ParseErrorFileType, ParseErrorIssue},
    utils::to_slash,
};

static CALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Za-z_][A-Za-z0-9_]*)\s*\.\s*(tr|translate)\s*\(").unwrap()
});

static CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*class\s+([A-Za-z_][A-Za-z0-9_]*)").unwrap());

/// One translatable string found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedMessage {
    pub context: String,
    pub source: String,
    pub comment: Option<String>,
    pub file_path: String,
    /// 1-based line of the call.
    pub line: usize,
}

/// Result of extracting from a set of files.
#[derive(Debug, Default)]
pub struct ExtractResult {
    pub messages: Vec<ExtractedMessage>,
    pub errors: Vec<ParseErrorIssue>,
}

/// Extract from every file in parallel. Unreadable files become parse errors.
pub fn extract_files(files: &HashSet<String>) -> ExtractResult {
    let results: Vec<_> = files
        .par_iter()
        .map(|file_path| {
            let content = fs::read_to_string(file_path);
            (file_path, content)
        })
        .collect();

    let mut result = ExtractResult::default();
    for (file_path, content) in results {
        match content {
            Ok(content) => result
                .messages
                .extend(extract_from_source(&content, file_path)),
            Err(err) => {
                warn!(file = %file_path, error = %err, "cannot read source file");
                result.errors.push(ParseErrorIssue {
                    file_path: file_path.clone(),
                    error: format!("Failed to read file: {}", err),
                    file_type: ParseErrorFileType::Source,
                });
            }
        }
    }
    debug!(
        files = files.len(),
        messages = result.messages.len(),
        "extraction finished"
    );
    result
}

/// Extract translatable strings from one Python file.
pub fn extract_from_source(content: &str, file_path: &str) -> Vec<ExtractedMessage> {
    let source = PythonSource::new(content);
    let classes = enclosing_classes(&source);
    let mut messages = Vec::new();

    for caps in CALL_RE.captures_iter(content) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if source.is_non_code(whole.start()) {
            continue;
        }
        let receiver = &caps[1];
        let method = &caps[2];
        let line = source.line_of(whole.start());
        let mut args = ArgReader::new(content, whole.end());

        let extracted = match method {
            "tr" => {
                let context = if receiver == "self" {
                    match classes.get(line.saturating_sub(1)).cloned().flatten() {
                        Some(class) => class,
                        None => {
                            debug!(file = file_path, line, "self.tr() outside of a class");
                            continue;
                        }
                    }
                } else {
                    receiver.to_string()
                };
                args.string_arg().map(|text| {
                    let comment = if args.comma() { args.string_arg() } else { None };
                    (context, text, comment)
                })
            }
            _ if receiver.ends_with("Application") => {
                let context = args.string_arg();
                let text = if args.comma() { args.string_arg() } else { None };
                let comment = if args.comma() { args.string_arg() } else { None };
                context.zip(text).map(|(context, text)| (context, text, comment))
            }
            _ => continue,
        };

        match extracted {
            Some((context, source_text, comment)) => messages.push(ExtractedMessage {
                context,
                source: source_text,
                comment,
                file_path: file_path.to_string(),
                line,
            }),
            None => debug!(file = file_path, line, "skipping non-literal translation call"),
        }
    }

    messages
}

/// Innermost class enclosing each line (index = line - 1).
fn enclosing_classes(source: &PythonSource<'_>) -> Vec<Option<String>> {
    let line_count = source.content.lines().count() + 1;
    let mut result = vec![None; line_count];
    let mut stack: Vec<(usize, String)> = Vec::new();
    let mut last_line = 0;

    for (line, text) in source.logical_lines() {
        let trimmed = text.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let current = stack.last().map(|(_, name)| name.clone());
        for slot in result.iter_mut().take(line - 1).skip(last_line) {
            *slot = current.clone();
        }

        let indent = indent_width(text);
        while stack.last().is_some_and(|(class_indent, _)| *class_indent >= indent) {
            stack.pop();
        }
        if let Some(caps) = CLASS_RE.captures(text) {
            stack.push((indent, caps[1].to_string()));
        }
        last_line = line - 1;
    }

    let current = stack.last().map(|(_, name)| name.clone());
    for slot in result.iter_mut().skip(last_line) {
        *slot = current.clone();
    }
    result
}

/// Build a template catalog from extracted strings.
///
/// Location filenames are made relative to `catalog_dir`, the directory the
/// catalog will be written to. Identical strings in one context are folded
/// into a single message carrying every location.
pub fn build_template(messages: &[ExtractedMessage], catalog_dir: &Path) -> Catalog {
    let base = absolute(catalog_dir);
    let mut grouped: BTreeMap<&str, BTreeMap<MessageKey, Vec<Location>>> = BTreeMap::new();

    for extracted in messages {
        let file = Path::new(&extracted.file_path);
        let file = absolute(file);
        let relative = pathdiff::diff_paths(&file, &base).unwrap_or(file);

        grouped
            .entry(extracted.context.as_str())
            .or_default()
            .entry(MessageKey {
                source: extracted.source.clone(),
                comment: extracted.comment.clone(),
            })
            .or_default()
            .push(Location::new(to_slash(&relative), extracted.line));
    }

    let mut catalog = Catalog::new(None);
    for (context_name, keyed) in grouped {
        let mut context_messages: Vec<Message> = keyed
            .into_iter()
            .map(|(key, mut locations)| {
                locations.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
                locations.dedup();
                Message {
                    locations,
                    comment: key.comment,
                    ..Message::new(key.source)
                }
            })
            .collect();
        context_messages.sort_by(|a, b| {
            let a_key = a.first_location().map(Location::sort_key);
            let b_key = b.first_location().map(Location::sort_key);
            a_key.cmp(&b_key).then_with(|| a.source.cmp(&b.source))
        });
        catalog.context_mut_or_insert(context_name).messages = context_messages;
    }
    catalog
}

/// Canonical path if it exists, otherwise the path made absolute.
fn absolute(path: &Path) -> PathBuf {
    fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
