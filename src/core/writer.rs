//! Serialize a [`Catalog`] in the layout lupdate produces.
//!
//! Output is stable: a catalog parsed from a lupdate-written file is written
//! back byte for byte, so `update` and `clean` only produce diffs where the
//! content actually changed.

use std::{fmt::Write as _, fs, path::Path};

use anyhow::{Context as _, Result};

use crate::core::catalog::{Catalog, Message, TranslationText};

const INDENT: &str = "    ";

pub fn write_catalog(catalog: &Catalog) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    out.push_str("<!DOCTYPE TS>\n");

    let _ = write!(out, "<TS version=\"{}\"", escape(&catalog.version));
    if let Some(language) = &catalog.language {
        let _ = write!(out, " language=\"{}\"", escape(language));
    }
    if let Some(source_language) = &catalog.source_language {
        let _ = write!(out, " sourcelanguage=\"{}\"", escape(source_language));
    }
    out.push_str(">\n");

    for context in &catalog.contexts {
        out.push_str("<context>\n");
        write_element(&mut out, 1, "name", &context.name);
        if let Some(comment) = &context.comment {
            write_element(&mut out, 1, "comment", comment);
        }
        for message in &context.messages {
            write_message(&mut out, message);
        }
        out.push_str("</context>\n");
    }

    out.push_str("</TS>\n");
    out
}

pub fn write_catalog_file(path: impl AsRef<Path>, catalog: &Catalog) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, write_catalog(catalog))
        .with_context(|| format!("Failed to write catalog: {}", path.display()))
}

fn write_message(out: &mut String, message: &Message) {
    let _ = write!(out, "{}<message", INDENT);
    if let Some(id) = &message.id {
        let _ = write!(out, " id=\"{}\"", escape(id));
    }
    if message.numerus {
        out.push_str(" numerus=\"yes\"");
    }
    out.push_str(">\n");

    for location in &message.locations {
        let _ = write!(out, "{}<location", INDENT.repeat(2));
        if let Some(filename) = &location.filename {
            let _ = write!(out, " filename=\"{}\"", escape(filename));
        }
        if let Some(line) = &location.line {
            let _ = write!(out, " line=\"{}\"", escape(line));
        }
        out.push_str("/>\n");
    }

    write_element(out, 2, "source", &message.source);
    let optional = [
        ("oldsource", &message.old_source),
        ("comment", &message.comment),
        ("oldcomment", &message.old_comment),
        ("extracomment", &message.extra_comment),
        ("translatorcomment", &message.translator_comment),
    ];
    for (tag, value) in optional {
        if let Some(value) = value {
            write_element(out, 2, tag, value);
        }
    }

    let indent = INDENT.repeat(2);
    let type_attr = message
        .translation
        .kind
        .as_attr()
        .map(|t| format!(" type=\"{}\"", t))
        .unwrap_or_default();
    match &message.translation.text {
        TranslationText::Single(text) => {
            let _ = writeln!(
                out,
                "{}<translation{}>{}</translation>",
                indent,
                type_attr,
                escape(text)
            );
        }
        TranslationText::Numerus(forms) => {
            let _ = writeln!(out, "{}<translation{}>", indent, type_attr);
            for form in forms {
                write_element(out, 3, "numerusform", form);
            }
            let _ = writeln!(out, "{}</translation>", indent);
        }
    }

    let _ = writeln!(out, "{}</message>", INDENT);
}

fn write_element(out: &mut String, depth: usize, tag: &str, text: &str) {
    let _ = writeln!(
        out,
        "{}<{tag}>{}</{tag}>",
        INDENT.repeat(depth),
        escape(text),
        tag = tag
    );
}

/// Escape text the way lupdate does, including `'` and control characters.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "<byte value=\"x{:x}\"/>", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}
