//! Qt Linguist `.ts` document parser.
//!
//! Streams the document with quick-xml and builds a [`Catalog`], recording the
//! line of every `<context>` and `<message>` so issues can point back into the
//! file. Structural problems (bad root, mismatched tags, a message without
//! `<source>`) abort parsing with a [`ParseError`]; content problems such as
//! an empty source are left for the rules to report.

use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context as _, Result};
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};
use thiserror::Error;
use tracing::debug;

use crate::{
    core::catalog::{
        Catalog, Context, Location, Message, Translation, TranslationText, TranslationType,
    },
    utils::{build_line_index, offset_to_line},
};

/// A document that is not a well-formed TS catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ParseError {
    /// 1-based line where the problem was detected.
    pub line: usize,
    pub message: String,
}

impl ParseError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Read and parse a catalog from disk.
pub fn parse_catalog_file(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
    let catalog = parse_catalog(&content, &path.to_string_lossy())?;
    Ok(catalog)
}

/// Parse catalog text. `file_path` is only recorded on the result.
pub fn parse_catalog(content: &str, file_path: &str) -> Result<Catalog, ParseError> {
    let mut parser = TsParser::new(content);
    parser.run()?;
    let mut catalog = parser
        .catalog
        .ok_or_else(|| ParseError::new(1, "missing <TS> root element"))?;
    catalog.file_path = file_path.to_string();
    Ok(catalog)
}

/// Partially built message; `source` stays `None` until `<source>` is seen.
#[derive(Default)]
struct PendingMessage {
    message: Message,
    source: Option<String>,
    numerus_forms: Vec<String>,
    has_translation: bool,
}

struct TsParser<'a> {
    reader: Reader<&'a [u8]>,
    line_index: Vec<usize>,
    stack: Vec<String>,
    catalog: Option<Catalog>,
    context: Option<Context>,
    message: Option<PendingMessage>,
    text: String,
}

impl<'a> TsParser<'a> {
    fn new(content: &'a str) -> Self {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(false);
        Self {
            reader,
            line_index: build_line_index(content),
            stack: Vec::new(),
            catalog: None,
            context: None,
            message: None,
            text: String::new(),
        }
    }

    fn line_at(&self, offset: usize) -> usize {
        offset_to_line(&self.line_index, offset.saturating_sub(1))
    }

    fn current_line(&self) -> usize {
        self.line_at(self.reader.buffer_position() as usize)
    }

    fn run(&mut self) -> Result<(), ParseError> {
        loop {
            let event = match self.reader.read_event() {
                Ok(event) => event,
                Err(err) => {
                    let line = self.line_at(self.reader.error_position() as usize);
                    return Err(ParseError::new(line, err.to_string()));
                }
            };
            match event {
                Event::Start(ref e) => {
                    let name = element_name(e);
                    self.start_element(&name, e)?;
                    self.stack.push(name);
                }
                Event::Empty(ref e) => {
                    let name = element_name(e);
                    self.start_element(&name, e)?;
                    self.end_element(&name)?;
                }
                Event::End(ref e) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    self.stack.pop();
                    self.end_element(&name)?;
                }
                Event::Text(ref e) => {
                    let text = e
                        .unescape()
                        .map_err(|err| ParseError::new(self.current_line(), err.to_string()))?;
                    self.text.push_str(&text);
                }
                Event::CData(ref e) => {
                    self.text.push_str(&String::from_utf8_lossy(e));
                }
                Event::Eof => break,
                // Declaration, doctype, comments and processing instructions carry no catalog data
                _ => {}
            }
        }

        if let Some(open) = self.stack.last() {
            return Err(ParseError::new(
                self.line_index.len(),
                format!("unexpected end of document, <{}> is not closed", open),
            ));
        }
        Ok(())
    }

    fn parent(&self) -> Option<&str> {
        self.stack.last().map(String::as_str)
    }

    fn start_element(&mut self, name: &str, e: &BytesStart<'_>) -> Result<(), ParseError> {
        let line = self.current_line();

        if self.catalog.is_none() {
            if name != "TS" || !self.stack.is_empty() {
                return Err(ParseError::new(
                    line,
                    format!("expected <TS> root element, found <{}>", name),
                ));
            }
            let mut attrs = attributes(e, line)?;
            self.catalog = Some(Catalog {
                version: attrs.remove("version").unwrap_or_default(),
                language: attrs.remove("language"),
                source_language: attrs.remove("sourcelanguage"),
                ..Default::default()
            });
            return Ok(());
        }

        match (self.parent(), name) {
            (Some("TS"), "context") => {
                self.context = Some(Context {
                    line,
                    ..Default::default()
                });
            }
            (Some("context"), "message") => {
                let mut attrs = attributes(e, line)?;
                let message = Message {
                    id: attrs.remove("id"),
                    numerus: attrs.remove("numerus").as_deref() == Some("yes"),
                    line,
                    ..Default::default()
                };
                self.message = Some(PendingMessage {
                    message,
                    ..Default::default()
                });
            }
            (Some("message"), "location") => {
                let mut attrs = attributes(e, line)?;
                if let Some(pending) = self.message.as_mut() {
                    pending.message.locations.push(Location {
                        filename: attrs.remove("filename"),
                        line: attrs.remove("line"),
                    });
                }
            }
            (Some("message"), "translation") => {
                let attrs = attributes(e, line)?;
                let kind_attr = attrs.get("type").map(String::as_str);
                let kind = TranslationType::from_attr(kind_attr).ok_or_else(|| {
                    ParseError::new(
                        line,
                        format!(
                            "unknown translation type \"{}\"",
                            kind_attr.unwrap_or_default()
                        ),
                    )
                })?;
                if let Some(pending) = self.message.as_mut() {
                    pending.message.translation.kind = kind;
                    pending.has_translation = true;
                }
                self.text.clear();
            }
            (Some("TS" | "context"), "message" | "context") => {
                return Err(ParseError::new(
                    line,
                    format!(
                        "<{}> is not allowed inside <{}>",
                        name,
                        self.parent().unwrap_or_default()
                    ),
                ));
            }
            (Some(_), "byte") => {
                let attrs = attributes(e, line)?;
                let value = attrs.get("value").map(String::as_str).unwrap_or_default();
                let ch = decode_byte(value).ok_or_else(|| {
                    ParseError::new(line, format!("invalid <byte> value \"{}\"", value))
                })?;
                self.text.push(ch);
            }
            (Some("translation"), "numerusform" | "lengthvariant") => {
                self.text.clear();
            }
            _ => {
                self.text.clear();
            }
        }
        Ok(())
    }

    fn end_element(&mut self, name: &str) -> Result<(), ParseError> {
        // <byte> contributes to the surrounding text
        if name == "byte" {
            return Ok(());
        }
        let line = self.current_line();
        let text = std::mem::take(&mut self.text);

        match (self.parent(), name) {
            (_, "TS") | (_, "location") => {}
            (Some("TS"), "context") => {
                if let (Some(context), Some(catalog)) = (self.context.take(), self.catalog.as_mut())
                {
                    catalog.contexts.push(context);
                }
            }
            (Some("context"), "name") => {
                if let Some(context) = self.context.as_mut() {
                    context.name = text;
                }
            }
            (Some("context"), "comment") => {
                if let Some(context) = self.context.as_mut() {
                    context.comment = Some(text);
                }
            }
            (Some("context"), "message") => {
                let Some(pending) = self.message.take() else {
                    return Ok(());
                };
                let Some(source) = pending.source else {
                    return Err(ParseError::new(line, "<message> without <source>"));
                };
                let mut message = pending.message;
                message.source = source;
                if !pending.numerus_forms.is_empty() {
                    message.translation.text = TranslationText::Numerus(pending.numerus_forms);
                }
                if !pending.has_translation {
                    message.translation = Translation::unfinished();
                }
                if let Some(context) = self.context.as_mut() {
                    context.messages.push(message);
                }
            }
            (Some("message"), field) => {
                if let Some(pending) = self.message.as_mut() {
                    let message = &mut pending.message;
                    match field {
                        "source" => pending.source = Some(text),
                        "oldsource" => message.old_source = Some(text),
                        "comment" => message.comment = Some(text),
                        "oldcomment" => message.old_comment = Some(text),
                        "extracomment" => message.extra_comment = Some(text),
                        "translatorcomment" => message.translator_comment = Some(text),
                        "translation" => {
                            if pending.numerus_forms.is_empty() {
                                message.translation.text = TranslationText::Single(text);
                            }
                        }
                        other => debug!(element = other, line, "skipping unknown message element"),
                    }
                }
            }
            (Some("translation"), "numerusform") => {
                if let Some(pending) = self.message.as_mut() {
                    pending.numerus_forms.push(text);
                }
            }
            (_, other) => debug!(element = other, line, "skipping unknown element"),
        }
        Ok(())
    }
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn attributes(e: &BytesStart<'_>, line: usize) -> Result<HashMap<String, String>, ParseError> {
    let mut attrs = HashMap::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| ParseError::new(line, err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| ParseError::new(line, err.to_string()))?
            .into_owned();
        attrs.insert(key, value);
    }
    Ok(attrs)
}

/// Decode lupdate's `<byte value="x1b"/>` (hex with `x` prefix, else decimal).
fn decode_byte(value: &str) -> Option<char> {
    let code = match value.strip_prefix('x') {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => value.parse().ok()?,
    };
    char::from_u32(code)
}
