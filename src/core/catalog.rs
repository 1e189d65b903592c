//! In-memory model of a Qt Linguist translation catalog (`.ts` document).
//!
//! A [`Catalog`] holds an ordered list of [`Context`]s, each holding an
//! ordered list of [`Message`]s. Order is significant: it is preserved on
//! parse and reproduced on write so that round-trips are byte-identical.

use serde::Serialize;

/// Format version written by this crate.
pub const TS_VERSION: &str = "2.1";

/// Status of a translation, as carried by `<translation type="...">`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationType {
    /// No `type` attribute: the translator marked the message done.
    Finished,
    Unfinished,
    /// Source string gone from the application, translation was finished.
    Vanished,
    /// Source string gone from the application, translation was unfinished.
    Obsolete,
}

impl TranslationType {
    /// Parse the `type` attribute. `None` means the attribute was absent.
    pub fn from_attr(value: Option<&str>) -> Option<Self> {
        match value {
            None => Some(Self::Finished),
            Some("unfinished") => Some(Self::Unfinished),
            Some("vanished") => Some(Self::Vanished),
            Some("obsolete") => Some(Self::Obsolete),
            Some(_) => None,
        }
    }

    /// Attribute text, `None` for finished translations.
    pub fn as_attr(self) -> Option<&'static str> {
        match self {
            Self::Finished => None,
            Self::Unfinished => Some("unfinished"),
            Self::Vanished => Some("vanished"),
            Self::Obsolete => Some("obsolete"),
        }
    }

    /// True for finished or unfinished entries still referenced by the application.
    pub fn is_current(self) -> bool {
        matches!(self, Self::Finished | Self::Unfinished)
    }

    /// State a current entry moves to when its source string disappears.
    pub fn retired(self) -> Self {
        match self {
            Self::Finished | Self::Vanished => Self::Vanished,
            Self::Unfinished | Self::Obsolete => Self::Obsolete,
        }
    }

    /// State a retired entry moves back to when its source string reappears.
    pub fn revived(self) -> Self {
        match self {
            Self::Finished | Self::Vanished => Self::Finished,
            Self::Unfinished | Self::Obsolete => Self::Unfinished,
        }
    }
}

impl std::fmt::Display for TranslationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Finished => write!(f, "finished"),
            Self::Unfinished => write!(f, "unfinished"),
            Self::Vanished => write!(f, "vanished"),
            Self::Obsolete => write!(f, "obsolete"),
        }
    }
}

/// Translated text of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationText {
    Single(String),
    /// One entry per plural form of the target language.
    Numerus(Vec<String>),
}

impl TranslationText {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(text) => text.is_empty(),
            Self::Numerus(forms) => forms.iter().all(String::is_empty),
        }
    }

    /// All non-plural and plural texts, in document order.
    pub fn texts(&self) -> Vec<&str> {
        match self {
            Self::Single(text) => vec![text.as_str()],
            Self::Numerus(forms) => forms.iter().map(String::as_str).collect(),
        }
    }
}

impl Default for TranslationText {
    fn default() -> Self {
        Self::Single(String::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub kind: TranslationType,
    pub text: TranslationText,
}

impl Translation {
    pub fn unfinished() -> Self {
        Self {
            kind: TranslationType::Unfinished,
            text: TranslationText::default(),
        }
    }

    pub fn finished(text: impl Into<String>) -> Self {
        Self {
            kind: TranslationType::Finished,
            text: TranslationText::Single(text.into()),
        }
    }
}

/// Where a source string was found in the application sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub filename: Option<String>,
    /// Literal `line` attribute. lupdate writes either an absolute line or,
    /// with `-locations relative`, a signed offset such as `+3`.
    pub line: Option<String>,
}

impl Location {
    pub fn new(filename: impl Into<String>, line: usize) -> Self {
        Self {
            filename: Some(filename.into()),
            line: Some(line.to_string()),
        }
    }

    /// Absolute line number, if the attribute holds one.
    pub fn line_number(&self) -> Option<usize> {
        self.line.as_deref().and_then(|l| l.parse().ok())
    }

    /// Key used to order messages by where they appear in the sources.
    pub fn sort_key(&self) -> (&str, usize) {
        (
            self.filename.as_deref().unwrap_or(""),
            self.line_number().unwrap_or(0),
        )
    }
}

/// Identity of a message inside a context: source text plus disambiguation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageKey {
    pub source: String,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    pub id: Option<String>,
    pub numerus: bool,
    pub locations: Vec<Location>,
    pub source: String,
    pub old_source: Option<String>,
    pub comment: Option<String>,
    pub old_comment: Option<String>,
    pub extra_comment: Option<String>,
    pub translator_comment: Option<String>,
    pub translation: Translation,
    /// 1-based line of `<message>` in the document, 0 for in-memory messages.
    pub line: usize,
}

impl Default for Translation {
    fn default() -> Self {
        Self::unfinished()
    }
}

impl Message {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    pub fn key(&self) -> MessageKey {
        MessageKey {
            source: self.source.clone(),
            comment: self.comment.clone(),
        }
    }

    pub fn status(&self) -> TranslationType {
        self.translation.kind
    }

    pub fn is_current(&self) -> bool {
        self.translation.kind.is_current()
    }

    /// First location, used to position the message among its siblings.
    pub fn first_location(&self) -> Option<&Location> {
        self.locations.first()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Context {
    pub name: String,
    pub comment: Option<String>,
    pub messages: Vec<Message>,
    /// 1-based line of `<context>` in the document, 0 for in-memory contexts.
    pub line: usize,
}

impl Context {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn find(&self, key: &MessageKey) -> Option<&Message> {
        self.messages
            .iter()
            .find(|m| m.source == key.source && m.comment == key.comment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub version: String,
    pub language: Option<String>,
    pub source_language: Option<String>,
    pub contexts: Vec<Context>,
    /// Path the catalog was loaded from, empty for in-memory catalogs.
    pub file_path: String,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            version: TS_VERSION.to_string(),
            language: None,
            source_language: None,
            contexts: Vec::new(),
            file_path: String::new(),
        }
    }
}

impl Catalog {
    pub fn new(language: Option<&str>) -> Self {
        Self {
            language: language.map(String::from),
            ..Default::default()
        }
    }

    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|c| c.name == name)
    }

    /// Get the named context, inserting it in name order if missing.
    pub fn context_mut_or_insert(&mut self, name: &str) -> &mut Context {
        let index = match self.contexts.iter().position(|c| c.name == name) {
            Some(index) => index,
            None => {
                let index = self
                    .contexts
                    .iter()
                    .position(|c| c.name.as_str() > name)
                    .unwrap_or(self.contexts.len());
                self.contexts.insert(index, Context::new(name));
                index
            }
        };
        &mut self.contexts[index]
    }

    /// All messages together with the context that owns them.
    pub fn messages(&self) -> impl Iterator<Item = (&Context, &Message)> {
        self.contexts
            .iter()
            .flat_map(|c| c.messages.iter().map(move |m| (c, m)))
    }

    pub fn message_count(&self) -> usize {
        self.contexts.iter().map(|c| c.messages.len()).sum()
    }

    pub fn stats(&self) -> CatalogStats {
        let mut stats = CatalogStats {
            file_path: self.file_path.clone(),
            language: self.language.clone(),
            ..Default::default()
        };
        for (_, message) in self.messages() {
            match message.status() {
                TranslationType::Finished => stats.finished += 1,
                TranslationType::Unfinished => stats.unfinished += 1,
                TranslationType::Vanished => stats.vanished += 1,
                TranslationType::Obsolete => stats.obsolete += 1,
            }
        }
        stats.contexts = self.contexts.len();
        stats
    }
}

/// Guess the target language from a catalog file name.
///
/// Follows the `<app>_<lang>[_<COUNTRY>].ts` naming lupdate users adopt:
/// `app_br.ts` gives `br`, `app_pt_BR.ts` gives `pt_BR`.
pub fn language_from_file_name(path: &str) -> Option<String> {
    let stem = std::path::Path::new(path).file_stem()?.to_str()?;
    let parts: Vec<&str> = stem.split('_').collect();
    let is_lang = |s: &str| (2..=3).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_lowercase());
    let is_country = |s: &str| s.len() == 2 && s.bytes().all(|b| b.is_ascii_uppercase());

    match parts.as_slice() {
        [.., _, lang, country] if is_lang(*lang) && is_country(*country) => {
            Some(format!("{}_{}", lang, country))
        }
        [_, .., lang] if is_lang(*lang) => Some(lang.to_string()),
        _ => None,
    }
}

/// Translation progress of one catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub file_path: String,
    pub language: Option<String>,
    pub contexts: usize,
    pub finished: usize,
    pub unfinished: usize,
    pub vanished: usize,
    pub obsolete: usize,
}

impl CatalogStats {
    /// Messages still referenced by the application.
    pub fn current(&self) -> usize {
        self.finished + self.unfinished
    }

    /// Finished share of current messages, in percent. 100 for an empty catalog.
    pub fn completion(&self) -> f64 {
        let current = self.current();
        if current == 0 {
            100.0
        } else {
            self.finished as f64 * 100.0 / current as f64
        }
    }
}
