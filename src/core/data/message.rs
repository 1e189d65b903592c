/// Position information in a catalog (`.ts`) file.
///
/// Represents a specific location in a catalog, used for error reporting
/// when there are issues with a context or message.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MessageLocation {
    /// Path to the catalog file (e.g., "./translations/app_br.ts").
    pub file_path: String,
    /// Line of the `<message>` start tag (1-indexed).
    pub line: usize,
}

impl MessageLocation {
    pub fn new(file_path: impl Into<String>, line: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
        }
    }
}

/// Position of a message together with what identifies it to a translator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContext {
    pub location: MessageLocation,
    /// Name of the `<context>` owning the message (e.g., "CachePanel").
    pub context: String,
    /// The source phrase.
    pub source: String,
}

impl MessageContext {
    pub fn new(
        location: MessageLocation,
        context: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            location,
            context: context.into(),
            source: source.into(),
        }
    }

    // Convenience accessors
    pub fn file_path(&self) -> &str {
        &self.location.file_path
    }

    pub fn line(&self) -> usize {
        self.location.line
    }
}
