//! Issue types for catalog analysis results.
//!
//! This module defines all issue types that can be detected while checking
//! translation catalogs. Each issue is self-contained with all information
//! needed by the reporter to display it.

use enum_dispatch::enum_dispatch;

use crate::core::{MessageContext, TranslationType};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    EmptySource,
    InvalidLocation,
    VanishedLocation,
    DuplicateMessage,
    Unfinished,
    IdenticalTranslation,
    PlaceholderMismatch,
    MissingLanguage,
    UnsupportedVersion,
    ObsoleteEntry,
    ParseError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::EmptySource => write!(f, "empty-source"),
            Rule::InvalidLocation => write!(f, "invalid-location"),
            Rule::VanishedLocation => write!(f, "vanished-location"),
            Rule::DuplicateMessage => write!(f, "duplicate-message"),
            Rule::Unfinished => write!(f, "unfinished"),
            Rule::IdenticalTranslation => write!(f, "identical-translation"),
            Rule::PlaceholderMismatch => write!(f, "placeholder-mismatch"),
            Rule::MissingLanguage => write!(f, "missing-language"),
            Rule::UnsupportedVersion => write!(f, "unsupported-version"),
            Rule::ObsoleteEntry => write!(f, "obsolete-entry"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

// ============================================================
// Invalid Location Reason
// ============================================================

/// Why a `<location>` element is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidLocationReason {
    /// `line` is neither a non-negative integer nor a `+N`/`-N` offset.
    BadLine(String),
    /// `filename` attribute present but empty.
    EmptyFilename,
}

impl std::fmt::Display for InvalidLocationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidLocationReason::BadLine(line) => write!(f, "invalid line \"{}\"", line),
            InvalidLocationReason::EmptyFilename => write!(f, "empty filename"),
        }
    }
}

// ============================================================
// Issue Types - Messages (MessageContext)
// ============================================================

/// Message whose `<source>` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptySourceIssue {
    pub context: MessageContext,
}

impl EmptySourceIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::EmptySource
    }
}

/// `<location>` with an unusable `line` or `filename`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidLocationIssue {
    pub context: MessageContext,
    pub reason: InvalidLocationReason,
}

impl InvalidLocationIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::InvalidLocation
    }
}

/// Vanished or obsolete message that still points into the sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VanishedLocationIssue {
    pub context: MessageContext,
    pub status: TranslationType,
    pub location_count: usize,
}

impl VanishedLocationIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::VanishedLocation
    }
}

/// Same source and disambiguation appearing twice as current in one context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateMessageIssue {
    pub context: MessageContext,
    pub comment: Option<String>,
    /// Line of the first occurrence.
    pub first_line: usize,
}

impl DuplicateMessageIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::DuplicateMessage
    }
}

/// Current message still awaiting translator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnfinishedIssue {
    pub context: MessageContext,
    /// True if a draft translation exists.
    pub has_draft: bool,
}

impl UnfinishedIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::Unfinished
    }
}

/// Finished translation identical to its source (possibly not translated).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdenticalTranslationIssue {
    pub context: MessageContext,
}

impl IdenticalTranslationIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::IdenticalTranslation
    }
}

/// Finished translation whose placeholders differ from the source's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderMismatchIssue {
    pub context: MessageContext,
    /// Placeholders in the source but not in the translation.
    pub missing: Vec<String>,
    /// Placeholders in the translation but not in the source.
    pub unexpected: Vec<String>,
}

impl PlaceholderMismatchIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::PlaceholderMismatch
    }
}

/// Vanished or obsolete message kept for translator continuity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObsoleteEntryIssue {
    pub context: MessageContext,
    pub status: TranslationType,
}

impl ObsoleteEntryIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::ObsoleteEntry
    }
}

// ============================================================
// Issue Types - Catalog Header
// ============================================================

/// `<TS>` without a `language` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingLanguageIssue {
    pub file_path: String,
}

impl MissingLanguageIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::MissingLanguage
    }
}

/// `<TS version>` this tool does not know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedVersionIssue {
    pub file_path: String,
    pub version: String,
}

impl UnsupportedVersionIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnsupportedVersion
    }
}

// ============================================================
// Special Issue Types
// ============================================================

/// Type of file that failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorFileType {
    /// Translation catalog (.ts)
    Catalog,
    /// Application source file (.py)
    Source,
}

/// File could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
    pub file_type: ParseErrorFileType,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// A catalog issue found during analysis.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    EmptySource(EmptySourceIssue),
    InvalidLocation(InvalidLocationIssue),
    VanishedLocation(VanishedLocationIssue),
    DuplicateMessage(DuplicateMessageIssue),
    Unfinished(UnfinishedIssue),
    IdenticalTranslation(IdenticalTranslationIssue),
    PlaceholderMismatch(PlaceholderMismatchIssue),
    MissingLanguage(MissingLanguageIssue),
    UnsupportedVersion(UnsupportedVersionIssue),
    ObsoleteEntry(ObsoleteEntryIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// A message inside a catalog.
    Message(&'a MessageContext),
    /// File-level only (header issues, parse errors).
    File { path: &'a str },
}

/// Trait for types that can be reported to CLI.
///
/// Implemented by all issue types to provide a consistent interface for the
/// report functions. Uses `enum_dispatch` for zero-cost dispatch on `Issue`.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this issue.
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display (source phrase, error, etc.).
    fn message(&self) -> String;

    /// Severity level.
    fn report_severity(&self) -> Severity;

    /// Rule identifier.
    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

/// Implements the parts of `Report` shared by every message-located issue.
macro_rules! message_report {
    ($ty:ty, |$issue:ident| $details:expr) => {
        message_report!($ty, |$issue| $details, None);
    };
    ($ty:ty, |$issue:ident| $details:expr, $hint:expr) => {
        impl Report for $ty {
            fn location(&self) -> ReportLocation<'_> {
                ReportLocation::Message(&self.context)
            }

            fn message(&self) -> String {
                self.context.source.clone()
            }

            fn report_severity(&self) -> Severity {
                Self::severity()
            }

            fn report_rule(&self) -> Rule {
                Self::rule()
            }

            fn hint(&self) -> Option<&str> {
                $hint
            }

            fn details(&self) -> Option<String> {
                let $issue = self;
                $details
            }
        }
    };
}

message_report!(EmptySourceIssue, |issue| Some(format!(
    "in context {}",
    issue.context.context
)));

message_report!(InvalidLocationIssue, |issue| Some(format!(
    "in context {}: {}",
    issue.context.context, issue.reason
)));

message_report!(
    VanishedLocationIssue,
    |issue| Some(format!(
        "{} message still has {} location(s)",
        issue.status, issue.location_count
    )),
    Some("locations are only kept for messages present in the sources")
);

message_report!(DuplicateMessageIssue, |issue| Some(match &issue.comment {
    Some(comment) => format!(
        "in context {} (comment \"{}\"), first defined at line {}",
        issue.context.context, comment, issue.first_line
    ),
    None => format!(
        "in context {}, first defined at line {}",
        issue.context.context, issue.first_line
    ),
}));

message_report!(UnfinishedIssue, |issue| Some(if issue.has_draft {
    format!("in context {} (draft translation)", issue.context.context)
} else {
    format!("in context {}", issue.context.context)
}));

message_report!(IdenticalTranslationIssue, |issue| Some(format!(
    "in context {}, translation is identical to source",
    issue.context.context
)));

message_report!(PlaceholderMismatchIssue, |issue| {
    let mut parts = Vec::new();
    if !issue.missing.is_empty() {
        parts.push(format!("missing {}", issue.missing.join(", ")));
    }
    if !issue.unexpected.is_empty() {
        parts.push(format!("unexpected {}", issue.unexpected.join(", ")));
    }
    Some(format!(
        "in context {}: {}",
        issue.context.context,
        parts.join("; ")
    ))
});

message_report!(
    ObsoleteEntryIssue,
    |issue| Some(format!("in context {} ({})", issue.context.context, issue.status)),
    Some("run `lingot clean --apply` to drop entries no longer in the sources")
);

impl Report for MissingLanguageIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        "catalog has no target language".to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        Some("add a language attribute, e.g. <TS version=\"2.1\" language=\"fr_FR\">")
    }
}

impl Report for UnsupportedVersionIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        if self.version.is_empty() {
            "missing TS version".to_string()
        } else {
            format!("unsupported TS version {}", self.version)
        }
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    /// Get file path for sorting.
    fn sort_file_path(&self) -> &str {
        match self.location() {
            ReportLocation::Message(ctx) => &ctx.location.file_path,
            ReportLocation::File { path } => path,
        }
    }

    /// Get line number for sorting.
    fn sort_line(&self) -> usize {
        match self.location() {
            ReportLocation::Message(ctx) => ctx.location.line,
            ReportLocation::File { .. } => 0,
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: file_path, line, rule, message
        self.sort_file_path()
            .cmp(other.sort_file_path())
            .then_with(|| self.sort_line().cmp(&other.sort_line()))
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use crate::core::MessageLocation;
    use crate::issues::*;

    fn ctx(line: usize, source: &str) -> MessageContext {
        MessageContext::new(
            MessageLocation::new("./translations/app_br.ts", line),
            "CachePanel",
            source,
        )
    }

    #[test]
    fn test_empty_source_issue() {
        let issue = EmptySourceIssue { context: ctx(10, "") };
        assert_eq!(EmptySourceIssue::severity(), Severity::Error);
        assert_eq!(EmptySourceIssue::rule(), Rule::EmptySource);
        assert_eq!(issue.details().unwrap(), "in context CachePanel");
    }

    #[test]
    fn test_invalid_location_reason_display() {
        assert_eq!(
            InvalidLocationReason::BadLine("-x".to_string()).to_string(),
            "invalid line \"-x\""
        );
        assert_eq!(
            InvalidLocationReason::EmptyFilename.to_string(),
            "empty filename"
        );
    }

    #[test]
    fn test_vanished_location_issue() {
        let issue = VanishedLocationIssue {
            context: ctx(20, "Cancel"),
            status: TranslationType::Vanished,
            location_count: 2,
        };
        assert_eq!(VanishedLocationIssue::severity(), Severity::Error);
        assert_eq!(issue.message(), "Cancel");
        assert_eq!(
            issue.details().unwrap(),
            "vanished message still has 2 location(s)"
        );
        assert!(issue.hint().is_some());
    }

    #[test]
    fn test_duplicate_message_details() {
        let issue = DuplicateMessageIssue {
            context: ctx(30, "Open"),
            comment: Some("menu".to_string()),
            first_line: 12,
        };
        assert_eq!(
            issue.details().unwrap(),
            "in context CachePanel (comment \"menu\"), first defined at line 12"
        );
    }

    #[test]
    fn test_placeholder_mismatch_details() {
        let issue = PlaceholderMismatchIssue {
            context: ctx(40, "Downloading {}"),
            missing: vec!["{}".to_string()],
            unexpected: vec!["{name}".to_string()],
        };
        assert_eq!(PlaceholderMismatchIssue::severity(), Severity::Error);
        assert_eq!(
            issue.details().unwrap(),
            "in context CachePanel: missing {}; unexpected {name}"
        );
    }

    #[test]
    fn test_unfinished_issue() {
        let issue = UnfinishedIssue {
            context: ctx(50, "Size limit"),
            has_draft: true,
        };
        assert_eq!(UnfinishedIssue::severity(), Severity::Warning);
        assert!(issue.details().unwrap().contains("draft"));
    }

    #[test]
    fn test_header_issues() {
        let missing = MissingLanguageIssue {
            file_path: "a.ts".to_string(),
        };
        assert_eq!(MissingLanguageIssue::severity(), Severity::Warning);
        assert!(matches!(missing.location(), ReportLocation::File { path: "a.ts" }));

        let version = UnsupportedVersionIssue {
            file_path: "a.ts".to_string(),
            version: "1.1".to_string(),
        };
        assert_eq!(version.message(), "unsupported TS version 1.1");
    }

    #[test]
    fn test_parse_error_issue() {
        let issue = ParseErrorIssue {
            file_path: "./translations/broken.ts".to_string(),
            error: "line 5: <message> without <source>".to_string(),
            file_type: ParseErrorFileType::Catalog,
        };
        assert_eq!(ParseErrorIssue::severity(), Severity::Error);
        assert_eq!(ParseErrorIssue::rule(), Rule::ParseError);
        assert_eq!(issue.message(), "line 5: <message> without <source>");
    }

    #[test]
    fn test_issue_enum_dispatch() {
        let issue = Issue::IdenticalTranslation(IdenticalTranslationIssue {
            context: ctx(5, "OK"),
        });
        assert_eq!(issue.severity(), Severity::Warning);
        assert_eq!(issue.rule(), Rule::IdenticalTranslation);
        assert_eq!(issue.message(), "OK");
    }

    #[test]
    fn test_issue_ordering() {
        let mut issues = vec![
            Issue::Unfinished(UnfinishedIssue {
                context: ctx(50, "B"),
                has_draft: false,
            }),
            Issue::MissingLanguage(MissingLanguageIssue {
                file_path: "./translations/app_br.ts".to_string(),
            }),
            Issue::EmptySource(EmptySourceIssue { context: ctx(10, "") }),
        ];
        issues.sort();
        assert_eq!(issues[0].rule(), Rule::MissingLanguage);
        assert_eq!(issues[1].rule(), Rule::EmptySource);
        assert_eq!(issues[2].rule(), Rule::Unfinished);
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
    }

    #[test]
    fn test_rule_display() {
        assert_eq!(Rule::EmptySource.to_string(), "empty-source");
        assert_eq!(Rule::InvalidLocation.to_string(), "invalid-location");
        assert_eq!(Rule::VanishedLocation.to_string(), "vanished-location");
        assert_eq!(Rule::DuplicateMessage.to_string(), "duplicate-message");
        assert_eq!(Rule::Unfinished.to_string(), "unfinished");
        assert_eq!(
            Rule::IdenticalTranslation.to_string(),
            "identical-translation"
        );
        assert_eq!(
            Rule::PlaceholderMismatch.to_string(),
            "placeholder-mismatch"
        );
        assert_eq!(Rule::MissingLanguage.to_string(), "missing-language");
        assert_eq!(Rule::UnsupportedVersion.to_string(), "unsupported-version");
        assert_eq!(Rule::ObsoleteEntry.to_string(), "obsolete-entry");
        assert_eq!(Rule::ParseError.to_string(), "parse-error");
    }
}
