//! Core catalog engine.
//!
//! ## Module Structure
//!
//! - `catalog`: In-memory catalog model (contexts, messages, translations)
//! - `parsers`: `.ts` catalog parser and Python source lexing
//! - `writer`: lupdate-compatible catalog serialization
//! - `extract`: Translatable string extraction from Python sources
//! - `merge`: Merging extracted strings into existing catalogs
//! - `file_scanner`: Source file discovery
//! - `context`: `CheckContext`, the configured view of a project
//! - `data`: Report positions shared by rules and issues

pub mod catalog;
pub mod context;
pub mod data;
pub mod extract;
pub mod file_scanner;
pub mod merge;
pub mod parsers;
pub mod writer;

pub use catalog::{Catalog, CatalogStats, TranslationType};
pub use context::CheckContext;
pub use data::{MessageContext, MessageLocation};
