//! File parsers for catalogs and application sources.
//!
//! - `ts`: Qt Linguist `.ts` catalog parser (quick-xml event stream)
//! - `python`: Lexical helpers for finding `tr()` calls in Python sources

pub mod python;
pub mod ts;
