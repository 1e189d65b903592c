//! Rule implementations for lingot.
//!
//! This module contains pure functions that check parsed catalogs for
//! structural and translation problems. Each function takes only the
//! catalogs (and the settings it needs) and returns a specific issue type.
//! The `check_*_issues` wrappers pull those inputs from a `CheckContext`.
//!
//! ## Module Structure
//!
//! - `helpers`: Report positions and deterministic ordering
//! - `empty_source`: Messages with an empty `<source>`
//! - `invalid_location`: Malformed `<location>` attributes
//! - `vanished_location`: Retired messages still pointing into the sources
//! - `duplicate`: Repeated source/disambiguation pairs in one context
//! - `unfinished`: Current messages awaiting translation
//! - `identical`: Finished translations equal to their source
//! - `placeholder`: `{}`/`{name}`/`%1` placeholder drift
//! - `header`: Missing language, unsupported format version
//! - `obsolete`: Vanished/obsolete entries (on demand)

pub mod duplicate;
pub mod empty_source;
pub mod header;
pub mod helpers;
pub mod identical;
pub mod invalid_location;
pub mod obsolete;
pub mod placeholder;
pub mod unfinished;
pub mod vanished_location;
