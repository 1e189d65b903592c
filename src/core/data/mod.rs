//! Core data types shared by rules, issues and reports.
//!
//! ## Module Structure
//!
//! - `message`: Catalog position types (MessageLocation, MessageContext)

pub mod message;

pub use message::{MessageContext, MessageLocation};
