//! Lingot - Qt Linguist translation catalog toolkit
//!
//! Lingot is a CLI tool and library for working with Qt Linguist `.ts`
//! catalogs in Python (PyQt/PySide) projects. It validates catalogs, reports
//! translation progress, extracts translatable strings from sources and merges
//! them into catalogs the way `lupdate` does.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands and report printing)
//! - `config`: Configuration file loading and parsing
//! - `core`: Catalog model, parsing, writing, extraction and merging
//! - `issues`: Issue type definitions and reporting
//! - `rules`: Validation rules run by `lingot check`
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod rules;
pub mod utils;
