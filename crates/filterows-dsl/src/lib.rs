#![forbid(unsafe_code)]
//! filterows-dsl: YAML/JSON documents → `RowMap` → built `Rows`.
//!
//! Untyped rule overrides are classified here (label, descriptor, or an
//! invalid shape) before they reach the core builders.

pub mod document;
pub mod error;
pub mod yaml;

pub use document::{parse_json_rows, parse_rows, Format, ParsedRows};
pub use error::DslError;
pub use yaml::parse_yaml_rows;
