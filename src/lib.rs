#![forbid(unsafe_code)]
//! filterows: declarative filter-row definitions with validated operator rules.
//!
//! Re-exports the core builders and the YAML/JSON document loader.

pub use filterows_core::*;
pub use filterows_dsl as dsl;
