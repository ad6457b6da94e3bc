#![forbid(unsafe_code)]
//! filterows-core: operator catalog → rule builders → filter rows.
//!
//! Design:
//! - The catalog is a fixed tree addressed by dotted filter-type paths.
//! - `rule` normalizes caller overrides (labels or partial descriptors) and
//!   validates operators against the row's filter type.
//! - `date` holds the immutable date presets; every override call works on
//!   a clone.
//! - `row` builds the ordered, queryable row collection.
//!
//! NOTE: No I/O here. Loading configuration documents lives in `filterows-dsl`.

pub mod date;
pub mod error;
pub mod exclusive;
pub mod filter_type;
pub mod operators;
pub mod prelude;
pub mod row;
pub mod rule;

pub use date::{create_date_options, DateOptions};
pub use error::{Error, Result};
pub use exclusive::{get_exclusive, ExclusiveOptions};
pub use filter_type::{FilterType, RuleType};
pub use operators::{get_operators, is_valid_operator};
pub use row::{create_filter_rows, create_filter_rows_with_keys, Row, RowMap, RowSpec, Rows};
pub use rule::{build_rule, build_rules, build_rules_with, check_operator, Rule, RuleFields, RuleMap, RuleSchema};
