//! Convenient re-exports for downstream crates.

pub use crate::date::{create_date_options, DateOptions};
pub use crate::error::{Error, Result};
pub use crate::exclusive::{get_exclusive, ExclusiveOptions};
pub use crate::filter_type::{FilterType, RuleType};
pub use crate::operators::{get_operators, is_valid_operator, Operator};
pub use crate::row::{create_filter_rows, Row, RowMap, RowOption, RowSpec, Rows};
pub use crate::rule::{build_rules, Rule, RuleFields, RuleMap, RuleSchema};
