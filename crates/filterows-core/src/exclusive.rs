//! Include/omit resolution over a filter type's operator vocabulary.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::operators::{get_operators, Operator};

/// Which operators of `filter_type` to keep.
///
/// `include` and `omit` are expected to be disjoint; `include` wins when both
/// are given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExclusiveOptions {
    pub filter_type: String,
    pub include: Vec<String>,
    pub omit: Vec<String>,
}

impl ExclusiveOptions {
    pub fn new(filter_type: impl Into<String>) -> Self {
        Self {
            filter_type: filter_type.into(),
            ..Default::default()
        }
    }

    pub fn include<I, S>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include.extend(ops.into_iter().map(Into::into));
        self
    }

    pub fn omit<I, S>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.omit.extend(ops.into_iter().map(Into::into));
        self
    }
}

/// Effective operator set in catalog order, without duplicates.
///
/// - non-empty `include`: catalog ∩ include
/// - empty `include`, non-empty `omit`: catalog − omit
/// - both empty: the whole catalog vocabulary
pub fn get_exclusive(options: &ExclusiveOptions) -> Result<Vec<Operator>> {
    let ExclusiveOptions {
        filter_type,
        include,
        omit,
    } = options;

    if filter_type.is_empty() {
        return Err(Error::config("get_exclusive", "`filterType` is required."));
    }

    let operators = get_operators(filter_type)?;

    if !include.is_empty() {
        return Ok(operators
            .iter()
            .copied()
            .filter(|op| include.iter().any(|i| i == op))
            .collect());
    }

    if !omit.is_empty() {
        return Ok(operators
            .iter()
            .copied()
            .filter(|op| !omit.iter().any(|o| o == op))
            .collect());
    }

    if include.is_empty() && omit.is_empty() {
        return Ok(operators.to_vec());
    }

    Err(Error::Invariant {
        key: "get_exclusive",
        message: format!(
            "operators: [{}], included: [{}], omitted: [{}]",
            operators.join(", "),
            include.join(", "),
            omit.join(", ")
        ),
    })
}
