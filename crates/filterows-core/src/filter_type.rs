//! Filter types: the dotted catalog paths a row or rule can be typed with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::operators::{self, Operator};

/// A filter type selected from the operator catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterType {
    Boolean,
    String,
    Number,
    Date,
    DateBasic,
    DateDays,
    DateDaysWeekdays,
    DateDaysWeekends,
}

impl FilterType {
    pub const ALL: [FilterType; 8] = [
        FilterType::Boolean,
        FilterType::String,
        FilterType::Number,
        FilterType::Date,
        FilterType::DateBasic,
        FilterType::DateDays,
        FilterType::DateDaysWeekdays,
        FilterType::DateDaysWeekends,
    ];

    /// Dotted catalog path.
    pub const fn as_str(self) -> &'static str {
        match self {
            FilterType::Boolean => "boolean",
            FilterType::String => "string",
            FilterType::Number => "number",
            FilterType::Date => "date",
            FilterType::DateBasic => "date.basic",
            FilterType::DateDays => "date.days",
            FilterType::DateDaysWeekdays => "date.days.weekdays",
            FilterType::DateDaysWeekends => "date.days.weekends",
        }
    }

    pub const fn is_date(self) -> bool {
        matches!(
            self,
            FilterType::Date
                | FilterType::DateBasic
                | FilterType::DateDays
                | FilterType::DateDaysWeekdays
                | FilterType::DateDaysWeekends
        )
    }

    /// Operator vocabulary of this type, in catalog order.
    pub fn operators(self) -> Result<&'static [Operator]> {
        operators::get_operators(self.as_str())
    }

    pub fn is_valid_operator(self, operator: &str) -> Result<bool> {
        operators::is_valid_operator(self.as_str(), operator)
    }
}

impl AsRef<str> for FilterType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterType {
    type Err = Error;

    /// Parses a dotted path. The path must resolve in the catalog and name a
    /// node that reports an operator set.
    fn from_str(s: &str) -> Result<Self> {
        operators::get_operators(s)?;
        FilterType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::SchemaResolution {
                filter_type: s.to_string(),
            })
    }
}

impl Serialize for FilterType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FilterType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Value domain of a rule's `type` field: any non-date filter type, or `empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleType {
    Boolean,
    String,
    Number,
    Date,
    Empty,
}
