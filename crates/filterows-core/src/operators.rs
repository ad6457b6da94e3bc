//! The operator catalog: a fixed tree of operator vocabularies addressed by
//! dotted filter-type paths (`string`, `date.days.weekdays`, ...).
//!
//! A node is either a flat enumeration of operators or an object with named
//! children. Objects may also expose a `main` vocabulary (e.g. `date` has its
//! own comparison operators besides the `basic` and `days` sub-vocabularies);
//! that `main` set is what a lookup of the object's path reports.

use crate::error::{Error, Result};

/// An operator label as defined by the catalog.
pub type Operator = &'static str;

pub const IS_OPERATORS: &[Operator] = &["is", "is-not"];
pub const CONTAINS_OPERATORS: &[Operator] = &["contains", "not-contains"];
pub const RANGE_OPERATORS: &[Operator] = &["gt", "gte", "lt", "lte"];
pub const EQUALITY_OPERATORS: &[Operator] = &["eq", "neq"];
pub const EMPTY_OPERATORS: &[Operator] = &["empty", "not-empty"];

pub const STRING_OPERATORS: &[Operator] = &[
    "is",
    "is-not",
    "contains",
    "not-contains",
    "starts-with",
    "ends-with",
];
pub const NUMBER_OPERATORS: &[Operator] = &["eq", "neq", "gt", "gte", "lt", "lte"];

pub const WEEKENDS: &[Operator] = &["saturday", "sunday"];
pub const WEEKDAYS: &[Operator] = &["monday", "tuesday", "wednesday", "thursday", "friday"];
pub const DAYS: &[Operator] = &[
    "saturday",
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
];
pub const BASIC_DATE_OPERATORS: &[Operator] =
    &["today", "tomorrow", "yesterday", "day-of-week", "custom-date"];
pub const DATE_OPERATORS: &[Operator] = &[
    "eq",
    "neq",
    "gt",
    "gte",
    "lt",
    "lte",
    "empty",
    "not-empty",
    "between",
];

/// One node of the catalog tree.
#[derive(Debug, Clone, Copy)]
pub enum OperatorSchema {
    /// A flat operator vocabulary.
    Enum(&'static [Operator]),
    /// Named children plus an optional vocabulary of the node itself.
    Object {
        main: Option<&'static [Operator]>,
        fields: &'static [(&'static str, OperatorSchema)],
    },
}

/// Root of the catalog.
pub static FILTER_OPERATOR_MAP: OperatorSchema = OperatorSchema::Object {
    main: None,
    fields: &[
        ("boolean", OperatorSchema::Enum(IS_OPERATORS)),
        ("string", OperatorSchema::Enum(STRING_OPERATORS)),
        ("number", OperatorSchema::Enum(NUMBER_OPERATORS)),
        (
            "date",
            OperatorSchema::Object {
                main: Some(DATE_OPERATORS),
                fields: &[
                    ("basic", OperatorSchema::Enum(BASIC_DATE_OPERATORS)),
                    (
                        "days",
                        OperatorSchema::Object {
                            main: Some(DAYS),
                            fields: &[
                                ("weekdays", OperatorSchema::Enum(WEEKDAYS)),
                                ("weekends", OperatorSchema::Enum(WEEKENDS)),
                            ],
                        },
                    ),
                ],
            },
        ),
    ],
};

impl OperatorSchema {
    /// Look up a direct child by name. Enumerations have no children.
    pub fn field(&self, name: &str) -> Option<&OperatorSchema> {
        match self {
            OperatorSchema::Enum(_) => None,
            OperatorSchema::Object { fields, .. } => fields
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, schema)| schema),
        }
    }

    /// The vocabulary reported for this node: the enumeration itself, or the
    /// object's `main` set.
    pub fn operators(&self) -> Option<&'static [Operator]> {
        match self {
            OperatorSchema::Enum(ops) => Some(*ops),
            OperatorSchema::Object { main, .. } => *main,
        }
    }

    fn resolve_segments<'s>(
        &'s self,
        mut segments: std::str::Split<'_, char>,
    ) -> Option<&'s OperatorSchema> {
        match segments.next() {
            None => Some(self),
            Some(segment) => self.field(segment)?.resolve_segments(segments),
        }
    }
}

/// Walk `filter_type` segment by segment from the catalog root.
pub fn resolve_schema(filter_type: &str) -> Result<&'static OperatorSchema> {
    let unresolved = || Error::SchemaResolution {
        filter_type: filter_type.to_string(),
    };
    if filter_type.is_empty() {
        return Err(unresolved());
    }
    FILTER_OPERATOR_MAP
        .resolve_segments(filter_type.split('.'))
        .ok_or_else(unresolved)
}

/// All operators valid for `filter_type`, in catalog order.
pub fn get_operators(filter_type: impl AsRef<str>) -> Result<&'static [Operator]> {
    let filter_type = filter_type.as_ref();
    resolve_schema(filter_type)?
        .operators()
        .ok_or_else(|| Error::SchemaResolution {
            filter_type: filter_type.to_string(),
        })
}

/// Whether `operator` belongs to the vocabulary of `filter_type`.
///
/// An unknown operator yields `Ok(false)`; only an unresolvable filter type
/// is an error.
pub fn is_valid_operator(filter_type: impl AsRef<str>, operator: &str) -> Result<bool> {
    Ok(get_operators(filter_type)?.iter().any(|op| *op == operator))
}

pub fn is_weekend(day: &str) -> bool {
    WEEKENDS.iter().any(|op| *op == day)
}

pub fn is_weekday(day: &str) -> bool {
    WEEKDAYS.iter().any(|op| *op == day)
}

pub fn is_day(day: &str) -> bool {
    DAYS.iter().any(|op| *op == day)
}

pub fn is_basic_date_operator(operator: &str) -> bool {
    BASIC_DATE_OPERATORS.iter().any(|op| *op == operator)
}

pub fn is_date_operator(operator: &str) -> bool {
    DATE_OPERATORS.iter().any(|op| *op == operator)
}
