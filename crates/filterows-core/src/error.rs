use thiserror::Error;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure raised while building filter configuration.
///
/// These are programmer errors: they mean a caller-authored filter spec is
/// malformed. Nothing is recovered internally and no partial result is
/// produced. `key()` returns a stable identifier for the failing operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("[{key}]: {message}")]
    Configuration { key: &'static str, message: String },

    #[error("[get_operators]: No operators found for {filter_type}")]
    SchemaResolution { filter_type: String },

    #[error("[build_rules]: Operator \"{operator}\" is not valid for row type of \"{filter_type}\"{}", valid_suffix(.valid))]
    InvalidOperator {
        filter_type: String,
        operator: String,
        valid: Option<Vec<String>>,
    },

    #[error("[build_rules]: Row value not found for {operator}.")]
    MissingRuleValue { operator: String },

    #[error("[build_rule]: Invalid schema for {filter_type}: {kind}. Must be a string or an object.")]
    InvalidRuleShape { filter_type: String, kind: String },

    #[error("[create_filter_rows]: Row \"{row}\": {message}")]
    InvalidRowOption { row: String, message: String },

    #[error("[{key}]: Internal invariant failed: {message}")]
    Invariant { key: &'static str, message: String },
}

fn valid_suffix(valid: &Option<Vec<String>>) -> String {
    match valid {
        Some(ops) => format!(". Valid operators are: {}.", ops.join(", ")),
        None => ".".to_string(),
    }
}

impl Error {
    /// Stable key naming the operation that failed.
    pub fn key(&self) -> &'static str {
        match self {
            Error::Configuration { key, .. } | Error::Invariant { key, .. } => key,
            Error::SchemaResolution { .. } => "get_operators",
            Error::InvalidOperator { .. } | Error::MissingRuleValue { .. } => "build_rules",
            Error::InvalidRuleShape { .. } => "build_rule",
            Error::InvalidRowOption { .. } => "create_filter_rows",
        }
    }

    pub(crate) fn config(key: &'static str, message: impl Into<String>) -> Self {
        Error::Configuration {
            key,
            message: message.into(),
        }
    }
}
