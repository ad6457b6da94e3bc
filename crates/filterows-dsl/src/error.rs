use thiserror::Error;

#[derive(Debug, Error)]
pub enum DslError {
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("row \"{row}\": {source}")]
    Row {
        row: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Build(#[from] filterows_core::Error),

    #[error("invalid document: {0}")]
    Invalid(String),
}
