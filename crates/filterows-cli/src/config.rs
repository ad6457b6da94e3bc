//! CLI configuration that can be serialized/deserialized or read from env.

use serde::{Deserialize, Serialize};

use filterows_dsl::Format;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// `tracing-subscriber` env-filter directive.
    pub log_filter: String,

    /// Pretty-print JSON output.
    pub pretty: bool,

    /// Input format override; inferred from the file extension when unset.
    pub format: Option<Format>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_filter: "warn".to_string(),
            pretty: false,
            format: None,
        }
    }
}

impl CliConfig {
    /// Construct a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `FILTEROWS_LOG`: log filter (e.g. `debug`, `filterows_core=trace`)
    /// - `FILTEROWS_PRETTY`: `1`/`true` to pretty-print output
    /// - `FILTEROWS_FORMAT`: `yaml` or `json`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(s) = lookup("FILTEROWS_LOG") {
            if !s.trim().is_empty() {
                cfg.log_filter = s;
            }
        }

        if let Some(s) = lookup("FILTEROWS_PRETTY") {
            cfg.pretty = matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }

        if let Some(s) = lookup("FILTEROWS_FORMAT") {
            if let Ok(format) = s.parse::<Format>() {
                cfg.format = Some(format);
            }
        }

        cfg
    }
}
