//! Filter row documents.
//!
//! Example:
//! ```yaml
//! keys: [name, age]            # optional; legacy key list
//! rows:
//!   name:
//!     text: Name
//!     type: string
//!     rules:
//!       contains: Contains
//!       is: { text: Is, renderSeparator: true }
//!   age:
//!     text: Age
//!     type: number
//!     rules: { gt: Older than, lt: Younger than }
//! ```

use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use filterows_core::row::{create_filter_rows, create_filter_rows_with_keys, RowMap, RowOption, RowSpec, Rows};
use filterows_core::rule::{check_operator, Rule, RuleMap};
use filterows_core::FilterType;

use crate::error::DslError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub keys: Option<Vec<String>>,
    #[serde(default)]
    pub rows: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowDef {
    #[serde(default)]
    pub value: Option<String>,
    pub text: String,
    #[serde(rename = "type")]
    pub filter_type: FilterType,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub rules: Map<String, Value>,
    #[serde(default)]
    pub options: Option<Vec<RowOption>>,
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

impl RowDef {
    fn into_spec(self) -> Result<RowSpec, DslError> {
        let mut rules = RuleMap::new();
        for (operator, raw) in &self.rules {
            check_operator(self.filter_type, operator)?;
            rules.insert(operator.as_str(), Rule::from_value(self.filter_type, raw)?);
        }

        let mut spec = RowSpec::new(self.filter_type, self.text).rules(rules);
        spec.value = self.value;
        spec.order = self.order;
        spec.is_active = self.is_active;
        spec.options = self.options;
        spec.from = self.from;
        spec.to = self.to;
        Ok(spec)
    }
}

/// Input format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// Infer from a file extension; anything but `.json` is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

impl FromStr for Format {
    type Err = DslError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(Format::Yaml),
            "json" => Ok(Format::Json),
            other => Err(DslError::Invalid(format!("unknown format '{other}'"))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParsedRows {
    pub keys: Option<Vec<String>>,
    pub rows: Option<RowMap>,
}

impl ParsedRows {
    /// Build the row collection. A document with a key list goes through the
    /// legacy entry point, which requires `rows` to be present.
    pub fn build(&self) -> Result<Rows, DslError> {
        match (&self.keys, &self.rows) {
            (Some(keys), rows) => Ok(create_filter_rows_with_keys(keys.as_slice(), rows.as_ref())?),
            (None, Some(rows)) => Ok(create_filter_rows(rows)?),
            (None, None) => Err(DslError::Invalid("document has no `rows`".into())),
        }
    }
}

pub(crate) fn from_document(doc: Document) -> Result<ParsedRows, DslError> {
    let rows = match doc.rows {
        Some(raw) => {
            let mut map = RowMap::new();
            for (key, value) in raw {
                let def: RowDef = serde_json::from_value(value).map_err(|source| DslError::Row {
                    row: key.clone(),
                    source,
                })?;
                map.insert(key, def.into_spec()?);
            }
            Some(map)
        }
        None => None,
    };

    Ok(ParsedRows {
        keys: doc.keys,
        rows,
    })
}

/// Parse a JSON document.
pub fn parse_json_rows(src: &str) -> Result<ParsedRows, DslError> {
    let doc: Document = serde_json::from_str(src)?;
    from_document(doc)
}

/// Parse a document in the given format.
pub fn parse_rows(src: &str, format: Format) -> Result<ParsedRows, DslError> {
    match format {
        Format::Yaml => crate::yaml::parse_yaml_rows(src),
        Format::Json => parse_json_rows(src),
    }
}
