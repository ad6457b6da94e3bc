//! Row formatting: turns a keyed map of row specs into an ordered collection
//! of rows with fully built rule lists.

use std::ops::Deref;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::filter_type::FilterType;
use crate::rule::{build_rules, Rule, RuleMap, RuleSchema};

/// A `{ text, value }` pair a boolean row can present instead of its defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowOption {
    pub text: String,
    pub value: String,
}

impl RowOption {
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
        }
    }
}

/// Caller-side configuration of one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSpec {
    /// Row key; defaults to the map key.
    pub value: Option<String>,
    pub text: String,
    pub filter_type: FilterType,
    pub order: Option<i64>,
    pub is_active: Option<bool>,
    pub rules: RuleMap,
    /// `boolean` rows only.
    pub options: Option<Vec<RowOption>>,
    /// First selectable date; date rows only.
    pub from: Option<NaiveDate>,
    /// Last selectable date; date rows only.
    pub to: Option<NaiveDate>,
}

impl RowSpec {
    pub fn new(filter_type: FilterType, text: impl Into<String>) -> Self {
        Self {
            value: None,
            text: text.into(),
            filter_type,
            order: None,
            is_active: None,
            rules: RuleMap::new(),
            options: None,
            from: None,
            to: None,
        }
    }

    pub fn rule(mut self, operator: impl Into<String>, rule: impl Into<Rule>) -> Self {
        self.rules.insert(operator, Some(rule.into()));
        self
    }

    pub fn rules(mut self, rules: RuleMap) -> Self {
        self.rules = rules;
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn options(mut self, options: Vec<RowOption>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }
}

/// Ordered row key → spec map. Insertion order is output order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowMap {
    entries: Vec<(String, RowSpec)>,
}

impl RowMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the spec for `key`. Re-inserting a key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, spec: RowSpec) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = spec,
            None => self.entries.push((key, spec)),
        }
    }

    pub fn row(mut self, key: impl Into<String>, spec: RowSpec) -> Self {
        self.insert(key, spec);
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RowSpec)> {
        self.entries.iter().map(|(k, spec)| (k.as_str(), spec))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, RowSpec)> for RowMap {
    fn from_iter<I: IntoIterator<Item = (K, RowSpec)>>(iter: I) -> Self {
        let mut map = RowMap::new();
        for (key, spec) in iter {
            map.insert(key, spec);
        }
        map
    }
}

/// A built row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub value: String,
    pub text: String,
    #[serde(rename = "type")]
    pub filter_type: FilterType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    pub rules: Vec<RuleSchema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<RowOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
}

/// Built rows in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rows(Vec<Row>);

impl Rows {
    /// Gets a row by its value.
    pub fn get(&self, value: &str) -> Option<&Row> {
        self.0.iter().find(|row| row.value == value)
    }

    /// Gets the row at the given index.
    pub fn at(&self, index: usize) -> Option<&Row> {
        self.0.get(index)
    }

    /// Finds the first row.
    pub fn find_first(&self) -> Option<&Row> {
        self.0.first()
    }

    pub fn into_inner(self) -> Vec<Row> {
        self.0
    }
}

impl Deref for Rows {
    type Target = [Row];

    fn deref(&self) -> &[Row] {
        &self.0
    }
}

impl IntoIterator for Rows {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Rows {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn check_extensions(key: &str, spec: &RowSpec) -> Result<()> {
    let invalid = |message: String| Error::InvalidRowOption {
        row: key.to_string(),
        message,
    };

    if let Some(options) = &spec.options {
        if spec.filter_type != FilterType::Boolean {
            return Err(invalid(format!(
                "`options` is only allowed on boolean rows, not \"{}\"",
                spec.filter_type
            )));
        }
        for option in options {
            if !FilterType::Boolean.is_valid_operator(&option.value)? {
                return Err(invalid(format!(
                    "option \"{}\" is not a boolean operator. Valid operators are: {}.",
                    option.value,
                    FilterType::Boolean.operators()?.join(", ")
                )));
            }
        }
    }

    if (spec.from.is_some() || spec.to.is_some()) && !spec.filter_type.is_date() {
        return Err(invalid(format!(
            "`from`/`to` are only allowed on date rows, not \"{}\"",
            spec.filter_type
        )));
    }

    Ok(())
}

fn format_rows(map: &RowMap) -> Result<Rows> {
    let mut rows = Vec::with_capacity(map.len());

    for (key, spec) in map.iter() {
        check_extensions(key, spec)?;
        let rules = build_rules(spec.filter_type, &spec.rules)?;
        let value = spec.value.clone().unwrap_or_else(|| key.to_string());

        #[cfg(feature = "tracing")]
        tracing::trace!(row = %value, filter_type = %spec.filter_type, rules = rules.len(), "formatted row");

        rows.push(Row {
            value,
            text: spec.text.clone(),
            filter_type: spec.filter_type,
            order: spec.order,
            is_active: spec.is_active,
            rules,
            options: spec.options.clone(),
            from: spec.from,
            to: spec.to,
        });
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(rows = rows.len(), "created filter rows");

    Ok(Rows(rows))
}

/// Create filter rows with the given configuration.
///
/// Every entry is built in map order; the first failing row aborts the call.
pub fn create_filter_rows(rows: &RowMap) -> Result<Rows> {
    format_rows(rows)
}

/// Legacy form taking an explicit key list alongside the configuration.
///
/// The key list is not used to select rows: every row of `rows` is built.
/// Supplying keys without a configuration is a configuration error.
pub fn create_filter_rows_with_keys<S: AsRef<str>>(
    _keys: &[S],
    rows: Option<&RowMap>,
) -> Result<Rows> {
    match rows {
        Some(rows) => format_rows(rows),
        None => Err(Error::config(
            "create_filter_rows",
            "Provided \"keys\" but no \"config\"",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleFields;

    fn name_rows() -> RowMap {
        RowMap::new().row(
            "name",
            RowSpec::new(FilterType::String, "Name").rule("contains", "Contains"),
        )
    }

    #[test]
    fn builds_one_row_per_entry() {
        let rows = create_filter_rows(&name_rows()).unwrap();
        assert_eq!(rows.len(), 1);
        let row = rows.get("name").unwrap();
        assert_eq!(row.value, "name");
        assert_eq!(row.rules, vec![RuleSchema::new("contains", "Contains")]);
        assert_eq!(rows.at(0), Some(row));
        assert_eq!(rows.find_first(), Some(row));
        assert!(rows.get("missing").is_none());
        assert!(rows.at(1).is_none());
    }

    #[test]
    fn explicit_value_overrides_key() {
        let map = RowMap::new().row(
            "age",
            RowSpec::new(FilterType::Number, "Age")
                .value("years")
                .order(2)
                .active(true)
                .rule("gt", "Older than"),
        );
        let rows = create_filter_rows(&map).unwrap();
        assert!(rows.get("age").is_none());
        let row = rows.get("years").unwrap();
        assert_eq!(row.order, Some(2));
        assert_eq!(row.is_active, Some(true));
    }

    #[test]
    fn order_field_does_not_reorder() {
        let map = RowMap::new()
            .row("b", RowSpec::new(FilterType::Boolean, "B").order(1).rule("is", "Is"))
            .row("a", RowSpec::new(FilterType::Boolean, "A").order(0).rule("is", "Is"));
        let rows = create_filter_rows(&map).unwrap();
        let values: Vec<&str> = rows.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["b", "a"]);
    }

    #[test]
    fn empty_map_yields_no_rows() {
        let rows = create_filter_rows(&RowMap::new()).unwrap();
        assert!(rows.is_empty());
        assert!(rows.find_first().is_none());
    }

    #[test]
    fn one_bad_row_fails_the_call() {
        let map = name_rows().row(
            "age",
            RowSpec::new(FilterType::Number, "Age").rule("contains", "Contains"),
        );
        assert!(matches!(
            create_filter_rows(&map),
            Err(Error::InvalidOperator { .. })
        ));
    }

    #[test]
    fn legacy_keys_form() {
        let map = name_rows();
        let rows = create_filter_rows_with_keys(&["other"], Some(&map)).unwrap();
        assert_eq!(rows, create_filter_rows(&map).unwrap());

        let err = create_filter_rows_with_keys(&["name"], None).unwrap_err();
        assert_eq!(err.key(), "create_filter_rows");
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn boolean_options_are_checked() {
        let ok = RowMap::new().row(
            "active",
            RowSpec::new(FilterType::Boolean, "Active")
                .rule("is", "Is")
                .options(vec![RowOption::new("Yes", "is"), RowOption::new("No", "is-not")]),
        );
        let rows = create_filter_rows(&ok).unwrap();
        assert_eq!(rows[0].options.as_ref().map(Vec::len), Some(2));

        let bad_value = RowMap::new().row(
            "active",
            RowSpec::new(FilterType::Boolean, "Active").options(vec![RowOption::new("Maybe", "gt")]),
        );
        let err = create_filter_rows(&bad_value).unwrap_err();
        assert!(matches!(err, Error::InvalidRowOption { ref row, .. } if row == "active"));
        assert_eq!(err.key(), "create_filter_rows");
        assert!(err.to_string().contains("Valid operators are: is, is-not."));

        let wrong_type = RowMap::new().row(
            "name",
            RowSpec::new(FilterType::String, "Name").options(vec![RowOption::new("Yes", "is")]),
        );
        assert!(matches!(
            create_filter_rows(&wrong_type),
            Err(Error::InvalidRowOption { .. })
        ));
    }

    #[test]
    fn date_range_only_on_date_rows() {
        let from = NaiveDate::from_ymd_opt(2024, 1, 1);
        let to = NaiveDate::from_ymd_opt(2024, 12, 31);
        let ok = RowMap::new().row(
            "created",
            RowSpec::new(FilterType::DateBasic, "Created")
                .rule("today", "Today")
                .range(from, to),
        );
        let rows = create_filter_rows(&ok).unwrap();
        assert_eq!(rows[0].from, from);
        assert_eq!(rows[0].to, to);

        let bad = RowMap::new().row(
            "age",
            RowSpec::new(FilterType::Number, "Age").range(from, None),
        );
        assert!(matches!(
            create_filter_rows(&bad),
            Err(Error::InvalidRowOption { .. })
        ));
    }

    #[test]
    fn serializes_like_the_front_end_expects() {
        let map = RowMap::new().row(
            "price",
            RowSpec::new(FilterType::Number, "Price")
                .active(false)
                .rule("gte", RuleFields::text("At least").separator()),
        );
        let json = serde_json::to_value(create_filter_rows(&map).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "value": "price",
                "text": "Price",
                "type": "number",
                "isActive": false,
                "rules": [{ "value": "gte", "text": "At least", "renderSeparator": true }]
            }])
        );
    }
}
