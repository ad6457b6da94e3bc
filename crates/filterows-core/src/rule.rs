//! Rule descriptors and the builders that normalize caller overrides into them.
//!
//! A caller describes a rule either with a bare label (`"Greater than"`) or a
//! partial descriptor object. `build_rule` turns one of those into a complete
//! `RuleSchema`; `build_rules` does it for a whole ordered operator map and
//! validates every operator against the row's filter type.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::filter_type::{FilterType, RuleType};

/// A normalized rule: one operator's presentation within a row.
///
/// `children` and `siblings` are presentation groups and are carried through
/// as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSchema {
    pub value: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_separator: Option<bool>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub rule_type: Option<RuleType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RuleSchema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub siblings: Option<Vec<RuleSchema>>,
}

impl RuleSchema {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
            render_separator: None,
            rule_type: None,
            children: None,
            siblings: None,
        }
    }
}

/// Partial descriptor supplied by a caller. Every field is optional; `value`
/// defaults to the operator key and `text` to the resolved value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_separator: Option<bool>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub rule_type: Option<RuleType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RuleSchema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub siblings: Option<Vec<RuleSchema>>,
}

impl RuleFields {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn separator(mut self) -> Self {
        self.render_separator = Some(true);
        self
    }

    pub fn rule_type(mut self, rule_type: RuleType) -> Self {
        self.rule_type = Some(rule_type);
        self
    }

    pub fn children(mut self, children: Vec<RuleSchema>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn siblings(mut self, siblings: Vec<RuleSchema>) -> Self {
        self.siblings = Some(siblings);
        self
    }
}

/// A caller-supplied rule override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rule {
    Label(String),
    Descriptor(RuleFields),
}

impl From<&str> for Rule {
    fn from(label: &str) -> Self {
        Rule::Label(label.to_string())
    }
}

impl From<String> for Rule {
    fn from(label: String) -> Self {
        Rule::Label(label)
    }
}

impl From<RuleFields> for Rule {
    fn from(fields: RuleFields) -> Self {
        Rule::Descriptor(fields)
    }
}

impl Rule {
    /// Classify an untyped override. Falsy values (`null`, `false`, zero and
    /// `""`) mean "no value"; strings become labels and objects become
    /// descriptors. Anything else is rejected.
    pub fn from_value(filter_type: FilterType, value: &Value) -> Result<Option<Rule>> {
        let shape_error = |kind: String| Error::InvalidRuleShape {
            filter_type: filter_type.to_string(),
            kind,
        };
        match value {
            Value::Null | Value::Bool(false) => Ok(None),
            Value::Number(n) if n.as_f64() == Some(0.0) => Ok(None),
            Value::String(label) if label.is_empty() => Ok(None),
            Value::String(label) => Ok(Some(Rule::Label(label.clone()))),
            Value::Object(_) => serde_json::from_value::<RuleFields>(value.clone())
                .map(|fields| Some(Rule::Descriptor(fields)))
                .map_err(|e| shape_error(format!("object ({e})"))),
            Value::Bool(_) => Err(shape_error("boolean".into())),
            Value::Number(_) => Err(shape_error("number".into())),
            Value::Array(_) => Err(shape_error("array".into())),
        }
    }

    /// Whether this override carries nothing usable.
    pub(crate) fn is_blank(&self) -> bool {
        matches!(self, Rule::Label(label) if label.is_empty())
    }
}

/// Ordered operator → override map. Insertion order is the on-screen order
/// of the built rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleMap {
    entries: Vec<(String, Option<Rule>)>,
}

impl RuleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the override for `operator`. Re-inserting an operator keeps its
    /// original position.
    pub fn insert(&mut self, operator: impl Into<String>, rule: Option<Rule>) {
        let operator = operator.into();
        match self.entries.iter_mut().find(|(key, _)| *key == operator) {
            Some((_, slot)) => *slot = rule,
            None => self.entries.push((operator, rule)),
        }
    }

    /// Builder form of `insert`.
    pub fn with(mut self, operator: impl Into<String>, rule: impl Into<Rule>) -> Self {
        self.insert(operator, Some(rule.into()));
        self
    }

    pub fn get(&self, operator: &str) -> Option<&Option<Rule>> {
        self.entries
            .iter()
            .find(|(key, _)| key == operator)
            .map(|(_, rule)| rule)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Rule>)> {
        self.entries
            .iter()
            .map(|(key, rule)| (key.as_str(), rule.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, R: Into<Rule>> FromIterator<(K, R)> for RuleMap {
    fn from_iter<I: IntoIterator<Item = (K, R)>>(iter: I) -> Self {
        let mut map = RuleMap::new();
        for (operator, rule) in iter {
            map.insert(operator, Some(rule.into()));
        }
        map
    }
}

/// Normalize a single override into a complete descriptor.
///
/// No operator validation happens here; `build_rules` owns that.
pub fn build_rule(_filter_type: FilterType, operator: &str, schema: &Rule) -> RuleSchema {
    match schema {
        Rule::Label(text) => RuleSchema::new(operator, text.as_str()),
        Rule::Descriptor(fields) => {
            let value = fields.value.clone().unwrap_or_else(|| operator.to_string());
            let text = fields.text.clone().unwrap_or_else(|| value.clone());
            RuleSchema {
                value,
                text,
                render_separator: fields.render_separator,
                rule_type: fields.rule_type,
                children: fields.children.clone(),
                siblings: fields.siblings.clone(),
            }
        }
    }
}

/// Build every rule of `rules`, in map order.
pub fn build_rules(filter_type: FilterType, rules: &RuleMap) -> Result<Vec<RuleSchema>> {
    let order: Vec<&str> = rules.keys().collect();
    build_ordered(filter_type, rules, &order)
}

/// Build the rules of `rules` in the order returned by `transformer`.
///
/// The transformer receives the operator keys in map order. Keys it drops are
/// left out of the result; keys it returns that are not in the map are
/// ignored, as are repeats. An empty result leaves the map untouched.
pub fn build_rules_with<F>(
    filter_type: FilterType,
    rules: &RuleMap,
    transformer: F,
) -> Result<Vec<RuleSchema>>
where
    F: FnOnce(Vec<String>) -> Vec<String>,
{
    let keys: Vec<String> = rules.keys().map(str::to_string).collect();
    let transformed = transformer(keys);
    if transformed.is_empty() {
        return build_rules(filter_type, rules);
    }

    let mut order: Vec<&str> = Vec::with_capacity(transformed.len());
    for key in &transformed {
        if rules.get(key).is_some() && !order.contains(&key.as_str()) {
            order.push(key.as_str());
        }
    }
    build_ordered(filter_type, rules, &order)
}

/// Fail with `InvalidOperator` unless `operator` belongs to `filter_type`.
pub fn check_operator(filter_type: FilterType, operator: &str) -> Result<()> {
    if filter_type.is_valid_operator(operator)? {
        return Ok(());
    }
    Err(Error::InvalidOperator {
        filter_type: filter_type.to_string(),
        operator: operator.to_string(),
        valid: filter_type
            .operators()
            .ok()
            .map(|ops| ops.iter().map(|op| op.to_string()).collect()),
    })
}

fn build_ordered(filter_type: FilterType, rules: &RuleMap, order: &[&str]) -> Result<Vec<RuleSchema>> {
    let mut built = Vec::with_capacity(order.len());

    for &operator in order {
        check_operator(filter_type, operator)?;

        let rule = match rules.get(operator).and_then(Option::as_ref) {
            Some(rule) if !rule.is_blank() => rule,
            _ => {
                return Err(Error::MissingRuleValue {
                    operator: operator.to_string(),
                })
            }
        };

        built.push(build_rule(filter_type, operator, rule));
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(filter_type = %filter_type, rules = built.len(), "built rules");

    Ok(built)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn label_becomes_value_and_text() {
        let rule = build_rule(FilterType::Number, "gt", &"Greater than".into());
        assert_eq!(rule, RuleSchema::new("gt", "Greater than"));
    }

    #[test]
    fn descriptor_keeps_its_fields() {
        let rule = build_rule(
            FilterType::Number,
            "gt",
            &RuleFields::text("Greater than").separator().into(),
        );
        let mut expected = RuleSchema::new("gt", "Greater than");
        expected.render_separator = Some(true);
        assert_eq!(rule, expected);
    }

    #[test]
    fn descriptor_without_text_uses_value_as_text() {
        let fields = RuleFields {
            value: Some("neq".into()),
            ..Default::default()
        };
        let rule = build_rule(FilterType::Number, "eq", &fields.into());
        assert_eq!(rule, RuleSchema::new("neq", "neq"));

        let rule = build_rule(FilterType::Number, "lt", &RuleFields::default().into());
        assert_eq!(rule, RuleSchema::new("lt", "lt"));
    }

    #[test]
    fn rule_map_reinsert_keeps_position() {
        let mut map = RuleMap::new().with("gt", "A").with("lt", "B");
        map.insert("gt", Some("C".into()));
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["gt", "lt"]);
        assert_eq!(map.get("gt"), Some(&Some(Rule::from("C"))));
    }

    #[test]
    fn build_rules_follows_map_order() {
        let rules = RuleMap::new().with("lt", "Less than").with("gt", "Greater than");
        let built = build_rules(FilterType::Number, &rules).unwrap();
        let values: Vec<&str> = built.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["lt", "gt"]);
    }

    #[test]
    fn invalid_operator_lists_the_vocabulary() {
        let rules = RuleMap::new().with("contains", "Contains");
        let err = build_rules(FilterType::Number, &rules).unwrap_err();
        match &err {
            Error::InvalidOperator { valid, operator, .. } => {
                assert_eq!(operator, "contains");
                assert_eq!(
                    valid.as_deref(),
                    Some(&["eq", "neq", "gt", "gte", "lt", "lte"].map(String::from)[..])
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err
            .to_string()
            .ends_with("Valid operators are: eq, neq, gt, gte, lt, lte."));
    }

    #[test]
    fn missing_and_blank_values_are_rejected() {
        let mut rules = RuleMap::new();
        rules.insert("gt", None);
        let err = build_rules(FilterType::Number, &rules).unwrap_err();
        assert_eq!(
            err,
            Error::MissingRuleValue {
                operator: "gt".into()
            }
        );

        let rules = RuleMap::new().with("lt", "");
        assert!(matches!(
            build_rules(FilterType::Number, &rules),
            Err(Error::MissingRuleValue { .. })
        ));
    }

    #[test]
    fn operator_is_validated_before_value() {
        let mut rules = RuleMap::new();
        rules.insert("today", None);
        assert!(matches!(
            build_rules(FilterType::Number, &rules),
            Err(Error::InvalidOperator { .. })
        ));
    }

    #[test]
    fn transformer_reorders_and_drops() {
        let rules = RuleMap::new()
            .with("gt", "Greater than")
            .with("lt", "Less than")
            .with("eq", "Equals");
        let built = build_rules_with(FilterType::Number, &rules, |mut keys| {
            keys.reverse();
            keys.retain(|k| k != "lt");
            keys.push("gt".into());
            keys.push("neq".into());
            keys
        })
        .unwrap();
        let values: Vec<&str> = built.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["eq", "gt"]);
    }

    #[test]
    fn dropped_keys_are_not_validated() {
        let rules = RuleMap::new().with("gt", "Greater than").with("contains", "Contains");
        let built = build_rules_with(FilterType::Number, &rules, |keys| {
            keys.into_iter().filter(|k| k == "gt").collect()
        })
        .unwrap();
        assert_eq!(built, vec![RuleSchema::new("gt", "Greater than")]);
    }

    #[test]
    fn empty_transformer_result_keeps_every_rule() {
        let rules = RuleMap::new().with("is", "Is").with("is-not", "Is not");
        let built = build_rules_with(FilterType::Boolean, &rules, |_| Vec::new()).unwrap();
        let values: Vec<&str> = built.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["is", "is-not"]);
    }

    #[test]
    fn falsy_overrides_mean_no_value() {
        let ty = FilterType::Number;
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert_eq!(Rule::from_value(ty, &falsy).unwrap(), None, "{falsy}");
        }
        assert!(Rule::from_value(ty, &json!(true)).is_err());
        assert!(Rule::from_value(ty, &json!(1)).is_err());
    }

    #[test]
    fn check_operator_names_the_vocabulary() {
        assert!(check_operator(FilterType::Number, "gt").is_ok());
        assert!(matches!(
            check_operator(FilterType::Number, "contains"),
            Err(Error::InvalidOperator { .. })
        ));
    }

    #[test]
    fn untyped_overrides_are_classified() {
        let ty = FilterType::String;
        assert_eq!(Rule::from_value(ty, &json!(null)).unwrap(), None);
        assert_eq!(
            Rule::from_value(ty, &json!("Contains")).unwrap(),
            Some(Rule::from("Contains"))
        );
        assert_eq!(
            Rule::from_value(ty, &json!({ "text": "Is", "renderSeparator": true })).unwrap(),
            Some(RuleFields::text("Is").separator().into())
        );

        let err = Rule::from_value(ty, &json!(42)).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidRuleShape {
                filter_type: "string".into(),
                kind: "number".into()
            }
        );
        assert_eq!(err.key(), "build_rule");
        assert!(Rule::from_value(ty, &json!(["a"])).is_err());
        assert!(Rule::from_value(ty, &json!({ "text": 3 })).is_err());
    }

    #[test]
    fn descriptor_serializes_without_empty_fields() {
        let mut rule = RuleSchema::new("empty", "Is empty");
        rule.rule_type = Some(RuleType::Empty);
        assert_eq!(
            serde_json::to_value(&rule).unwrap(),
            json!({ "value": "empty", "text": "Is empty", "type": "empty" })
        );
    }
}
