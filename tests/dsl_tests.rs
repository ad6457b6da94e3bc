//! YAML/JSON document parsing and building

use filterows_core::Error;
use filterows_dsl::{parse_json_rows, parse_rows, parse_yaml_rows, DslError, Format};

#[test]
fn test_parse_yaml_document() {
    let yaml = r#"
keys: [name, price, active, shipped]
rows:
  name:
    text: Name
    type: string
    rules:
      contains: Contains
      starts-with: { text: Starts with, renderSeparator: true }
  price:
    text: Price
    type: number
    order: 2
    rules: { gte: At least, lte: At most }
  active:
    text: Active
    type: boolean
    options:
      - { text: Yes, value: is }
      - { text: No, value: is-not }
    rules: { is: Is }
  shipped:
    text: Shipped
    type: date.days
    from: 2024-01-01
    to: 2024-12-31
    rules: { saturday: Saturday, sunday: Sunday }
"#;

    let rows = parse_yaml_rows(yaml).unwrap().build().unwrap();
    let keys: Vec<&str> = rows.iter().map(|r| r.value.as_str()).collect();
    assert_eq!(keys, vec!["name", "price", "active", "shipped"]);
    assert_eq!(rows.get("price").unwrap().order, Some(2));
    assert_eq!(rows.get("active").unwrap().options.as_ref().unwrap().len(), 2);

    let json = serde_json::to_value(&rows).unwrap();
    assert_eq!(json[3]["from"], "2024-01-01");
    assert_eq!(json[0]["rules"][1]["renderSeparator"], true);
}

#[test]
fn test_parse_json_document() {
    let json = r#"{
        "rows": {
            "name": { "text": "Name", "type": "string", "value": "full_name",
                      "rules": { "is": { "value": "is", "text": "Is exactly" } } }
        }
    }"#;
    let rows = parse_rows(json, Format::Json).unwrap().build().unwrap();
    let row = rows.get("full_name").unwrap();
    assert_eq!(row.rules[0].text, "Is exactly");
}

#[test]
fn test_json_and_yaml_agree() {
    let yaml = "rows:\n  n: { text: N, type: number, rules: { eq: Equals } }\n";
    let json = r#"{ "rows": { "n": { "text": "N", "type": "number", "rules": { "eq": "Equals" } } } }"#;
    let from_yaml = parse_yaml_rows(yaml).unwrap().build().unwrap();
    let from_json = parse_json_rows(json).unwrap().build().unwrap();
    assert_eq!(from_yaml, from_json);
}

#[test]
fn test_invalid_operator_surfaces_core_error() {
    let yaml = "rows:\n  n: { text: N, type: number, rules: { contains: Contains } }\n";
    let err = parse_yaml_rows(yaml).unwrap().build().unwrap_err();
    match err {
        DslError::Build(Error::InvalidOperator { valid, .. }) => {
            assert_eq!(valid.unwrap().len(), 6);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_options_on_non_boolean_row() {
    let yaml = r#"
rows:
  n:
    text: N
    type: number
    options: [{ text: Yes, value: is }]
    rules: { eq: Equals }
"#;
    let err = parse_yaml_rows(yaml).unwrap().build().unwrap_err();
    assert!(matches!(err, DslError::Build(Error::InvalidRowOption { .. })));
}
