//! YAML → `ParsedRows`.

use crate::document::{from_document, Document, ParsedRows};
use crate::error::DslError;

/// Parse a YAML document. Mapping order is preserved, so rows and rules come
/// out in the order they are written.
pub fn parse_yaml_rows(yaml_src: &str) -> Result<ParsedRows, DslError> {
    let doc: Document = serde_yaml::from_str(yaml_src)?;
    from_document(doc)
}
