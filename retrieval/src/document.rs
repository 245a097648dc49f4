//! Documents returned by the search index.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One search hit, restricted to the selected fields.
///
/// Every field is optional; a field the index did not return is kept as
/// `null` so the serialized shape is always the same five keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    #[serde(default)]
    pub content: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub filepath: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub meta_json_string: Option<String>,
}

impl RetrievedDocument {
    /// Build a document from one raw hit, field by field.
    ///
    /// A missing or non-string field becomes `None`; the hit is never
    /// rejected as a whole.
    pub fn from_hit(hit: &Value) -> Self {
        let field = |name: &str| hit.get(name).and_then(Value::as_str).map(str::to_string);
        Self {
            content: field("content"),
            url: field("url"),
            filepath: field("filepath"),
            title: field("title"),
            meta_json_string: field("meta_json_string"),
        }
    }
}

/// Comma-separated field list sent as `select`.
pub(crate) const SELECT_FIELDS: &str = "content,url,filepath,title,meta_json_string";
