//! Configuration document definitions.

use crate::placeholder::{Placeholder, parse_placeholder};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One loaded configuration document.
///
/// Documents are immutable once loaded; per-variant working state lives in
/// the engine, never here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationDocument {
    /// Parent reference: a path, or a serialized chain blob.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherit: Option<String>,

    /// Declared output artifacts, in declaration order.
    pub files: Vec<FileTemplate>,

    /// Tag id to output directory registrations.
    #[serde(default)]
    pub tags: Vec<TagEntry>,

    /// Variable groups, optionally scoped to tags through their id.
    pub groups: Vec<VariableGroup>,
}

impl ConfigurationDocument {
    /// Directory registered for `tag_id` in this document only.
    pub fn tag_path(&self, tag_id: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.id == tag_id)
            .map(|tag| tag.path.as_str())
    }
}

/// A declared output artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTemplate {
    /// Identifier used in error messages.
    #[serde(default)]
    pub id: String,

    /// Path to the template bytes.
    pub path: String,

    /// Output name pattern, e.g. `app.yml<dev><prod>`.
    #[serde(default)]
    pub output: String,
}

impl FileTemplate {
    pub fn output_placeholder(&self) -> Placeholder {
        parse_placeholder(&self.output)
    }
}

/// Output directory registered for a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagEntry {
    pub id: String,
    pub path: String,
}

/// A named table of substitutions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableGroup {
    /// Group name, optionally followed by the tags it applies under (`db<dev>`).
    pub id: String,

    #[serde(default)]
    pub items: Vec<GroupItem>,
}

impl VariableGroup {
    pub fn id_placeholder(&self) -> Placeholder {
        parse_placeholder(&self.id)
    }
}

/// One substitution within a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupItem {
    pub id: String,
    pub value: ItemValue,
}

/// The shape of an item value, decided once when the document is parsed.
///
/// Only integers, strings and mappings can be rendered into template bytes.
/// Everything else (sequences, floats, booleans, null) is kept as
/// `Unsupported` so the failure surfaces when the value is actually used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemValue {
    Integer(i64),
    Text(String),
    Mapping(Map<String, Value>),
    Unsupported(Value),
}

impl ItemValue {
    /// Human-readable name of the value's shape.
    pub fn kind(&self) -> &'static str {
        match self {
            ItemValue::Integer(_) => "integer",
            ItemValue::Text(_) => "string",
            ItemValue::Mapping(_) => "mapping",
            ItemValue::Unsupported(Value::Array(_)) => "sequence",
            ItemValue::Unsupported(Value::Number(n)) if n.is_f64() => "non-integer number",
            ItemValue::Unsupported(Value::Number(_)) => "number outside the integer range",
            ItemValue::Unsupported(Value::Bool(_)) => "boolean",
            ItemValue::Unsupported(Value::Null) => "null",
            ItemValue::Unsupported(_) => "unsupported value",
        }
    }
}

/// Document as it appears on disk, before required fields are checked.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawDocument {
    pub inherit: Option<String>,
    pub files: Option<Vec<FileTemplate>>,
    pub tags: Option<Vec<TagEntry>>,
    pub groups: Option<Vec<RawGroup>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawGroup {
    pub id: String,
    #[serde(default)]
    pub items: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawItem {
    pub id: String,
    #[serde(default, deserialize_with = "present_value")]
    pub value: Option<ItemValue>,
}

/// An explicit `null` is a value (an unsupported one), not a missing field.
fn present_value<'de, D>(deserializer: D) -> Result<Option<ItemValue>, D::Error>
where
    D: Deserializer<'de>,
{
    ItemValue::deserialize(deserializer).map(Some)
}
