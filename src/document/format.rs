//! Structured document formats.
//!
//! The same format is used to parse every document in a chain and to render
//! mapping values back into template bytes.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    #[default]
    Yaml,
    Json,
    Toml,
}

impl DocumentFormat {
    /// Parse a format name.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Guess the format from a file extension, defaulting to YAML.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_str)
            .unwrap_or_default()
    }

    /// Deserialize `text` in this format.
    pub fn parse<T: DeserializeOwned>(self, text: &str) -> Result<T, String> {
        match self {
            DocumentFormat::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
            DocumentFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            DocumentFormat::Toml => toml::from_str(text).map_err(|e| e.to_string()),
        }
    }

    /// Serialize a mapping value as a block of this format.
    pub fn render_mapping(self, mapping: &Map<String, Value>) -> Result<String, String> {
        match self {
            DocumentFormat::Yaml => serde_yaml::to_string(mapping).map_err(|e| e.to_string()),
            DocumentFormat::Json => {
                serde_json::to_string_pretty(mapping).map_err(|e| e.to_string())
            }
            DocumentFormat::Toml => toml::to_string(mapping).map_err(|e| e.to_string()),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentFormat::Yaml => "yaml",
            DocumentFormat::Json => "json",
            DocumentFormat::Toml => "toml",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mapping(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!(DocumentFormat::from_str("yaml"), Some(DocumentFormat::Yaml));
        assert_eq!(DocumentFormat::from_str("YML"), Some(DocumentFormat::Yaml));
        assert_eq!(DocumentFormat::from_str("json"), Some(DocumentFormat::Json));
        assert_eq!(DocumentFormat::from_str("toml"), Some(DocumentFormat::Toml));
        assert_eq!(DocumentFormat::from_str("ini"), None);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(DocumentFormat::from_path("a/conjure.json"), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path("conjure.toml"), DocumentFormat::Toml);
        assert_eq!(DocumentFormat::from_path("conjure.yml"), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path("conjure"), DocumentFormat::Yaml);
    }

    #[test]
    fn test_render_mapping_yaml() {
        let map = mapping(json!({"host": "db", "port": 5432}));
        let rendered = DocumentFormat::Yaml.render_mapping(&map).unwrap();
        assert_eq!(rendered, "host: db\nport: 5432\n");
    }

    #[test]
    fn test_render_mapping_json() {
        let map = mapping(json!({"host": "db"}));
        let rendered = DocumentFormat::Json.render_mapping(&map).unwrap();
        assert_eq!(rendered, "{\n  \"host\": \"db\"\n}");
    }

    #[test]
    fn test_render_mapping_toml() {
        let map = mapping(json!({"host": "db", "port": 5432}));
        let rendered = DocumentFormat::Toml.render_mapping(&map).unwrap();
        assert!(rendered.contains("host = \"db\""));
        assert!(rendered.contains("port = 5432"));
    }

    #[test]
    fn test_display() {
        assert_eq!(DocumentFormat::Toml.to_string(), "toml");
    }
}
