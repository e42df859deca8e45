//! The parsed document tree.
//!
//! Both the YAML loader and the JSON environment mirror produce a
//! [`ConfigDocument`]. Mapping keys are always strings on the wire, so
//! non-string YAML keys (`1: one`, `true: yes`) are stringified the same
//! way a JSON encoder would. When two keys stringify to the same text
//! (`1` and `"1"`) the later one wins and a warning is logged.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// A dynamically shaped document: scalar, sequence, or string-keyed mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigDocument {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Sequence(Vec<ConfigDocument>),
    Mapping(BTreeMap<String, ConfigDocument>),
}

impl ConfigDocument {
    pub fn is_null(&self) -> bool {
        matches!(self, ConfigDocument::Null)
    }

    /// Top-level keys when the document is a mapping, empty otherwise.
    pub fn keys(&self) -> Vec<&str> {
        match self {
            ConfigDocument::Mapping(map) => map.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Look up a top-level key of a mapping document.
    pub fn get(&self, key: &str) -> Option<&ConfigDocument> {
        match self {
            ConfigDocument::Mapping(map) => map.get(key),
            _ => None,
        }
    }

    /// Encode as compact JSON, the form stored in the environment mirror.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decode from the JSON form stored in the environment mirror.
    pub fn from_json_str(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

impl From<serde_yaml::Value> for ConfigDocument {
    fn from(value: serde_yaml::Value) -> Self {
        use serde_yaml::Value;

        match value {
            Value::Null => ConfigDocument::Null,
            Value::Bool(b) => ConfigDocument::Bool(b),
            Value::Number(n) => from_yaml_number(&n),
            Value::String(s) => ConfigDocument::String(s),
            Value::Sequence(items) => {
                ConfigDocument::Sequence(items.into_iter().map(ConfigDocument::from).collect())
            }
            Value::Mapping(map) => {
                let mut out = BTreeMap::new();
                for (k, v) in map {
                    let key = mapping_key(k);
                    if out.insert(key.clone(), ConfigDocument::from(v)).is_some() {
                        warn!(
                            "Duplicate mapping key '{}' after stringifying, keeping last value",
                            key
                        );
                    }
                }
                ConfigDocument::Mapping(out)
            }
            // Application tags carry no meaning for JSON output.
            Value::Tagged(tagged) => ConfigDocument::from(tagged.value),
        }
    }
}

impl From<serde_json::Value> for ConfigDocument {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => ConfigDocument::Null,
            Value::Bool(b) => ConfigDocument::Bool(b),
            Value::Number(n) => ConfigDocument::Number(n),
            Value::String(s) => ConfigDocument::String(s),
            Value::Array(items) => {
                ConfigDocument::Sequence(items.into_iter().map(ConfigDocument::from).collect())
            }
            Value::Object(map) => ConfigDocument::Mapping(
                map.into_iter()
                    .map(|(k, v)| (k, ConfigDocument::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Convert a YAML number. `.inf` and `.nan` have no JSON form and are kept
/// as their YAML spelling.
fn from_yaml_number(n: &serde_yaml::Number) -> ConfigDocument {
    if let Some(u) = n.as_u64() {
        return ConfigDocument::Number(u.into());
    }
    if let Some(i) = n.as_i64() {
        return ConfigDocument::Number(i.into());
    }
    n.as_f64()
        .and_then(serde_json::Number::from_f64)
        .map(ConfigDocument::Number)
        .unwrap_or_else(|| ConfigDocument::String(n.to_string()))
}

fn mapping_key(key: serde_yaml::Value) -> String {
    use serde_yaml::Value;

    match key {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Tagged(tagged) => mapping_key(tagged.value),
        complex => serde_yaml::to_string(&complex)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
