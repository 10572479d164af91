//! Raw, untrusted measurement input as received from a form or JSON body

use std::collections::HashMap;

use super::FeatureId;

/// Raw string values keyed by wire identifier.
///
/// Nothing is checked here; unknown keys are carried but never read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMeasurements {
    fields: HashMap<String, String>,
}

impl RawMeasurements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Builder-style insert, convenient in tests and the CLI.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.fields.remove(key)
    }

    /// Raw value for a feature, if the caller supplied one.
    pub fn get(&self, id: FeatureId) -> Option<&str> {
        self.fields.get(id.as_str()).map(String::as_str)
    }

    /// Convert a JSON object body.
    ///
    /// Strings are taken verbatim and numbers use their JSON text. Any other
    /// value (`null`, booleans, arrays, objects) is kept as its JSON text so
    /// validation rejects it as an invalid number quoting what was sent.
    pub fn from_json_object(object: &serde_json::Map<String, serde_json::Value>) -> Self {
        let fields = object
            .iter()
            .map(|(key, value)| {
                let raw = match value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), raw)
            })
            .collect();
        Self { fields }
    }
}

impl From<HashMap<String, String>> for RawMeasurements {
    fn from(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawMeasurements {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
