use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{MxError, MxErrorKind};

/// Package manifest wrapper over an ordered JSON object
///
/// Stores arbitrary manifest fields as JSON values, preserving the key
/// order found in the file so that rewrites do not reshuffle the
/// author's layout. Schema knowledge is deliberately thin: only `name`
/// and `version` get typed accessors, everything else is opaque data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Manifest {
    fields: Map<String, Value>,
}

impl Manifest {
    /// Create a new empty Manifest instance
    pub fn new() -> Self {
        Self { fields: Map::new() }
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Set a value by key
    pub fn set(&mut self, key: String, value: Value) {
        self.fields.insert(key, value);
    }

    /// Remove a value by key, preserving the order of the remaining fields
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    /// Check if a key exists
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Get all keys in manifest order
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }

    /// Get the number of manifest fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the manifest has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get the package name, if present and a string
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    /// Get the package version, if present and a string
    pub fn version(&self) -> Option<&str> {
        self.fields.get("version").and_then(Value::as_str)
    }

    /// Render the manifest as a JSON value
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

impl From<Map<String, Value>> for Manifest {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl From<Manifest> for Map<String, Value> {
    fn from(manifest: Manifest) -> Self {
        manifest.fields
    }
}

impl From<Manifest> for Value {
    fn from(manifest: Manifest) -> Self {
        Value::Object(manifest.fields)
    }
}

impl TryFrom<Value> for Manifest {
    type Error = MxError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(MxError::new(MxErrorKind::InvalidManifest).with_message(format!(
                "manifest root must be a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
