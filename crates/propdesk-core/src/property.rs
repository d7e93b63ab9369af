//! Property records and identity coercion.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single property listing.
///
/// Listings are opaque JSON objects: the catalogue frontend decides which
/// attributes exist (title, price, address, image, description). The only
/// field with meaning on this side is `id`, which identifies the record
/// within the collection document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Property(Value);

impl Property {
    /// Wraps a raw JSON value as a property record.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns the record's identity key.
    ///
    /// Identity is the string coercion of the `id` field, so the number `1`
    /// and the string `"1"` name the same record. A missing `id` coerces
    /// like JSON null.
    pub fn id_key(&self) -> String {
        match self.0.get("id") {
            None | Some(Value::Null) => "null".to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Borrows the underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the record, returning the underlying JSON value.
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for Property {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
