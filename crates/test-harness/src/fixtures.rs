//! Fixture builders for property records and mutation requests.

use serde_json::{json, Map, Value};

/// Builder for property record fixtures.
///
/// # Example
///
/// ```
/// use test_harness::fixtures::PropertyBuilder;
///
/// let record = PropertyBuilder::new("42").title("Loft").price(325_000).build();
/// assert_eq!(record["id"], "42");
/// ```
pub struct PropertyBuilder {
    fields: Map<String, Value>,
}

impl PropertyBuilder {
    /// Starts a property with the given id.
    pub fn new(id: impl Into<Value>) -> Self {
        let mut fields = Map::new();
        fields.insert("id".to_string(), id.into());
        Self { fields }
    }

    /// Sets the listing title.
    pub fn title(mut self, title: &str) -> Self {
        self.fields.insert("title".to_string(), json!(title));
        self
    }

    /// Sets the asking price.
    pub fn price(mut self, price: u64) -> Self {
        self.fields.insert("price".to_string(), json!(price));
        self
    }

    /// Sets the address line.
    pub fn address(mut self, address: &str) -> Self {
        self.fields.insert("address".to_string(), json!(address));
        self
    }

    /// Sets an arbitrary attribute.
    pub fn field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    /// Builds the record.
    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

/// A minimal property record.
pub fn property(id: impl Into<Value>, title: &str) -> Value {
    PropertyBuilder::new(id).title(title).build()
}

/// A well-formed mutation request body.
pub fn update_request(action: &str, property: &Value) -> Value {
    json!({ "action": action, "property": property })
}
