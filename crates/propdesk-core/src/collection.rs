//! The collection document and its mutations.
//!
//! The full catalogue is one ordered JSON array, read and rewritten
//! wholesale on every mutation. There is no uniqueness constraint and no
//! versioning; writers race and the last writer wins.

use std::{fmt, str::FromStr};

use crate::{error::CoreError, property::Property, Result};

/// Mutation applied to the collection document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateAction {
    /// Append the record to the end of the collection.
    Add,
    /// Replace every record whose id matches the payload's id.
    Edit,
    /// Remove every record whose id matches the payload's id.
    Delete,
}

impl FromStr for UpdateAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "add" => Ok(Self::Add),
            "edit" => Ok(Self::Edit),
            "delete" => Ok(Self::Delete),
            other => Err(CoreError::UnknownAction(other.to_string())),
        }
    }
}

impl fmt::Display for UpdateAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Edit => write!(f, "edit"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// The ordered set of all property records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyCollection(Vec<Property>);

impl PropertyCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Creates a collection from existing records.
    pub fn from_properties(properties: Vec<Property>) -> Self {
        Self(properties)
    }

    /// Parses a stored document.
    ///
    /// An empty body is a valid empty collection; anything else must be a
    /// JSON array.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Ok(Self::new());
        }
        let properties = serde_json::from_slice(bytes)
            .map_err(|e| CoreError::MalformedDocument(e.to_string()))?;
        Ok(Self(properties))
    }

    /// Serializes the collection the way it is stored: a pretty-printed
    /// JSON array with 2-space indentation.
    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.0).map_err(|e| CoreError::MalformedDocument(e.to_string()))
    }

    /// Applies a mutation in place.
    ///
    /// Matching is by coerced id key. `add` never checks for duplicates;
    /// `edit` and `delete` touch every matching record and are no-ops when
    /// nothing matches. Record order is preserved throughout.
    pub fn apply(&mut self, action: UpdateAction, property: Property) {
        match action {
            UpdateAction::Add => self.0.push(property),
            UpdateAction::Edit => {
                let key = property.id_key();
                for slot in &mut self.0 {
                    if slot.id_key() == key {
                        *slot = property.clone();
                    }
                }
            },
            UpdateAction::Delete => {
                let key = property.id_key();
                self.0.retain(|p| p.id_key() != key);
            },
        }
    }

    /// Number of records in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the collection holds no records.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrows the records in document order.
    pub fn properties(&self) -> &[Property] {
        &self.0
    }

    /// Consumes the collection, returning the records.
    pub fn into_properties(self) -> Vec<Property> {
        self.0
    }
}
