//! Core domain model for the property listings catalogue.
//!
//! Provides the `Property` record, the collection document it lives in, and
//! the mutation taxonomy applied by the admin endpoint. Everything here is
//! pure and in-memory; persistence belongs to the platform client.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod collection;
pub mod error;
pub mod property;

pub use collection::{PropertyCollection, UpdateAction};
pub use error::{CoreError, Result};
pub use property::Property;

/// Storage bucket holding the collection document.
pub const PROPERTIES_BUCKET: &str = "properties";

/// Object key of the collection document within the bucket.
pub const PROPERTIES_OBJECT: &str = "properties.json";
