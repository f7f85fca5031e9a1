//! Metadata attached to folders and items.

pub mod value;

pub use value::MetadataValue;

/// Key/value metadata as stored by the backend.
pub type Metadata = serde_json::Map<String, serde_json::Value>;
