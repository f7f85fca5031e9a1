//! Collection entity model.

use serde::{Deserialize, Serialize};

use datahub_core::types::{AccessLevel, ResourceId};

/// A top-level container of folders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    /// Unique collection identifier.
    #[serde(rename = "_id")]
    pub id: ResourceId,
    /// Collection name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Whether the collection is publicly readable.
    #[serde(default)]
    pub public: bool,
    /// The viewer's access level.
    #[serde(rename = "_accessLevel", default, skip_serializing_if = "Option::is_none")]
    pub access_level: Option<AccessLevel>,
    /// Total size in bytes.
    #[serde(default)]
    pub size: u64,
}
