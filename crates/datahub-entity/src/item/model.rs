//! Item entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use datahub_core::types::ResourceId;

use crate::metadata::Metadata;

/// A leaf resource inside a folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Unique item identifier.
    #[serde(rename = "_id")]
    pub id: ResourceId,
    /// Item name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// The folder holding the item.
    #[serde(rename = "folderId")]
    pub folder_id: ResourceId,
    /// Total size of the item's files in bytes.
    #[serde(default)]
    pub size: u64,
    /// User metadata.
    #[serde(default)]
    pub meta: Metadata,
    /// When the item was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// When the item was last updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}

/// Data required to create a new item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItem {
    /// The folder receiving the item.
    pub folder_id: ResourceId,
    /// Item name.
    pub name: String,
    /// Description.
    pub description: String,
}
