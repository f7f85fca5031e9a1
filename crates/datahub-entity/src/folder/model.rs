//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use datahub_core::types::{AccessLevel, ResourceId};

use crate::metadata::Metadata;
use crate::resource::{ResourceKind, ResourceRef};

/// A folder in the data hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    /// Unique folder identifier.
    #[serde(rename = "_id")]
    pub id: ResourceId,
    /// Folder name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Kind of the parent: folder, collection or user.
    #[serde(rename = "parentCollection")]
    pub parent_kind: ResourceKind,
    /// Parent identifier.
    #[serde(rename = "parentId")]
    pub parent_id: ResourceId,
    /// Whether the folder is publicly readable.
    #[serde(default)]
    pub public: bool,
    /// The viewer's access level, when the backend reports it.
    #[serde(rename = "_accessLevel", default, skip_serializing_if = "Option::is_none")]
    pub access_level: Option<AccessLevel>,
    /// User metadata.
    #[serde(default)]
    pub meta: Metadata,
    /// Total size of contained files in bytes.
    #[serde(default)]
    pub size: u64,
    /// When the folder was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// When the folder was last updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}

impl Folder {
    /// Reference to this folder's parent.
    pub fn parent_ref(&self) -> ResourceRef {
        ResourceRef::new(self.parent_kind, self.parent_id.clone())
    }

    /// Whether the folder sits directly under a collection or user.
    pub fn is_top_level(&self) -> bool {
        self.parent_kind != ResourceKind::Folder
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// The parent container.
    pub parent: ResourceRef,
    /// Folder name.
    pub name: String,
    /// Description.
    pub description: String,
}

/// Editable folder fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateFolder {
    /// New name.
    pub name: String,
    /// New description.
    pub description: String,
}
