//! (kind, id) references to resources.

use serde::{Deserialize, Serialize};
use std::fmt;

use datahub_core::types::ResourceId;

use super::ResourceKind;

/// Points at a single backend resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceRef {
    /// Resource type.
    pub kind: ResourceKind,
    /// Resource id.
    pub id: ResourceId,
}

impl ResourceRef {
    /// Create a reference.
    pub fn new(kind: ResourceKind, id: impl Into<ResourceId>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    /// Reference to a folder.
    pub fn folder(id: impl Into<ResourceId>) -> Self {
        Self::new(ResourceKind::Folder, id)
    }

    /// Reference to an item.
    pub fn item(id: impl Into<ResourceId>) -> Self {
        Self::new(ResourceKind::Item, id)
    }

    /// REST path of the resource, e.g. `folder/<id>`.
    pub fn path(&self) -> String {
        format!("{}/{}", self.kind, self.id)
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}
