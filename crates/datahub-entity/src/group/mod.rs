//! Group entity model.

use serde::{Deserialize, Serialize};

use datahub_core::types::{AccessLevel, ResourceId};

/// A named group of users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Unique group identifier.
    #[serde(rename = "_id")]
    pub id: ResourceId,
    /// Group name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Whether the group is publicly visible.
    #[serde(default)]
    pub public: bool,
    /// The viewer's access level.
    #[serde(rename = "_accessLevel", default, skip_serializing_if = "Option::is_none")]
    pub access_level: Option<AccessLevel>,
}
