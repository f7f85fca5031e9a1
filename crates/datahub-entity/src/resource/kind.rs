//! Resource kinds known to the backend.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use datahub_core::AppError;

/// Type of a backend resource.
///
/// The declaration order is the order in which kinds are listed in
/// bulk payloads and descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// A folder; holds folders and items.
    Folder,
    /// An item; leaf holding files.
    Item,
    /// A top-level collection; holds folders.
    Collection,
    /// A user; holds folders.
    User,
    /// A group of users.
    Group,
}

impl ResourceKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::Item => "item",
            Self::Collection => "collection",
            Self::User => "user",
            Self::Group => "group",
        }
    }

    /// Whether resources of this kind can be the root of a hierarchy.
    pub fn is_root(&self) -> bool {
        matches!(self, Self::Collection | Self::User)
    }

    /// Whether this kind can appear in bulk delete/move/copy payloads.
    pub fn is_movable(&self) -> bool {
        matches!(self, Self::Folder | Self::Item)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "folder" => Ok(Self::Folder),
            "item" => Ok(Self::Item),
            "collection" => Ok(Self::Collection),
            "user" => Ok(Self::User),
            "group" => Ok(Self::Group),
            _ => Err(AppError::validation(format!("Invalid resource type: '{s}'"))),
        }
    }
}
