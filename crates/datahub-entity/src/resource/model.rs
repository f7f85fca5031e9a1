//! A fetched resource of any kind.

use serde::{Deserialize, Serialize};

use datahub_core::types::{AccessLevel, ResourceId};

use super::{ResourceKind, ResourceRef};
use crate::{Collection, Folder, Group, Item, User};

/// Any resource returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "_modelType", rename_all = "lowercase")]
pub enum Resource {
    /// A folder.
    Folder(Folder),
    /// An item.
    Item(Item),
    /// A collection.
    Collection(Collection),
    /// A user.
    User(User),
    /// A group.
    Group(Group),
}

impl Resource {
    /// The resource kind.
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Folder(_) => ResourceKind::Folder,
            Self::Item(_) => ResourceKind::Item,
            Self::Collection(_) => ResourceKind::Collection,
            Self::User(_) => ResourceKind::User,
            Self::Group(_) => ResourceKind::Group,
        }
    }

    /// The resource id.
    pub fn id(&self) -> &ResourceId {
        match self {
            Self::Folder(f) => &f.id,
            Self::Item(i) => &i.id,
            Self::Collection(c) => &c.id,
            Self::User(u) => &u.id,
            Self::Group(g) => &g.id,
        }
    }

    /// Display name; users show their login.
    pub fn name(&self) -> &str {
        match self {
            Self::Folder(f) => &f.name,
            Self::Item(i) => &i.name,
            Self::Collection(c) => &c.name,
            Self::User(u) => &u.login,
            Self::Group(g) => &g.name,
        }
    }

    /// The viewer's access level. Items carry none of their own; their
    /// level is that of the folder holding them.
    pub fn access_level(&self) -> Option<AccessLevel> {
        match self {
            Self::Folder(f) => f.access_level,
            Self::Item(_) => None,
            Self::Collection(c) => c.access_level,
            Self::User(u) => u.access_level,
            Self::Group(g) => g.access_level,
        }
    }

    /// Access level, treating an unreported level as `None`.
    pub fn effective_access(&self) -> AccessLevel {
        self.access_level().unwrap_or(AccessLevel::None)
    }

    /// A (kind, id) reference to this resource.
    pub fn to_ref(&self) -> ResourceRef {
        ResourceRef::new(self.kind(), self.id().clone())
    }

    /// The folder, if this is one.
    pub fn as_folder(&self) -> Option<&Folder> {
        match self {
            Self::Folder(f) => Some(f),
            _ => None,
        }
    }

    /// Mutable folder access, if this is one.
    pub fn as_folder_mut(&mut self) -> Option<&mut Folder> {
        match self {
            Self::Folder(f) => Some(f),
            _ => None,
        }
    }
}

impl From<Folder> for Resource {
    fn from(folder: Folder) -> Self {
        Self::Folder(folder)
    }
}

impl From<Item> for Resource {
    fn from(item: Item) -> Self {
        Self::Item(item)
    }
}

impl From<Collection> for Resource {
    fn from(collection: Collection) -> Self {
        Self::Collection(collection)
    }
}

impl From<User> for Resource {
    fn from(user: User) -> Self {
        Self::User(user)
    }
}

impl From<Group> for Resource {
    fn from(group: Group) -> Self {
        Self::Group(group)
    }
}
