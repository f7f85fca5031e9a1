//! URL-fragment routes and their parsed form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use datahub_core::AppError;
use datahub_core::types::ResourceId;
use datahub_entity::{ResourceKind, ResourceRef};

/// A location in the user interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Route {
    /// `collections`
    Collections,
    /// `users`
    Users,
    /// `groups`
    Groups,
    /// `admin`
    Admin,
    /// `item/<id>`
    Item(ResourceId),
    /// `folder/<id>`: a folder whose root is not yet resolved.
    Folder(ResourceId),
    /// `<collection|user>/<id>[/folder/<id>]`
    Hierarchy {
        /// The root container.
        root: ResourceRef,
        /// The folder being shown below the root, if any.
        folder: Option<ResourceId>,
    },
}

impl Route {
    /// Route of a hierarchy position.
    pub fn hierarchy(root: ResourceRef, folder: Option<ResourceId>) -> Self {
        Self::Hierarchy { root, folder }
    }

    /// The name of the top-level section this route belongs to, as used
    /// by the navigation links.
    pub fn section(&self) -> &'static str {
        match self {
            Self::Collections => "collections",
            Self::Users => "users",
            Self::Groups => "groups",
            Self::Admin => "admin",
            Self::Item(_) | Self::Folder(_) => "folder",
            Self::Hierarchy { root, .. } => match root.kind {
                ResourceKind::User => "users",
                _ => "collections",
            },
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collections => write!(f, "collections"),
            Self::Users => write!(f, "users"),
            Self::Groups => write!(f, "groups"),
            Self::Admin => write!(f, "admin"),
            Self::Item(id) => write!(f, "item/{id}"),
            Self::Folder(id) => write!(f, "folder/{id}"),
            Self::Hierarchy { root, folder: None } => write!(f, "{}/{}", root.kind, root.id),
            Self::Hierarchy {
                root,
                folder: Some(folder),
            } => write!(f, "{}/{}/folder/{folder}", root.kind, root.id),
        }
    }
}

impl FromStr for Route {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('#').trim_matches('/');
        let parts: Vec<&str> = trimmed.split('/').collect();
        let invalid = || AppError::validation(format!("Unknown route: {s}"));
        match parts.as_slice() {
            ["collections"] => Ok(Self::Collections),
            ["users"] => Ok(Self::Users),
            ["groups"] => Ok(Self::Groups),
            ["admin"] => Ok(Self::Admin),
            ["item", id] => Ok(Self::Item(id.parse()?)),
            ["folder", id] => Ok(Self::Folder(id.parse()?)),
            [kind, id] => {
                let kind = root_kind(kind).ok_or_else(invalid)?;
                Ok(Self::Hierarchy {
                    root: ResourceRef::new(kind, id.parse::<ResourceId>()?),
                    folder: None,
                })
            }
            [kind, id, "folder", folder] => {
                let kind = root_kind(kind).ok_or_else(invalid)?;
                Ok(Self::Hierarchy {
                    root: ResourceRef::new(kind, id.parse::<ResourceId>()?),
                    folder: Some(folder.parse()?),
                })
            }
            _ => Err(invalid()),
        }
    }
}

fn root_kind(name: &str) -> Option<ResourceKind> {
    name.parse::<ResourceKind>().ok().filter(|k| k.is_root())
}

impl TryFrom<String> for Route {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Route> for String {
    fn from(route: Route) -> Self {
        route.to_string()
    }
}
