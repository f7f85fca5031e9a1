//! Breadcrumb path from the hierarchy root to the current container.

use serde::Serialize;

use datahub_core::AppError;
use datahub_core::result::AppResult;
use datahub_core::types::ResourceId;
use datahub_entity::{Resource, ResourceKind};

/// Ordered path of containers. The first element is always a
/// collection or user root; the last is the container being shown.
#[derive(Debug, Clone)]
pub struct Breadcrumbs {
    path: Vec<Resource>,
}

/// One clickable ancestor in the rendered breadcrumb.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreadcrumbLink {
    /// Position in the path; emitted when the link is clicked.
    pub index: usize,
    /// Resource kind.
    pub kind: ResourceKind,
    /// Resource id.
    pub id: ResourceId,
    /// Display name.
    pub name: String,
}

/// Rendered breadcrumb: links to every ancestor plus the current label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreadcrumbView {
    /// Clickable ancestors, root first.
    pub links: Vec<BreadcrumbLink>,
    /// The current container; not clickable.
    pub current: BreadcrumbLink,
}

impl Breadcrumbs {
    /// Build a path, checking that it starts at a root container and
    /// contains only containers.
    pub fn from_path(path: Vec<Resource>) -> AppResult<Self> {
        let Some(first) = path.first() else {
            return Err(AppError::validation("A breadcrumb path cannot be empty"));
        };
        if !first.kind().is_root() {
            return Err(AppError::validation(format!(
                "A hierarchy must start at a collection or user, not a {}",
                first.kind()
            )));
        }
        if let Some(bad) = path.iter().skip(1).find(|r| r.kind() != ResourceKind::Folder) {
            return Err(AppError::validation(format!(
                "Only folders can appear below the root, found a {}",
                bad.kind()
            )));
        }
        Ok(Self { path })
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Always false; a path holds at least its root.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// The root container.
    pub fn root(&self) -> &Resource {
        &self.path[0]
    }

    /// The container being shown.
    pub fn current(&self) -> &Resource {
        &self.path[self.path.len() - 1]
    }

    /// Mutable access to the container being shown.
    pub fn current_mut(&mut self) -> &mut Resource {
        let last = self.path.len() - 1;
        &mut self.path[last]
    }

    /// Elements root first.
    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.path.iter()
    }

    /// Descend into a child folder.
    pub fn push(&mut self, folder: Resource) -> AppResult<()> {
        if folder.kind() != ResourceKind::Folder {
            return Err(AppError::validation(format!(
                "Cannot descend into a {}",
                folder.kind()
            )));
        }
        self.path.push(folder);
        Ok(())
    }

    /// Ascend one level. Fails when only the root remains.
    pub fn pop(&mut self) -> AppResult<Resource> {
        if self.path.len() < 2 {
            return Err(AppError::validation("Already at the top of the hierarchy"));
        }
        self.path
            .pop()
            .ok_or_else(|| AppError::internal("Breadcrumb path unexpectedly empty"))
    }

    /// Jump back to the element at `index`, dropping everything after it.
    pub fn truncate_to(&mut self, index: usize) -> AppResult<&Resource> {
        if index >= self.path.len() {
            return Err(AppError::validation(format!(
                "No breadcrumb at position {index}"
            )));
        }
        self.path.truncate(index + 1);
        Ok(self.current())
    }

    /// Render all but the last element as links and the last as the
    /// current label.
    pub fn render(&self) -> BreadcrumbView {
        let mut links: Vec<BreadcrumbLink> = self
            .path
            .iter()
            .enumerate()
            .map(|(index, resource)| BreadcrumbLink {
                index,
                kind: resource.kind(),
                id: resource.id().clone(),
                name: resource.name().to_string(),
            })
            .collect();
        let current = links.pop().unwrap_or_else(|| BreadcrumbLink {
            index: 0,
            kind: ResourceKind::Collection,
            id: ResourceId::new(""),
            name: String::new(),
        });
        BreadcrumbView { links, current }
    }
}
