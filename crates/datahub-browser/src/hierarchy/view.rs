//! Render-ready state of the hierarchy browser.

use serde::Serialize;

use datahub_core::types::{AccessLevel, ResourceId};
use datahub_entity::ResourceKind;

use super::menu::CheckedMenu;
use crate::breadcrumb::BreadcrumbView;
use crate::metadata::MetadataView;

/// The container being shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerView {
    /// Container kind.
    pub kind: ResourceKind,
    /// Container id.
    pub id: ResourceId,
    /// Display name.
    pub name: String,
    /// Description, for folders.
    pub description: String,
    /// The viewer's access level on the container.
    pub access_level: AccessLevel,
}

/// Which container actions are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContainerActions {
    /// Create a sub-folder.
    pub create_folder: bool,
    /// Create an item; folders only.
    pub create_item: bool,
    /// Edit name and description; folders only.
    pub edit: bool,
    /// Delete the folder.
    pub delete: bool,
    /// Download the whole container.
    pub download: bool,
}

impl ContainerActions {
    /// Actions available on a container of `kind` at `level`.
    pub fn for_container(kind: ResourceKind, level: AccessLevel) -> Self {
        let folder = kind == ResourceKind::Folder;
        Self {
            create_folder: level >= AccessLevel::Write,
            create_item: folder && level >= AccessLevel::Write,
            edit: folder && level >= AccessLevel::Write,
            delete: folder && level >= AccessLevel::Admin,
            download: level >= AccessLevel::Read,
        }
    }

    /// Whether no action is offered.
    pub fn is_empty(&self) -> bool {
        !(self.create_folder || self.create_item || self.edit || self.delete || self.download)
    }
}

/// One row of a child list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    /// Entry kind.
    pub kind: ResourceKind,
    /// Entry id.
    pub id: ResourceId,
    /// Display name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Whether the checkbox is ticked.
    pub checked: bool,
}

/// Everything needed to present the hierarchy browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchyView {
    /// Route of the current position.
    pub route: String,
    /// Breadcrumb bar.
    pub breadcrumb: BreadcrumbView,
    /// The container being shown.
    pub container: ContainerView,
    /// Container actions menu.
    pub actions: ContainerActions,
    /// Checked-actions menu.
    pub menu: CheckedMenu,
    /// Child folders.
    pub folders: Vec<RowView>,
    /// Whether more folders can be loaded.
    pub more_folders: bool,
    /// Child items; present for folder containers.
    pub items: Option<Vec<RowView>>,
    /// Whether more items can be loaded.
    pub more_items: bool,
    /// Folder metadata; present for folder containers.
    pub metadata: Option<MetadataView>,
    /// Whether the container is known to hold nothing.
    pub empty: bool,
}
