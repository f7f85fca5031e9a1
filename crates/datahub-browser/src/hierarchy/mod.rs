//! The hierarchy browser and its parts.

pub mod ancestors;
pub mod browser;
pub mod menu;
pub mod view;

use serde::Serialize;

use datahub_entity::{ResourceRef, ResourceSet};

pub use browser::HierarchyBrowser;
pub use menu::CheckedMenu;
pub use view::{ContainerActions, ContainerView, HierarchyView, RowView};

/// Destructive hierarchy actions awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum HierarchyAction {
    /// Delete the checked resources with one bulk request.
    DeleteChecked {
        /// The checked resources at the time of the request.
        resources: ResourceSet,
    },
    /// Delete the folder being shown, then ascend.
    DeleteContainer {
        /// The folder.
        target: ResourceRef,
    },
}
