//! Resources staged for a later move or copy.

use serde::Serialize;

use datahub_core::types::AccessLevel;
use datahub_entity::{ResourceKind, ResourceSet};

use crate::describe::describe_resources;

/// The checked resources of one view with their minimum access levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckedSelection {
    /// Checked ids per kind.
    pub resources: ResourceSet,
    /// Lowest access level over the checked folders; `Admin` when none.
    pub min_folder_level: AccessLevel,
    /// Lowest access level over the checked items; `Admin` when none.
    pub min_item_level: AccessLevel,
}

impl CheckedSelection {
    /// An empty selection.
    pub fn empty() -> Self {
        Self {
            resources: ResourceSet::new(),
            min_folder_level: AccessLevel::Admin,
            min_item_level: AccessLevel::Admin,
        }
    }

    /// Number of checked folders.
    pub fn folder_count(&self) -> usize {
        self.resources.count_of(ResourceKind::Folder)
    }

    /// Number of checked items.
    pub fn item_count(&self) -> usize {
        self.resources.count_of(ResourceKind::Item)
    }

    /// Whether nothing is checked.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// The session-wide picked store.
///
/// Picking merges a checked selection (set union) and keeps running
/// minimum access levels over everything ever merged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickedResources {
    resources: ResourceSet,
    min_folder_level: AccessLevel,
    min_item_level: AccessLevel,
}

impl Default for PickedResources {
    fn default() -> Self {
        Self {
            resources: ResourceSet::new(),
            min_folder_level: AccessLevel::Admin,
            min_item_level: AccessLevel::Admin,
        }
    }
}

impl PickedResources {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a selection; returns the number of resources that were not
    /// already picked.
    pub fn merge(&mut self, selection: &CheckedSelection) -> usize {
        let before = self.resources.count();
        self.resources.union(&selection.resources);
        if selection.folder_count() > 0 {
            self.min_folder_level = self.min_folder_level.min(selection.min_folder_level);
        }
        if selection.item_count() > 0 {
            self.min_item_level = self.min_item_level.min(selection.min_item_level);
        }
        self.resources.count() - before
    }

    /// Picked ids per kind.
    pub fn resources(&self) -> &ResourceSet {
        &self.resources
    }

    /// Running minimum over picked folders.
    pub fn min_folder_level(&self) -> AccessLevel {
        self.min_folder_level
    }

    /// Running minimum over picked items.
    pub fn min_item_level(&self) -> AccessLevel {
        self.min_item_level
    }

    /// Total number of picked resources.
    pub fn count(&self) -> usize {
        self.resources.count()
    }

    /// Number of picked items.
    pub fn item_count(&self) -> usize {
        self.resources.count_of(ResourceKind::Item)
    }

    /// Whether nothing is picked.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Human-readable description, e.g. `"2 folders and 1 item"`.
    pub fn description(&self) -> String {
        describe_resources(&self.resources)
    }
}

/// Whether the picked resources may be copied into the current
/// container.
///
/// Something must be picked, items can only land in folders, and the
/// viewer needs `Write` on the container.
pub fn copy_allowed(
    picked: Option<&PickedResources>,
    container_kind: ResourceKind,
    container_level: AccessLevel,
) -> bool {
    let Some(picked) = picked else {
        return false;
    };
    picked.count() > 0
        && (picked.item_count() == 0 || container_kind == ResourceKind::Folder)
        && container_level >= AccessLevel::Write
}

/// Whether the picked resources may be moved into the current container.
///
/// Moving removes the source, so on top of the copy rule every picked
/// folder needs `Admin` and every picked item needs `Write`.
pub fn move_allowed(
    picked: Option<&PickedResources>,
    container_kind: ResourceKind,
    container_level: AccessLevel,
) -> bool {
    copy_allowed(picked, container_kind, container_level)
        && picked.is_some_and(|p| {
            p.min_folder_level >= AccessLevel::Admin && p.min_item_level >= AccessLevel::Write
        })
}
