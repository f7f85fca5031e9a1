//! State of the checked-resources action menu.

use serde::Serialize;

use datahub_core::types::AccessLevel;

/// What the checked-actions menu shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckedMenu {
    /// Lowest access level over the checked folders.
    pub min_folder_level: AccessLevel,
    /// Lowest access level over the checked items.
    pub min_item_level: AccessLevel,
    /// Number of checked folders.
    pub folder_count: usize,
    /// Number of checked items.
    pub item_count: usize,
    /// Number of picked resources in the session.
    pub picked_count: usize,
    /// Whether the picked resources may be copied here.
    pub picked_copy_allowed: bool,
    /// Whether the picked resources may be moved here.
    pub picked_move_allowed: bool,
    /// Description of the picked resources; empty when nothing is picked.
    pub picked_desc: String,
}

impl Default for CheckedMenu {
    fn default() -> Self {
        Self {
            min_folder_level: AccessLevel::Admin,
            min_item_level: AccessLevel::Admin,
            folder_count: 0,
            item_count: 0,
            picked_count: 0,
            picked_copy_allowed: false,
            picked_move_allowed: false,
            picked_desc: String::new(),
        }
    }
}

impl CheckedMenu {
    /// Number of checked resources.
    pub fn checked_count(&self) -> usize {
        self.folder_count + self.item_count
    }

    /// Whether the checked resources can be picked.
    pub fn can_pick(&self) -> bool {
        self.checked_count() > 0
    }

    /// Whether the checked resources can be downloaded.
    pub fn can_download(&self) -> bool {
        self.checked_count() > 0
    }

    /// Whether the checked resources can be deleted.
    pub fn can_delete(&self) -> bool {
        self.checked_count() > 0
            && self.min_folder_level >= AccessLevel::Admin
            && self.min_item_level >= AccessLevel::Write
    }
}
