//! Paged child listings with checkbox selection.

use tracing::warn;

use datahub_core::AppError;
use datahub_core::result::AppResult;
use datahub_core::types::{AccessLevel, PageRequest, ResourceId};
use datahub_entity::{Folder, Item, ResourceKind};

/// A row that can appear in a child list.
pub trait ListEntry: Clone {
    /// Kind of every entry in the list.
    const KIND: ResourceKind;

    /// Entry id.
    fn id(&self) -> &ResourceId;

    /// Display name.
    fn name(&self) -> &str;

    /// The viewer's own access level, if the entry carries one.
    fn access_level(&self) -> Option<AccessLevel>;

    /// Size in bytes.
    fn size(&self) -> u64;
}

impl ListEntry for Folder {
    const KIND: ResourceKind = ResourceKind::Folder;

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn access_level(&self) -> Option<AccessLevel> {
        self.access_level
    }

    fn size(&self) -> u64 {
        self.size
    }
}

impl ListEntry for Item {
    const KIND: ResourceKind = ResourceKind::Item;

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn access_level(&self) -> Option<AccessLevel> {
        None
    }

    fn size(&self) -> u64 {
        self.size
    }
}

/// Children of the current container and which of them are checked.
///
/// The checked set is transient: replacing the entries clears it.
#[derive(Debug, Clone)]
pub struct ChildList<T> {
    entries: Vec<T>,
    checked: Vec<ResourceId>,
    page: PageRequest,
    has_more: bool,
    loaded: bool,
}

impl<T: ListEntry> ChildList<T> {
    /// An unloaded list fetching `page_size` entries at a time.
    pub fn new(page_size: u64) -> Self {
        Self {
            entries: Vec::new(),
            checked: Vec::new(),
            page: PageRequest::first(page_size),
            has_more: false,
            loaded: false,
        }
    }

    /// The request for the first page.
    pub fn first_page(&self) -> PageRequest {
        PageRequest::first(self.page.limit)
    }

    /// The request for the page after the loaded ones.
    pub fn next_page(&self) -> PageRequest {
        self.page.next()
    }

    /// Replace all entries with a freshly fetched first page.
    pub fn replace(&mut self, entries: Vec<T>) {
        let page = self.first_page();
        self.has_more = page.may_have_more(entries.len());
        self.page = page;
        self.entries = Self::visible(entries);
        self.checked.clear();
        self.loaded = true;
    }

    /// Append the page fetched with [`next_page`](Self::next_page).
    /// Checked entries stay checked.
    pub fn append(&mut self, entries: Vec<T>) {
        let page = self.next_page();
        self.has_more = page.may_have_more(entries.len());
        self.page = page;
        for entry in Self::visible(entries) {
            if !self.entries.iter().any(|e| e.id() == entry.id()) {
                self.entries.push(entry);
            }
        }
    }

    /// Add a newly created entry to the list.
    pub fn insert(&mut self, entry: T) {
        self.entries.push(entry);
    }

    fn visible(mut entries: Vec<T>) -> Vec<T> {
        entries.retain(|entry| {
            let hidden = entry.access_level() == Some(AccessLevel::None);
            if hidden {
                warn!(kind = %T::KIND, id = %entry.id(), "Dropping inaccessible entry from listing");
            }
            !hidden
        });
        entries
    }

    /// Entries in display order.
    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the first page has arrived.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Whether another page may exist.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Look up an entry by id.
    pub fn get(&self, id: &ResourceId) -> Option<&T> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// Look up an entry by exact name.
    pub fn find_by_name(&self, name: &str) -> Option<&T> {
        self.entries.iter().find(|e| e.name() == name)
    }

    /// Set one entry's checkbox.
    pub fn set_checked(&mut self, id: &ResourceId, checked: bool) -> AppResult<()> {
        if self.get(id).is_none() {
            return Err(AppError::not_found(format!(
                "No {} with id {id} in this list",
                T::KIND
            )));
        }
        let position = self.checked.iter().position(|c| c == id);
        match (checked, position) {
            (true, None) => self.checked.push(id.clone()),
            (false, Some(index)) => {
                self.checked.remove(index);
            }
            _ => {}
        }
        Ok(())
    }

    /// Check or uncheck every entry.
    pub fn check_all(&mut self, checked: bool) {
        self.checked.clear();
        if checked {
            self.checked
                .extend(self.entries.iter().map(|e| e.id().clone()));
        }
    }

    /// Whether an entry is checked.
    pub fn is_checked(&self, id: &ResourceId) -> bool {
        self.checked.contains(id)
    }

    /// Ids of checked entries in the order they were checked.
    pub fn checked_ids(&self) -> &[ResourceId] {
        &self.checked
    }

    /// Checked entries in the order they were checked.
    pub fn checked_entries(&self) -> impl Iterator<Item = &T> {
        self.checked.iter().filter_map(|id| self.get(id))
    }
}
