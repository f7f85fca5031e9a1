//! The hierarchy browser orchestrator.

use std::sync::Arc;

use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, info, warn};

use datahub_client::{FormSubmission, ResourceApi};
use datahub_core::AppError;
use datahub_core::events::UiEvent;
use datahub_core::result::AppResult;
use datahub_core::types::{AccessLevel, ResourceId, SortField};
use datahub_entity::folder::{CreateFolder, UpdateFolder};
use datahub_entity::item::CreateItem;
use datahub_entity::{Folder, Item, Resource, ResourceKind, ResourceRef, ResourceSet};

use super::HierarchyAction;
use super::ancestors::resolve_ancestors;
use super::menu::CheckedMenu;
use super::view::{ContainerActions, ContainerView, HierarchyView, RowView};
use crate::access::min_access_level;
use crate::breadcrumb::Breadcrumbs;
use crate::confirm::ConfirmPrompt;
use crate::describe::describe_resources;
use crate::list::{ChildList, ListEntry};
use crate::metadata::{MetadataAction, MetadataPanel};
use crate::picked::{self, CheckedSelection};
use crate::route::Route;
use crate::session::Session;

/// Browses folders and items below a collection or user.
///
/// Owns the breadcrumb, the child lists with their checked sets, and
/// the metadata panel of the current folder. Picked resources live in
/// the [`Session`] and survive navigation.
#[derive(Debug)]
pub struct HierarchyBrowser {
    api: Arc<dyn ResourceApi>,
    session: Arc<Session>,
    sort: SortField,
    page_size: u64,
    breadcrumbs: Breadcrumbs,
    folders: ChildList<Folder>,
    items: Option<ChildList<Item>>,
    metadata: Option<MetadataPanel>,
    menu: CheckedMenu,
    events: broadcast::Receiver<UiEvent>,
}

impl HierarchyBrowser {
    /// Open a browser at `root`, which may be a collection, a user or a
    /// folder. A folder's ancestors are fetched first.
    pub async fn open(
        api: Arc<dyn ResourceApi>,
        session: Arc<Session>,
        root: Resource,
        page_size: u64,
    ) -> AppResult<Self> {
        let path = match root {
            Resource::Folder(folder) => resolve_ancestors(api.as_ref(), folder).await?,
            other if other.kind().is_root() => vec![other],
            other => {
                return Err(AppError::validation(format!(
                    "Cannot browse a {}",
                    other.kind()
                )));
            }
        };
        let breadcrumbs = Breadcrumbs::from_path(path)?;
        let events = session.bus().subscribe();
        let mut browser = Self {
            api,
            session,
            sort: SortField::default(),
            page_size,
            breadcrumbs,
            folders: ChildList::new(page_size),
            items: None,
            metadata: None,
            menu: CheckedMenu::default(),
            events,
        };
        browser.set_current(false).await?;
        Ok(browser)
    }

    /// Open the browser a hierarchy route points at.
    pub async fn open_route(
        api: Arc<dyn ResourceApi>,
        session: Arc<Session>,
        route: &Route,
        page_size: u64,
    ) -> AppResult<Self> {
        let target = match route {
            Route::Hierarchy {
                folder: Some(folder),
                ..
            }
            | Route::Folder(folder) => ResourceRef::folder(folder.clone()),
            Route::Hierarchy { root, folder: None } => root.clone(),
            other => {
                return Err(AppError::validation(format!(
                    "The route {other} does not show a hierarchy"
                )));
            }
        };
        let root = api.fetch(&target).await?;
        Self::open(api, session, root, page_size).await
    }

    /// The container being shown.
    pub fn current(&self) -> &Resource {
        self.breadcrumbs.current()
    }

    fn current_ref(&self) -> ResourceRef {
        self.current().to_ref()
    }

    fn current_kind(&self) -> ResourceKind {
        self.current().kind()
    }

    /// The viewer's access level on the current container.
    pub fn access_level(&self) -> AccessLevel {
        self.current().effective_access()
    }

    /// The breadcrumb path.
    pub fn breadcrumbs(&self) -> &Breadcrumbs {
        &self.breadcrumbs
    }

    /// Child folders.
    pub fn folders(&self) -> &ChildList<Folder> {
        &self.folders
    }

    /// Child items, when the container is a folder.
    pub fn items(&self) -> Option<&ChildList<Item>> {
        self.items.as_ref()
    }

    /// The checked-actions menu.
    pub fn menu(&self) -> &CheckedMenu {
        &self.menu
    }

    /// Metadata of the current folder.
    pub fn metadata(&self) -> Option<&MetadataPanel> {
        self.metadata.as_ref()
    }

    /// Route of the current position.
    pub fn route(&self) -> Route {
        let folder = (self.current_kind() == ResourceKind::Folder)
            .then(|| self.current().id().clone());
        Route::hierarchy(self.breadcrumbs.root().to_ref(), folder)
    }

    /// Show the last element of `breadcrumbs`: fetch the first pages of
    /// its children, then swap in the new path and lists and, when
    /// asked, record the new route. On failure nothing changes.
    async fn show_path(&mut self, breadcrumbs: Breadcrumbs, set_route: bool) -> AppResult<()> {
        let current = breadcrumbs.current().clone();
        let target = current.to_ref();
        debug!(container = %target, "Loading container");

        let mut folders = ChildList::new(self.page_size);
        let fetched = self
            .api
            .list_folders(&target, folders.first_page(), &self.sort)
            .await?;
        folders.replace(fetched);

        let (items, metadata) = match &current {
            Resource::Folder(folder) => {
                let mut items = ChildList::new(self.page_size);
                let fetched = self
                    .api
                    .list_items(&folder.id, items.first_page(), &self.sort)
                    .await?;
                items.replace(fetched);
                let panel = MetadataPanel::new(
                    target.clone(),
                    current.effective_access(),
                    folder.meta.clone(),
                );
                (Some(items), Some(panel))
            }
            _ => (None, None),
        };

        self.breadcrumbs = breadcrumbs;
        self.folders = folders;
        self.items = items;
        self.metadata = metadata;
        self.update_checked();
        if set_route {
            self.session.navigate(self.route());
        }
        Ok(())
    }

    async fn set_current(&mut self, set_route: bool) -> AppResult<()> {
        let breadcrumbs = self.breadcrumbs.clone();
        self.show_path(breadcrumbs, set_route).await
    }

    /// Reload the current container in place, keeping the route.
    pub async fn refresh(&mut self) -> AppResult<()> {
        self.set_current(false).await
    }

    /// Descend into a child folder.
    pub async fn descend(&mut self, folder_id: &ResourceId) -> AppResult<()> {
        let folder = self
            .folders
            .get(folder_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("No child folder with id {folder_id}")))?;
        info!(folder_id = %folder.id, name = %folder.name, "Descending");
        let mut breadcrumbs = self.breadcrumbs.clone();
        breadcrumbs.push(Resource::Folder(folder))?;
        self.show_path(breadcrumbs, true).await
    }

    /// Go to the parent of the current folder.
    pub async fn ascend(&mut self) -> AppResult<()> {
        let mut breadcrumbs = self.breadcrumbs.clone();
        breadcrumbs.pop()?;
        self.show_path(breadcrumbs, true).await
    }

    /// Jump to the breadcrumb at `index`.
    pub async fn breadcrumb_clicked(&mut self, index: usize) -> AppResult<()> {
        let mut breadcrumbs = self.breadcrumbs.clone();
        breadcrumbs.truncate_to(index)?;
        self.show_path(breadcrumbs, true).await
    }

    /// Load the next page of folders.
    pub async fn show_more_folders(&mut self) -> AppResult<usize> {
        let page = self.folders.next_page();
        let fetched = self
            .api
            .list_folders(&self.current_ref(), page, &self.sort)
            .await?;
        let count = fetched.len();
        self.folders.append(fetched);
        self.update_checked();
        Ok(count)
    }

    /// Load the next page of items.
    pub async fn show_more_items(&mut self) -> AppResult<usize> {
        let folder_id = self.require_folder()?.id().clone();
        let Some(items) = self.items.as_mut() else {
            return Ok(0);
        };
        let fetched = self
            .api
            .list_items(&folder_id, items.next_page(), &self.sort)
            .await?;
        let count = fetched.len();
        items.append(fetched);
        self.update_checked();
        Ok(count)
    }

    /// Tick or clear a folder checkbox.
    pub fn check_folder(&mut self, id: &ResourceId, checked: bool) -> AppResult<()> {
        self.folders.set_checked(id, checked)?;
        self.update_checked();
        Ok(())
    }

    /// Tick or clear an item checkbox.
    pub fn check_item(&mut self, id: &ResourceId, checked: bool) -> AppResult<()> {
        let items = self
            .items
            .as_mut()
            .ok_or_else(|| AppError::not_found(format!("No item with id {id} here")))?;
        items.set_checked(id, checked)?;
        self.update_checked();
        Ok(())
    }

    /// Tick or clear every checkbox.
    pub fn check_all(&mut self, checked: bool) {
        self.folders.check_all(checked);
        if let Some(items) = self.items.as_mut() {
            items.check_all(checked);
        }
        self.update_checked();
    }

    /// Check a child by name, folders first.
    pub fn check_by_name(&mut self, name: &str, checked: bool) -> AppResult<()> {
        if let Some(id) = self.folders.find_by_name(name).map(|f| f.id.clone()) {
            return self.check_folder(&id, checked);
        }
        let item_id = self
            .items
            .as_ref()
            .and_then(|items| items.find_by_name(name))
            .map(|i| i.id.clone());
        match item_id {
            Some(id) => self.check_item(&id, checked),
            None => Err(AppError::not_found(format!("Nothing named {name} here"))),
        }
    }

    /// The checked resources with their minimum access levels.
    ///
    /// Items have no access level of their own and take the level of
    /// the current folder.
    pub fn checked_selection(&self) -> CheckedSelection {
        let mut selection = CheckedSelection::empty();
        selection.resources.extend(
            ResourceKind::Folder,
            self.folders.checked_ids().iter().cloned(),
        );
        selection.min_folder_level = min_access_level(
            self.folders
                .checked_entries()
                .map(|f| f.access_level().unwrap_or(AccessLevel::Read)),
        );
        let checked_items = self.items.as_ref().map_or(&[][..], |i| i.checked_ids());
        if !checked_items.is_empty() {
            selection
                .resources
                .extend(ResourceKind::Item, checked_items.iter().cloned());
            selection.min_item_level = AccessLevel::Admin.min(self.access_level());
        }
        selection
    }

    /// Recompute the checked-actions menu.
    pub fn update_checked(&mut self) {
        let selection = self.checked_selection();
        let picked = self.session.picked();
        self.menu = CheckedMenu {
            min_folder_level: selection.min_folder_level,
            min_item_level: selection.min_item_level,
            folder_count: selection.folder_count(),
            item_count: selection.item_count(),
            picked_count: picked.as_ref().map_or(0, |p| p.count()),
            picked_copy_allowed: self.copy_allowed_for(picked.as_ref()),
            picked_move_allowed: self.move_allowed_for(picked.as_ref()),
            picked_desc: picked.as_ref().map(|p| p.description()).unwrap_or_default(),
        };
    }

    fn copy_allowed_for(&self, picked: Option<&picked::PickedResources>) -> bool {
        picked::copy_allowed(picked, self.current_kind(), self.access_level())
    }

    fn move_allowed_for(&self, picked: Option<&picked::PickedResources>) -> bool {
        picked::move_allowed(picked, self.current_kind(), self.access_level())
    }

    /// Whether the picked resources may be copied here.
    pub fn copy_allowed(&self) -> bool {
        self.copy_allowed_for(self.session.picked().as_ref())
    }

    /// Whether the picked resources may be moved here.
    pub fn move_allowed(&self) -> bool {
        self.move_allowed_for(self.session.picked().as_ref())
    }

    /// Add the checked resources to the picked store and announce the
    /// result. Returns the alert text.
    pub fn pick_checked(&mut self) -> AppResult<String> {
        let selection = self.checked_selection();
        if selection.is_empty() {
            return Err(AppError::validation("Nothing is checked"));
        }
        let pick_desc = describe_resources(&selection.resources);
        let added = self.session.update_picked(|p| p.merge(&selection));
        self.update_checked();

        let total_desc = self.menu.picked_desc.clone();
        let mut text = format!("{total_desc} picked.");
        if pick_desc != total_desc {
            text = format!("{pick_desc} added to picked resources.  Now {text}");
        }
        info!(added, total = self.menu.picked_count, "Picked checked resources");
        self.session.info(text.clone());
        Ok(text)
    }

    /// Discard the picked store. Announced only when the user asked for
    /// it directly.
    pub fn clear_picked(&mut self, announce: bool) {
        self.session.take_picked();
        self.update_checked();
        if announce {
            self.session.info("Cleared picked resources");
        }
    }

    /// Move the picked resources into the current container.
    ///
    /// The picked store is cleared as soon as the request is issued,
    /// whatever its outcome; the view is reloaded only on success.
    pub async fn move_picked(&mut self) -> AppResult<()> {
        if !self.move_allowed() {
            return Err(AppError::authorization(
                "The picked resources cannot be moved here",
            ));
        }
        let resources = self.take_picked_resources();
        let parent = self.current_ref();
        info!(count = resources.count(), parent = %parent, "Moving picked resources");
        self.api.move_resources(&resources, &parent).await?;
        self.refresh().await
    }

    /// Copy the picked resources into the current container.
    ///
    /// Clears the picked store the same way as [`move_picked`](Self::move_picked).
    pub async fn copy_picked(&mut self) -> AppResult<()> {
        if !self.copy_allowed() {
            return Err(AppError::authorization(
                "The picked resources cannot be copied here",
            ));
        }
        let resources = self.take_picked_resources();
        let parent = self.current_ref();
        info!(count = resources.count(), parent = %parent, "Copying picked resources");
        self.api.copy_resources(&resources, &parent).await?;
        self.refresh().await
    }

    fn take_picked_resources(&mut self) -> ResourceSet {
        let resources = self
            .session
            .take_picked()
            .map(|p| p.resources().clone())
            .unwrap_or_default();
        self.update_checked();
        resources
    }

    /// Ask before deleting the checked resources.
    pub fn request_delete_checked(&self) -> AppResult<ConfirmPrompt<HierarchyAction>> {
        if !self.menu.can_delete() {
            return Err(AppError::authorization(
                "The checked resources cannot be deleted",
            ));
        }
        let resources = self.checked_selection().resources;
        Ok(ConfirmPrompt::delete(
            format!(
                "Are you sure you want to delete the checked resources ({})?",
                describe_resources(&resources)
            ),
            HierarchyAction::DeleteChecked { resources },
        ))
    }

    /// Ask before deleting the folder being shown.
    pub fn request_delete_container(&self) -> AppResult<ConfirmPrompt<HierarchyAction>> {
        let folder = self.require_folder()?;
        if self.access_level() < AccessLevel::Admin {
            return Err(AppError::authorization(
                "Admin access is required to delete this folder",
            ));
        }
        Ok(ConfirmPrompt::delete(
            format!(
                "Are you sure you want to delete the folder {}?",
                folder.name()
            ),
            HierarchyAction::DeleteContainer {
                target: folder.to_ref(),
            },
        ))
    }

    /// Carry out a confirmed action.
    pub async fn confirm(&mut self, prompt: ConfirmPrompt<HierarchyAction>) -> AppResult<()> {
        match prompt.action {
            HierarchyAction::DeleteChecked { resources } => {
                info!(count = resources.count(), "Deleting checked resources");
                self.api.delete_resources(&resources).await?;
                self.refresh().await
            }
            HierarchyAction::DeleteContainer { target } => {
                info!(folder = %target, "Deleting folder");
                self.api.delete(&target).await?;
                if self.current_ref() == target {
                    let mut breadcrumbs = self.breadcrumbs.clone();
                    breadcrumbs.pop()?;
                    self.show_path(breadcrumbs, true).await
                } else {
                    self.refresh().await
                }
            }
        }
    }

    /// The form submission downloading the checked resources.
    pub fn download_checked(&self) -> AppResult<FormSubmission> {
        let selection = self.checked_selection();
        if selection.is_empty() {
            return Err(AppError::validation("Nothing is checked"));
        }
        self.api.download_resources(&selection.resources)
    }

    /// The form submission downloading the current container.
    pub fn download_container(&self) -> FormSubmission {
        self.api.download_container(&self.current_ref())
    }

    fn require_write(&self) -> AppResult<()> {
        if self.access_level() >= AccessLevel::Write {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Write access is required on {}",
                self.current().name()
            )))
        }
    }

    fn require_folder(&self) -> AppResult<&Resource> {
        match self.current() {
            current @ Resource::Folder(_) => Ok(current),
            other => Err(AppError::validation(format!(
                "This action needs a folder, not a {}",
                other.kind()
            ))),
        }
    }

    /// Create a sub-folder and show it in the list.
    pub async fn create_folder(&mut self, name: &str, description: &str) -> AppResult<Folder> {
        self.require_write()?;
        let request = CreateFolder {
            parent: self.current_ref(),
            name: name.to_string(),
            description: description.to_string(),
        };
        let folder = self.api.create_folder(&request).await?;
        info!(folder_id = %folder.id, name = %folder.name, "Created folder");
        self.folders.insert(folder.clone());
        self.update_checked();
        Ok(folder)
    }

    /// Create an item in the current folder and show it in the list.
    pub async fn create_item(&mut self, name: &str, description: &str) -> AppResult<Item> {
        let folder_id = self.require_folder()?.id().clone();
        self.require_write()?;
        let request = CreateItem {
            folder_id,
            name: name.to_string(),
            description: description.to_string(),
        };
        let item = self.api.create_item(&request).await?;
        info!(item_id = %item.id, name = %item.name, "Created item");
        if let Some(items) = self.items.as_mut() {
            items.insert(item.clone());
        }
        self.update_checked();
        Ok(item)
    }

    /// Change the current folder's name and description.
    pub async fn edit_container(&mut self, name: &str, description: &str) -> AppResult<()> {
        let folder_id = self.require_folder()?.id().clone();
        self.require_write()?;
        let update = UpdateFolder {
            name: name.to_string(),
            description: description.to_string(),
        };
        let updated = self.api.update_folder(&folder_id, &update).await?;
        if let Some(folder) = self.breadcrumbs.current_mut().as_folder_mut() {
            folder.name = updated.name;
            folder.description = updated.description;
        }
        self.session.success("Folder info updated.");
        Ok(())
    }

    fn metadata_mut(&mut self) -> AppResult<&mut MetadataPanel> {
        self.metadata
            .as_mut()
            .ok_or_else(|| AppError::validation("Only folders carry metadata here"))
    }

    /// Open a blank metadata row; returns its position.
    pub fn add_metadata_field(&mut self) -> AppResult<usize> {
        self.metadata_mut()?.add_field()
    }

    /// Open a metadata row for editing.
    pub fn edit_metadata_field(&mut self, index: usize) -> AppResult<()> {
        self.metadata_mut()?.begin_edit(index)
    }

    /// Abandon a metadata edit.
    pub fn cancel_metadata_field(&mut self, index: usize) -> AppResult<()> {
        self.metadata_mut()?.cancel(index)
    }

    /// Save a metadata row.
    pub async fn save_metadata_field(
        &mut self,
        index: usize,
        key: &str,
        raw_value: &str,
    ) -> AppResult<()> {
        let api = Arc::clone(&self.api);
        self.metadata_mut()?
            .save(index, key, raw_value, api.as_ref())
            .await?;
        self.sync_folder_meta();
        Ok(())
    }

    /// Ask before removing a metadata key.
    pub fn request_delete_metadata(&self, index: usize) -> AppResult<ConfirmPrompt<MetadataAction>> {
        self.metadata
            .as_ref()
            .ok_or_else(|| AppError::validation("Only folders carry metadata here"))?
            .request_delete(index)
    }

    /// Carry out a confirmed metadata action.
    pub async fn confirm_metadata(&mut self, prompt: ConfirmPrompt<MetadataAction>) -> AppResult<()> {
        let api = Arc::clone(&self.api);
        self.metadata_mut()?.confirm(prompt, api.as_ref()).await?;
        self.sync_folder_meta();
        Ok(())
    }

    fn sync_folder_meta(&mut self) {
        let Some(meta) = self.metadata.as_ref().map(|m| m.metadata().clone()) else {
            return;
        };
        if let Some(folder) = self.breadcrumbs.current_mut().as_folder_mut() {
            folder.meta = meta;
        }
    }

    /// Leave the hierarchy for an item's page.
    pub fn item_clicked(&mut self, id: &ResourceId) -> AppResult<Route> {
        let known = self.items.as_ref().is_some_and(|items| items.get(id).is_some());
        if !known {
            return Err(AppError::not_found(format!("No item with id {id} here")));
        }
        let route = Route::Item(id.clone());
        self.session.navigate(route.clone());
        Ok(route)
    }

    /// Apply pending session events. A login change resets the picked
    /// store, so the menu is recomputed. Returns whether anything changed.
    pub fn sync_events(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.events.try_recv() {
                Ok(UiEvent::Login { .. }) => changed = true,
                Ok(_) => {}
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "Hierarchy browser fell behind on UI events");
                    changed = true;
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        if changed {
            self.update_checked();
        }
        changed
    }

    /// Whether both child lists are loaded and hold nothing.
    pub fn is_empty(&self) -> bool {
        let items_empty = self.items.as_ref().is_none_or(|i| i.is_loaded() && i.is_empty());
        self.folders.is_loaded() && self.folders.is_empty() && items_empty
    }

    /// Render-ready state.
    pub fn view(&self) -> HierarchyView {
        let current = self.current();
        let description = match current {
            Resource::Folder(f) => f.description.clone(),
            Resource::Collection(c) => c.description.clone(),
            _ => String::new(),
        };
        HierarchyView {
            route: self.route().to_string(),
            breadcrumb: self.breadcrumbs.render(),
            container: ContainerView {
                kind: current.kind(),
                id: current.id().clone(),
                name: current.name().to_string(),
                description,
                access_level: self.access_level(),
            },
            actions: ContainerActions::for_container(current.kind(), self.access_level()),
            menu: self.menu.clone(),
            folders: rows(&self.folders),
            more_folders: self.folders.has_more(),
            items: self.items.as_ref().map(rows),
            more_items: self.items.as_ref().is_some_and(|i| i.has_more()),
            metadata: self.metadata.as_ref().map(MetadataPanel::view),
            empty: self.is_empty(),
        }
    }
}

fn rows<T: ListEntry>(list: &ChildList<T>) -> Vec<RowView> {
    list.entries()
        .iter()
        .map(|entry| RowView {
            kind: T::KIND,
            id: entry.id().clone(),
            name: entry.name().to_string(),
            size: entry.size(),
            checked: list.is_checked(entry.id()),
        })
        .collect()
}
