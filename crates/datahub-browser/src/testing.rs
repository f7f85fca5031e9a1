//! In-memory backend and fixtures for unit tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use datahub_client::{FormSubmission, ResourceApi};
use datahub_core::AppError;
use datahub_core::result::AppResult;
use datahub_core::types::{AccessLevel, PageRequest, ResourceId, SortField};
use datahub_entity::folder::{CreateFolder, UpdateFolder};
use datahub_entity::item::CreateItem;
use datahub_entity::{
    AuthToken, Collection, Folder, Item, Metadata, Resource, ResourceKind, ResourceRef,
    ResourceSet, User,
};

pub fn collection(id: &str, name: &str) -> Resource {
    Resource::Collection(collection_model(id, name, AccessLevel::Admin))
}

pub fn collection_model(id: &str, name: &str, level: AccessLevel) -> Collection {
    Collection {
        id: ResourceId::new(id),
        name: name.to_string(),
        description: String::new(),
        public: true,
        access_level: Some(level),
        size: 0,
    }
}

pub fn folder(id: &str, name: &str, parent_kind: &str, parent_id: &str) -> Resource {
    Resource::Folder(folder_model(id, name, parent_kind, parent_id, AccessLevel::Admin))
}

pub fn folder_model(
    id: &str,
    name: &str,
    parent_kind: &str,
    parent_id: &str,
    level: AccessLevel,
) -> Folder {
    Folder {
        id: ResourceId::new(id),
        name: name.to_string(),
        description: String::new(),
        parent_kind: parent_kind.parse().expect("valid kind"),
        parent_id: ResourceId::new(parent_id),
        public: false,
        access_level: Some(level),
        meta: Metadata::new(),
        size: 0,
        created: None,
        updated: None,
    }
}

pub fn folder_with_access(id: &str, name: &str, level: AccessLevel) -> Folder {
    folder_model(id, name, "collection", "c", level)
}

pub fn item(id: &str, name: &str) -> Item {
    item_in(id, name, "f")
}

pub fn item_in(id: &str, name: &str, folder_id: &str) -> Item {
    Item {
        id: ResourceId::new(id),
        name: name.to_string(),
        description: String::new(),
        folder_id: ResourceId::new(folder_id),
        size: 0,
        meta: Metadata::new(),
        created: None,
        updated: None,
    }
}

pub fn user(id: &str, login: &str, admin: bool) -> User {
    User {
        id: ResourceId::new(id),
        login: login.to_string(),
        first_name: String::new(),
        last_name: String::new(),
        email: None,
        admin,
        public: true,
        access_level: Some(AccessLevel::Admin),
    }
}

#[derive(Debug, Default)]
struct FakeState {
    collections: BTreeMap<ResourceId, Collection>,
    folders: BTreeMap<ResourceId, Folder>,
    items: BTreeMap<ResourceId, Item>,
    users: BTreeMap<ResourceId, User>,
    calls: Vec<String>,
    fail_next: Option<AppError>,
    fail_list: Option<AppError>,
    next_id: u64,
    current_user: Option<User>,
}

impl FakeState {
    fn new_id(&mut self, prefix: &str) -> ResourceId {
        self.next_id += 1;
        ResourceId::new(format!("{prefix}{}", self.next_id))
    }

    fn record(&mut self, call: String) -> AppResult<()> {
        self.calls.push(call);
        match self.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn copy_folder(&mut self, id: &ResourceId, parent: &ResourceRef) {
        let Some(mut copy) = self.folders.get(id).cloned() else {
            return;
        };
        let new_id = self.new_id("copy-");
        copy.id = new_id.clone();
        copy.parent_kind = parent.kind;
        copy.parent_id = parent.id.clone();
        self.folders.insert(new_id.clone(), copy);
        let children: Vec<ResourceId> = self
            .items
            .values()
            .filter(|i| &i.folder_id == id)
            .map(|i| i.id.clone())
            .collect();
        for child in children {
            self.copy_item(&child, &new_id);
        }
    }

    fn copy_item(&mut self, id: &ResourceId, folder_id: &ResourceId) {
        if let Some(mut copy) = self.items.get(id).cloned() {
            copy.id = self.new_id("copy-");
            copy.folder_id = folder_id.clone();
            self.items.insert(copy.id.clone(), copy);
        }
    }
}

/// A backend holding resources in memory and recording mutating calls.
#[derive(Debug, Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    fn state(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn add_collection(&self, collection: Collection) {
        self.state().collections.insert(collection.id.clone(), collection);
    }

    pub fn add_folder(&self, folder: Folder) {
        self.state().folders.insert(folder.id.clone(), folder);
    }

    pub fn add_item(&self, item: Item) {
        self.state().items.insert(item.id.clone(), item);
    }

    pub fn add_user(&self, user: User) {
        self.state().users.insert(user.id.clone(), user);
    }

    pub fn folder(&self, id: &str) -> Option<Folder> {
        self.state().folders.get(&ResourceId::new(id)).cloned()
    }

    pub fn item(&self, id: &str) -> Option<Item> {
        self.state().items.get(&ResourceId::new(id)).cloned()
    }

    pub fn folder_count(&self) -> usize {
        self.state().folders.len()
    }

    /// Mutating calls in the order they were made.
    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    /// Make the next mutating call fail.
    pub fn fail_next(&self, err: AppError) {
        self.state().fail_next = Some(err);
    }

    /// Make the next listing fail.
    pub fn fail_next_list(&self, err: AppError) {
        self.state().fail_list = Some(err);
    }

    fn take_list_failure(&self) -> AppResult<()> {
        match self.state().fail_list.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn page<T: Clone>(mut entries: Vec<T>, name: impl Fn(&T) -> String, page: PageRequest) -> Vec<T> {
    entries.sort_by_key(|e| name(e).to_lowercase());
    entries
        .into_iter()
        .skip(page.offset as usize)
        .take(page.limit as usize)
        .collect()
}

fn apply_patch(meta: &mut Metadata, patch: &Metadata) {
    for (key, value) in patch {
        if value.is_null() {
            meta.remove(key);
        } else {
            meta.insert(key.clone(), value.clone());
        }
    }
}

#[async_trait]
impl ResourceApi for FakeApi {
    async fn fetch(&self, target: &ResourceRef) -> AppResult<Resource> {
        let state = self.state();
        let found = match target.kind {
            ResourceKind::Folder => state.folders.get(&target.id).cloned().map(Resource::from),
            ResourceKind::Item => state.items.get(&target.id).cloned().map(Resource::from),
            ResourceKind::Collection => state
                .collections
                .get(&target.id)
                .cloned()
                .map(Resource::from),
            ResourceKind::User => state.users.get(&target.id).cloned().map(Resource::from),
            ResourceKind::Group => None,
        };
        found.ok_or_else(|| AppError::not_found(format!("Resource not found: {target}")))
    }

    async fn list_folders(
        &self,
        parent: &ResourceRef,
        request: PageRequest,
        _sort: &SortField,
    ) -> AppResult<Vec<Folder>> {
        self.take_list_failure()?;
        let children = self
            .state()
            .folders
            .values()
            .filter(|f| &f.parent_ref() == parent)
            .cloned()
            .collect();
        Ok(page(children, |f: &Folder| f.name.clone(), request))
    }

    async fn list_items(
        &self,
        folder_id: &ResourceId,
        request: PageRequest,
        _sort: &SortField,
    ) -> AppResult<Vec<Item>> {
        self.take_list_failure()?;
        let children = self
            .state()
            .items
            .values()
            .filter(|i| &i.folder_id == folder_id)
            .cloned()
            .collect();
        Ok(page(children, |i: &Item| i.name.clone(), request))
    }

    async fn create_folder(&self, request: &CreateFolder) -> AppResult<Folder> {
        let mut state = self.state();
        state.record(format!("create_folder {}", request.name))?;
        let id = state.new_id("folder-");
        let mut folder = folder_model(
            id.as_str(),
            &request.name,
            request.parent.kind.as_str(),
            request.parent.id.as_str(),
            AccessLevel::Admin,
        );
        folder.description = request.description.clone();
        state.folders.insert(id, folder.clone());
        Ok(folder)
    }

    async fn create_item(&self, request: &CreateItem) -> AppResult<Item> {
        let mut state = self.state();
        state.record(format!("create_item {}", request.name))?;
        let id = state.new_id("item-");
        let mut item = item_in(id.as_str(), &request.name, request.folder_id.as_str());
        item.description = request.description.clone();
        state.items.insert(id, item.clone());
        Ok(item)
    }

    async fn update_folder(&self, id: &ResourceId, update: &UpdateFolder) -> AppResult<Folder> {
        let mut state = self.state();
        state.record(format!("update_folder {id}"))?;
        let folder = state
            .folders
            .get_mut(id)
            .ok_or_else(|| AppError::not_found(format!("Folder not found: {id}")))?;
        folder.name = update.name.clone();
        folder.description = update.description.clone();
        Ok(folder.clone())
    }

    async fn delete(&self, target: &ResourceRef) -> AppResult<()> {
        let mut state = self.state();
        state.record(format!("delete {target}"))?;
        match target.kind {
            ResourceKind::Folder => state.folders.remove(&target.id).map(|_| ()),
            ResourceKind::Item => state.items.remove(&target.id).map(|_| ()),
            _ => None,
        }
        .ok_or_else(|| AppError::not_found(format!("Resource not found: {target}")))
    }

    async fn delete_resources(&self, resources: &ResourceSet) -> AppResult<()> {
        let mut state = self.state();
        state.record(format!("delete_resources {}", resources.to_param()?))?;
        for id in resources.ids(ResourceKind::Folder) {
            state.folders.remove(id);
        }
        for id in resources.ids(ResourceKind::Item) {
            state.items.remove(id);
        }
        Ok(())
    }

    async fn move_resources(&self, resources: &ResourceSet, parent: &ResourceRef) -> AppResult<()> {
        let mut state = self.state();
        state.record(format!("move_resources {} {parent}", resources.to_param()?))?;
        for id in resources.ids(ResourceKind::Folder) {
            if let Some(folder) = state.folders.get_mut(id) {
                folder.parent_kind = parent.kind;
                folder.parent_id = parent.id.clone();
            }
        }
        for id in resources.ids(ResourceKind::Item) {
            if let Some(item) = state.items.get_mut(id) {
                item.folder_id = parent.id.clone();
            }
        }
        Ok(())
    }

    async fn copy_resources(&self, resources: &ResourceSet, parent: &ResourceRef) -> AppResult<()> {
        let mut state = self.state();
        state.record(format!("copy_resources {} {parent}", resources.to_param()?))?;
        for id in resources.ids(ResourceKind::Folder) {
            state.copy_folder(id, parent);
        }
        for id in resources.ids(ResourceKind::Item) {
            state.copy_item(id, &parent.id);
        }
        Ok(())
    }

    async fn update_metadata(&self, target: &ResourceRef, patch: &Metadata) -> AppResult<Metadata> {
        let mut state = self.state();
        state.record(format!("update_metadata {target}"))?;
        let meta = match target.kind {
            ResourceKind::Folder => state.folders.get_mut(&target.id).map(|f| &mut f.meta),
            ResourceKind::Item => state.items.get_mut(&target.id).map(|i| &mut i.meta),
            _ => None,
        }
        .ok_or_else(|| AppError::not_found(format!("Resource not found: {target}")))?;
        apply_patch(meta, patch);
        Ok(meta.clone())
    }

    async fn authenticate(&self, login: &str, password: &str) -> AppResult<(User, AuthToken)> {
        let mut state = self.state();
        let user = state
            .users
            .values()
            .find(|u| u.login == login)
            .cloned()
            .filter(|_| password == "password")
            .ok_or_else(|| AppError::authentication("Login failed."))?;
        state.current_user = Some(user.clone());
        Ok((
            user,
            AuthToken {
                token: "token".to_string(),
                expires: None,
            },
        ))
    }

    async fn logout(&self) -> AppResult<()> {
        self.state().current_user = None;
        Ok(())
    }

    async fn current_user(&self) -> AppResult<Option<User>> {
        Ok(self.state().current_user.clone())
    }

    fn download_resources(&self, resources: &ResourceSet) -> AppResult<FormSubmission> {
        Ok(FormSubmission::get("http://fake/api/v1/resource/download")
            .field("resources", resources.to_param()?))
    }

    fn download_container(&self, target: &ResourceRef) -> FormSubmission {
        FormSubmission::get(format!("http://fake/api/v1/{}/download", target.path()))
    }
}
