//! Backend operations used by the browser components.

use async_trait::async_trait;

use datahub_core::result::AppResult;
use datahub_core::types::{PageRequest, ResourceId, SortField};
use datahub_entity::folder::{CreateFolder, UpdateFolder};
use datahub_entity::item::CreateItem;
use datahub_entity::{AuthToken, Folder, Item, Metadata, Resource, ResourceRef, ResourceSet, User};

use crate::download::FormSubmission;

/// Every REST call the client issues.
///
/// Calls are independent request/response pairs with no cancellation,
/// de-duplication or retry.
#[async_trait]
pub trait ResourceApi: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch a single resource.
    async fn fetch(&self, target: &ResourceRef) -> AppResult<Resource>;

    /// List child folders of a container.
    async fn list_folders(
        &self,
        parent: &ResourceRef,
        page: PageRequest,
        sort: &SortField,
    ) -> AppResult<Vec<Folder>>;

    /// List items inside a folder.
    async fn list_items(
        &self,
        folder_id: &ResourceId,
        page: PageRequest,
        sort: &SortField,
    ) -> AppResult<Vec<Item>>;

    /// Create a folder.
    async fn create_folder(&self, request: &CreateFolder) -> AppResult<Folder>;

    /// Create an item.
    async fn create_item(&self, request: &CreateItem) -> AppResult<Item>;

    /// Rename or re-describe a folder.
    async fn update_folder(&self, id: &ResourceId, update: &UpdateFolder) -> AppResult<Folder>;

    /// Delete one resource.
    async fn delete(&self, target: &ResourceRef) -> AppResult<()>;

    /// Delete every resource in the set with a single request.
    async fn delete_resources(&self, resources: &ResourceSet) -> AppResult<()>;

    /// Move resources under `parent` with a single request.
    async fn move_resources(&self, resources: &ResourceSet, parent: &ResourceRef)
    -> AppResult<()>;

    /// Copy resources under `parent` with a single request.
    async fn copy_resources(&self, resources: &ResourceSet, parent: &ResourceRef)
    -> AppResult<()>;

    /// Apply a metadata patch; `null` values remove keys. Returns the
    /// resulting metadata.
    async fn update_metadata(&self, target: &ResourceRef, patch: &Metadata) -> AppResult<Metadata>;

    /// Exchange credentials for a session token. The token is used for
    /// subsequent requests.
    async fn authenticate(&self, login: &str, password: &str) -> AppResult<(User, AuthToken)>;

    /// End the current session.
    async fn logout(&self) -> AppResult<()>;

    /// The signed-in user, if any.
    async fn current_user(&self) -> AppResult<Option<User>>;

    /// Browser-style form submission downloading the given resources.
    fn download_resources(&self, resources: &ResourceSet) -> AppResult<FormSubmission>;

    /// Form submission downloading a whole container.
    fn download_container(&self, target: &ResourceRef) -> FormSubmission;
}
