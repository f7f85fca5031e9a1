//! HTTP implementation of [`ResourceApi`].

pub mod error;

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use datahub_core::AppError;
use datahub_core::config::client::ClientConfig;
use datahub_core::result::AppResult;
use datahub_core::types::{PageRequest, ResourceId, SortField};
use datahub_entity::folder::{CreateFolder, UpdateFolder};
use datahub_entity::item::CreateItem;
use datahub_entity::{
    AuthToken, Collection, Folder, Group, Item, Metadata, Resource, ResourceKind, ResourceRef,
    ResourceSet, User,
};

use crate::api::ResourceApi;
use crate::download::FormSubmission;

/// Header overriding the method of bulk deletes, whose body some
/// transports drop on real `DELETE` requests.
const METHOD_OVERRIDE_HEADER: &str = "X-HTTP-Method-Override";

/// Response of the authentication endpoint.
#[derive(Debug, Deserialize)]
struct AuthResponse {
    user: User,
    #[serde(rename = "authToken")]
    auth_token: AuthToken,
}

/// REST client holding the session token of the signed-in user.
#[derive(Debug)]
pub struct RestClient {
    /// Underlying HTTP client.
    http: reqwest::Client,
    /// API root without a trailing slash.
    api_root: String,
    /// Header name carrying the token.
    token_header: String,
    /// Current session token.
    token: Mutex<Option<String>>,
}

impl RestClient {
    /// Build a client from configuration.
    pub fn from_config(config: &ClientConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Url::parse(&config.api_root)
            .map_err(|e| AppError::configuration(format!("Invalid api_root: {e}")))?;

        Ok(Self {
            http,
            api_root: config.api_root.trim_end_matches('/').to_string(),
            token_header: config.token_header.clone(),
            token: Mutex::new(None),
        })
    }

    /// The API root URL.
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// The current session token.
    pub fn token(&self) -> Option<String> {
        self.token.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Replace the session token.
    pub fn set_token(&self, token: Option<String>) {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = token;
    }

    fn url(&self, path: &str, params: &[(&str, String)]) -> AppResult<Url> {
        let mut url = Url::parse(&format!("{}/{}", self.api_root, path))
            .map_err(|e| AppError::internal(format!("Invalid request URL for '{path}': {e}")))?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in params {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "REST request");
        let builder = self.http.request(method, url);
        match self.token() {
            Some(token) => builder.header(self.token_header.as_str(), token),
            None => builder,
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AppResult<T> {
        let response = builder.send().await.map_err(error::transport)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error::from_response(status, &body));
        }
        response.json::<T>().await.map_err(error::transport)
    }

    async fn send_empty(&self, builder: RequestBuilder) -> AppResult<()> {
        let response = builder.send().await.map_err(error::transport)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error::from_response(status, &body));
        }
        Ok(())
    }

    fn paging(page: PageRequest, sort: &SortField) -> Vec<(&'static str, String)> {
        vec![
            ("limit", page.limit.to_string()),
            ("offset", page.offset.to_string()),
            ("sort", sort.field.clone()),
            ("sortdir", sort.direction.as_param().to_string()),
        ]
    }

    fn bulk_params(resources: &ResourceSet, parent: Option<&ResourceRef>) -> AppResult<Vec<(&'static str, String)>> {
        if let Some((kind, _)) = resources.counts().into_iter().find(|(k, _)| !k.is_movable()) {
            return Err(AppError::validation(format!(
                "Bulk operations accept folders and items only, not a {kind}"
            )));
        }
        let mut params = vec![("resources", resources.to_param()?)];
        if let Some(parent) = parent {
            params.push(("parentType", parent.kind.to_string()));
            params.push(("parentId", parent.id.to_string()));
        }
        params.push(("progress", "true".to_string()));
        Ok(params)
    }
}

#[async_trait]
impl ResourceApi for RestClient {
    async fn fetch(&self, target: &ResourceRef) -> AppResult<Resource> {
        let url = self.url(&target.path(), &[])?;
        let builder = self.request(Method::GET, url);
        let resource = match target.kind {
            ResourceKind::Folder => Resource::Folder(self.send_json::<Folder>(builder).await?),
            ResourceKind::Item => Resource::Item(self.send_json::<Item>(builder).await?),
            ResourceKind::Collection => {
                Resource::Collection(self.send_json::<Collection>(builder).await?)
            }
            ResourceKind::User => Resource::User(self.send_json::<User>(builder).await?),
            ResourceKind::Group => Resource::Group(self.send_json::<Group>(builder).await?),
        };
        Ok(resource)
    }

    async fn list_folders(
        &self,
        parent: &ResourceRef,
        page: PageRequest,
        sort: &SortField,
    ) -> AppResult<Vec<Folder>> {
        let mut params = vec![
            ("parentType", parent.kind.to_string()),
            ("parentId", parent.id.to_string()),
        ];
        params.extend(Self::paging(page, sort));
        let url = self.url("folder", &params)?;
        self.send_json(self.request(Method::GET, url)).await
    }

    async fn list_items(
        &self,
        folder_id: &ResourceId,
        page: PageRequest,
        sort: &SortField,
    ) -> AppResult<Vec<Item>> {
        let mut params = vec![("folderId", folder_id.to_string())];
        params.extend(Self::paging(page, sort));
        let url = self.url("item", &params)?;
        self.send_json(self.request(Method::GET, url)).await
    }

    async fn create_folder(&self, request: &CreateFolder) -> AppResult<Folder> {
        let url = self.url(
            "folder",
            &[
                ("parentType", request.parent.kind.to_string()),
                ("parentId", request.parent.id.to_string()),
                ("name", request.name.clone()),
                ("description", request.description.clone()),
            ],
        )?;
        let folder: Folder = self.send_json(self.request(Method::POST, url)).await?;
        info!(folder_id = %folder.id, parent = %request.parent, "Folder created");
        Ok(folder)
    }

    async fn create_item(&self, request: &CreateItem) -> AppResult<Item> {
        let url = self.url(
            "item",
            &[
                ("folderId", request.folder_id.to_string()),
                ("name", request.name.clone()),
                ("description", request.description.clone()),
            ],
        )?;
        let item: Item = self.send_json(self.request(Method::POST, url)).await?;
        info!(item_id = %item.id, folder_id = %request.folder_id, "Item created");
        Ok(item)
    }

    async fn update_folder(&self, id: &ResourceId, update: &UpdateFolder) -> AppResult<Folder> {
        let url = self.url(
            &format!("folder/{id}"),
            &[
                ("name", update.name.clone()),
                ("description", update.description.clone()),
            ],
        )?;
        self.send_json(self.request(Method::PUT, url)).await
    }

    async fn delete(&self, target: &ResourceRef) -> AppResult<()> {
        let url = self.url(&target.path(), &[])?;
        self.send_empty(self.request(Method::DELETE, url)).await?;
        info!(resource = %target, "Resource deleted");
        Ok(())
    }

    async fn delete_resources(&self, resources: &ResourceSet) -> AppResult<()> {
        let url = self.url("resource", &Self::bulk_params(resources, None)?)?;
        let builder = self
            .request(Method::POST, url)
            .header(METHOD_OVERRIDE_HEADER, "DELETE");
        self.send_empty(builder).await?;
        info!(count = resources.count(), "Resources deleted");
        Ok(())
    }

    async fn move_resources(
        &self,
        resources: &ResourceSet,
        parent: &ResourceRef,
    ) -> AppResult<()> {
        let url = self.url("resource/move", &Self::bulk_params(resources, Some(parent))?)?;
        self.send_empty(self.request(Method::PUT, url)).await?;
        info!(count = resources.count(), parent = %parent, "Resources moved");
        Ok(())
    }

    async fn copy_resources(
        &self,
        resources: &ResourceSet,
        parent: &ResourceRef,
    ) -> AppResult<()> {
        let url = self.url("resource/copy", &Self::bulk_params(resources, Some(parent))?)?;
        self.send_empty(self.request(Method::POST, url)).await?;
        info!(count = resources.count(), parent = %parent, "Resources copied");
        Ok(())
    }

    async fn update_metadata(&self, target: &ResourceRef, patch: &Metadata) -> AppResult<Metadata> {
        let url = self.url(&format!("{}/metadata", target.path()), &[])?;
        let document: Value = self
            .send_json(self.request(Method::PUT, url).json(patch))
            .await?;
        match document.get("meta") {
            Some(Value::Object(meta)) => Ok(meta.clone()),
            Some(Value::Null) | None => Ok(Metadata::new()),
            Some(other) => Err(AppError::external(format!(
                "Unexpected metadata in response: {other}"
            ))),
        }
    }

    async fn authenticate(&self, login: &str, password: &str) -> AppResult<(User, AuthToken)> {
        let url = self.url("user/authentication", &[])?;
        let builder = self
            .http
            .request(Method::GET, url)
            .basic_auth(login, Some(password));
        let response: AuthResponse = self.send_json(builder).await?;
        self.set_token(Some(response.auth_token.token.clone()));
        info!(login = %response.user.login, "Authenticated");
        Ok((response.user, response.auth_token))
    }

    async fn logout(&self) -> AppResult<()> {
        let url = self.url("user/authentication", &[])?;
        let result = self.send_empty(self.request(Method::DELETE, url)).await;
        self.set_token(None);
        result
    }

    async fn current_user(&self) -> AppResult<Option<User>> {
        let url = self.url("user/me", &[])?;
        self.send_json(self.request(Method::GET, url)).await
    }

    fn download_resources(&self, resources: &ResourceSet) -> AppResult<FormSubmission> {
        Ok(
            FormSubmission::get(format!("{}/resource/download", self.api_root))
                .field("resources", resources.to_param()?)
                .with_token(self.token()),
        )
    }

    fn download_container(&self, target: &ResourceRef) -> FormSubmission {
        FormSubmission::get(format!("{}/{}/download", self.api_root, target.path()))
            .with_token(self.token())
    }
}
