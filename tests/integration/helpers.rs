//! Shared test helpers for integration tests.
//!
//! [`FakeBackend`] serves the REST endpoints the client uses from an
//! in-memory store on an ephemeral port.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::{Value, json};
use uuid::Uuid;

use datahub_browser::Session;
use datahub_client::RestClient;
use datahub_core::config::client::ClientConfig;
use datahub_core::types::{AccessLevel, ResourceId};
use datahub_entity::{Collection, Folder, Item, Metadata, ResourceKind, User};

type Params = Query<HashMap<String, String>>;

/// Error body in the backend's format.
struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.0, Json(json!({"message": self.1, "type": "rest"}))).into_response()
    }
}

type ApiResult = Result<Json<Value>, ApiError>;

fn not_found(what: &str, id: &str) -> ApiError {
    ApiError(StatusCode::NOT_FOUND, format!("Invalid {what} id ({id})."))
}

fn param<'a>(params: &'a HashMap<String, String>, name: &str) -> Result<&'a str, ApiError> {
    params
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| ApiError(StatusCode::BAD_REQUEST, format!("Parameter '{name}' is required.")))
}

fn new_id() -> ResourceId {
    ResourceId::new(Uuid::new_v4().simple().to_string())
}

/// In-memory backend state.
#[derive(Debug, Default)]
pub struct Store {
    pub collections: BTreeMap<ResourceId, Collection>,
    pub folders: BTreeMap<ResourceId, Folder>,
    pub items: BTreeMap<ResourceId, Item>,
    pub users: BTreeMap<ResourceId, User>,
    pub tokens: HashMap<String, ResourceId>,
    pub requests: Vec<String>,
    pub fail_logout: bool,
}

impl Store {
    fn resources(params: &HashMap<String, String>) -> Result<HashMap<String, Vec<ResourceId>>, ApiError> {
        let raw = param(params, "resources")?;
        serde_json::from_str(raw)
            .map_err(|e| ApiError(StatusCode::BAD_REQUEST, format!("Invalid resources: {e}")))
    }

    fn ids<'a>(resources: &'a HashMap<String, Vec<ResourceId>>, kind: &str) -> &'a [ResourceId] {
        resources.get(kind).map(Vec::as_slice).unwrap_or(&[])
    }

    fn remove_folder(&mut self, id: &ResourceId) {
        self.folders.remove(id);
        self.items.retain(|_, item| &item.folder_id != id);
        let children: Vec<ResourceId> = self
            .folders
            .values()
            .filter(|f| f.parent_kind == ResourceKind::Folder && &f.parent_id == id)
            .map(|f| f.id.clone())
            .collect();
        for child in children {
            self.remove_folder(&child);
        }
    }

    fn copy_folder(&mut self, id: &ResourceId, parent_kind: ResourceKind, parent_id: &ResourceId) {
        let Some(mut copy) = self.folders.get(id).cloned() else {
            return;
        };
        copy.id = new_id();
        copy.parent_kind = parent_kind;
        copy.parent_id = parent_id.clone();
        let copy_id = copy.id.clone();
        self.folders.insert(copy_id.clone(), copy);
        let items: Vec<ResourceId> = self
            .items
            .values()
            .filter(|i| &i.folder_id == id)
            .map(|i| i.id.clone())
            .collect();
        for item in items {
            self.copy_item(&item, &copy_id);
        }
    }

    fn copy_item(&mut self, id: &ResourceId, folder_id: &ResourceId) {
        if let Some(mut copy) = self.items.get(id).cloned() {
            copy.id = new_id();
            copy.folder_id = folder_id.clone();
            self.items.insert(copy.id.clone(), copy);
        }
    }

    fn user_for(&self, headers: &HeaderMap) -> Option<User> {
        let token = headers.get("Girder-Token")?.to_str().ok()?;
        let id = self.tokens.get(token)?;
        self.users.get(id).cloned()
    }
}

type Shared = Arc<Mutex<Store>>;

fn lock(state: &Shared) -> MutexGuard<'_, Store> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

async fn record(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let override_method = request
        .headers()
        .get("X-HTTP-Method-Override")
        .and_then(|v| v.to_str().ok())
        .map(|v| format!(" override={v}"))
        .unwrap_or_default();
    let line = format!(
        "{} {}{}",
        request.method(),
        request.uri().path(),
        override_method
    );
    lock(&state).requests.push(line);
    next.run(request).await
}

fn sorted_page<T>(mut entries: Vec<T>, name: impl Fn(&T) -> String, params: &HashMap<String, String>) -> Vec<T> {
    entries.sort_by_key(|e| name(e).to_lowercase());
    if params.get("sortdir").map(String::as_str) == Some("-1") {
        entries.reverse();
    }
    let offset = params.get("offset").and_then(|v| v.parse().ok()).unwrap_or(0);
    let limit = params.get("limit").and_then(|v| v.parse().ok()).unwrap_or(50);
    entries.into_iter().skip(offset).take(limit).collect()
}

fn to_json<T: serde::Serialize>(value: &T) -> ApiResult {
    serde_json::to_value(value)
        .map(Json)
        .map_err(|e| ApiError(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

async fn list_folders(State(state): State<Shared>, Query(params): Params) -> ApiResult {
    let parent_kind: ResourceKind = param(&params, "parentType")?
        .parse()
        .map_err(|_| ApiError(StatusCode::BAD_REQUEST, "Invalid parentType.".to_string()))?;
    let parent_id = ResourceId::new(param(&params, "parentId")?);
    let store = lock(&state);
    let children: Vec<Folder> = store
        .folders
        .values()
        .filter(|f| f.parent_kind == parent_kind && f.parent_id == parent_id)
        .cloned()
        .collect();
    to_json(&sorted_page(children, |f| f.name.clone(), &params))
}

async fn create_folder(State(state): State<Shared>, Query(params): Params) -> ApiResult {
    let parent_kind: ResourceKind = param(&params, "parentType")?
        .parse()
        .map_err(|_| ApiError(StatusCode::BAD_REQUEST, "Invalid parentType.".to_string()))?;
    let name = param(&params, "name")?.to_string();
    let folder = Folder {
        id: new_id(),
        name,
        description: params.get("description").cloned().unwrap_or_default(),
        parent_kind,
        parent_id: ResourceId::new(param(&params, "parentId")?),
        public: false,
        access_level: Some(AccessLevel::Admin),
        meta: Metadata::new(),
        size: 0,
        created: None,
        updated: None,
    };
    lock(&state).folders.insert(folder.id.clone(), folder.clone());
    to_json(&folder)
}

async fn get_folder(State(state): State<Shared>, Path(id): Path<String>) -> ApiResult {
    let store = lock(&state);
    let folder = store
        .folders
        .get(&ResourceId::new(id.clone()))
        .ok_or_else(|| not_found("folder", &id))?;
    to_json(&*folder)
}

async fn update_folder(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Query(params): Params,
) -> ApiResult {
    let mut store = lock(&state);
    let folder = store
        .folders
        .get_mut(&ResourceId::new(id.clone()))
        .ok_or_else(|| not_found("folder", &id))?;
    if let Some(name) = params.get("name") {
        folder.name = name.clone();
    }
    if let Some(description) = params.get("description") {
        folder.description = description.clone();
    }
    to_json(&*folder)
}

async fn delete_folder(State(state): State<Shared>, Path(id): Path<String>) -> ApiResult {
    let mut store = lock(&state);
    let id = ResourceId::new(id);
    if !store.folders.contains_key(&id) {
        return Err(not_found("folder", id.as_str()));
    }
    store.remove_folder(&id);
    Ok(Json(json!({"message": "Deleted folder."})))
}

fn apply_patch(meta: &mut Metadata, patch: Metadata) {
    for (key, value) in patch {
        if value.is_null() {
            meta.remove(&key);
        } else {
            meta.insert(key, value);
        }
    }
}

async fn folder_metadata(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(patch): Json<Metadata>,
) -> ApiResult {
    let mut store = lock(&state);
    let folder = store
        .folders
        .get_mut(&ResourceId::new(id.clone()))
        .ok_or_else(|| not_found("folder", &id))?;
    if folder.access_level.unwrap_or(AccessLevel::None) < AccessLevel::Write {
        return Err(ApiError(
            StatusCode::FORBIDDEN,
            format!("Write access denied for folder {id}."),
        ));
    }
    apply_patch(&mut folder.meta, patch);
    to_json(&*folder)
}

async fn list_items(State(state): State<Shared>, Query(params): Params) -> ApiResult {
    let folder_id = ResourceId::new(param(&params, "folderId")?);
    let store = lock(&state);
    let children: Vec<Item> = store
        .items
        .values()
        .filter(|i| i.folder_id == folder_id)
        .cloned()
        .collect();
    to_json(&sorted_page(children, |i| i.name.clone(), &params))
}

async fn create_item(State(state): State<Shared>, Query(params): Params) -> ApiResult {
    let folder_id = ResourceId::new(param(&params, "folderId")?);
    let mut store = lock(&state);
    if !store.folders.contains_key(&folder_id) {
        return Err(not_found("folder", folder_id.as_str()));
    }
    let item = Item {
        id: new_id(),
        name: param(&params, "name")?.to_string(),
        description: params.get("description").cloned().unwrap_or_default(),
        folder_id,
        size: 0,
        meta: Metadata::new(),
        created: None,
        updated: None,
    };
    store.items.insert(item.id.clone(), item.clone());
    to_json(&item)
}

async fn get_item(State(state): State<Shared>, Path(id): Path<String>) -> ApiResult {
    let store = lock(&state);
    let item = store
        .items
        .get(&ResourceId::new(id.clone()))
        .ok_or_else(|| not_found("item", &id))?;
    to_json(&*item)
}

async fn item_metadata(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(patch): Json<Metadata>,
) -> ApiResult {
    let mut store = lock(&state);
    let item = store
        .items
        .get_mut(&ResourceId::new(id.clone()))
        .ok_or_else(|| not_found("item", &id))?;
    apply_patch(&mut item.meta, patch);
    to_json(&*item)
}

async fn get_collection(State(state): State<Shared>, Path(id): Path<String>) -> ApiResult {
    let store = lock(&state);
    let collection = store
        .collections
        .get(&ResourceId::new(id.clone()))
        .ok_or_else(|| not_found("collection", &id))?;
    to_json(collection)
}

async fn get_user(State(state): State<Shared>, Path(id): Path<String>) -> ApiResult {
    let store = lock(&state);
    let user = store
        .users
        .get(&ResourceId::new(id.clone()))
        .ok_or_else(|| not_found("user", &id))?;
    to_json(user)
}

async fn bulk_delete(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Params,
) -> ApiResult {
    if headers.get("X-HTTP-Method-Override").and_then(|v| v.to_str().ok()) != Some("DELETE") {
        return Err(ApiError(StatusCode::METHOD_NOT_ALLOWED, "Use DELETE.".to_string()));
    }
    let resources = Store::resources(&params)?;
    let mut store = lock(&state);
    for id in Store::ids(&resources, "folder") {
        store.remove_folder(id);
    }
    for id in Store::ids(&resources, "item") {
        store.items.remove(id);
    }
    Ok(Json(json!({"message": "Deleted resources."})))
}

fn parent(params: &HashMap<String, String>) -> Result<(ResourceKind, ResourceId), ApiError> {
    let kind = param(params, "parentType")?
        .parse()
        .map_err(|_| ApiError(StatusCode::BAD_REQUEST, "Invalid parentType.".to_string()))?;
    Ok((kind, ResourceId::new(param(params, "parentId")?)))
}

async fn bulk_move(State(state): State<Shared>, Query(params): Params) -> ApiResult {
    let resources = Store::resources(&params)?;
    let (kind, parent_id) = parent(&params)?;
    let mut store = lock(&state);
    if !Store::ids(&resources, "item").is_empty() && kind != ResourceKind::Folder {
        return Err(ApiError(
            StatusCode::BAD_REQUEST,
            "Items can only be moved into folders.".to_string(),
        ));
    }
    for id in Store::ids(&resources, "folder") {
        if let Some(folder) = store.folders.get_mut(id) {
            folder.parent_kind = kind;
            folder.parent_id = parent_id.clone();
        }
    }
    for id in Store::ids(&resources, "item") {
        if let Some(item) = store.items.get_mut(id) {
            item.folder_id = parent_id.clone();
        }
    }
    Ok(Json(json!({"message": "Moved resources."})))
}

async fn bulk_copy(State(state): State<Shared>, Query(params): Params) -> ApiResult {
    let resources = Store::resources(&params)?;
    let (kind, parent_id) = parent(&params)?;
    let mut store = lock(&state);
    for id in Store::ids(&resources, "folder") {
        store.copy_folder(id, kind, &parent_id);
    }
    for id in Store::ids(&resources, "item") {
        store.copy_item(id, &parent_id);
    }
    Ok(Json(json!({"message": "Copied resources."})))
}

fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = String::from_utf8(BASE64.decode(encoded).ok()?).ok()?;
    let (login, password) = decoded.split_once(':')?;
    Some((login.to_string(), password.to_string()))
}

async fn authenticate(State(state): State<Shared>, headers: HeaderMap) -> ApiResult {
    let (login, password) = basic_credentials(&headers)
        .ok_or_else(|| ApiError(StatusCode::UNAUTHORIZED, "Credentials required.".to_string()))?;
    let mut store = lock(&state);
    let user = store
        .users
        .values()
        .find(|u| u.login == login)
        .cloned()
        .filter(|_| password == FakeBackend::PASSWORD)
        .ok_or_else(|| ApiError(StatusCode::UNAUTHORIZED, "Login failed.".to_string()))?;
    let token = Uuid::new_v4().to_string();
    store.tokens.insert(token.clone(), user.id.clone());
    Ok(Json(json!({
        "user": user,
        "authToken": {"token": token}
    })))
}

async fn logout(State(state): State<Shared>, headers: HeaderMap) -> ApiResult {
    if lock(&state).fail_logout {
        return Err(ApiError(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Session store unavailable.".to_string(),
        ));
    }
    if let Some(token) = headers.get("Girder-Token").and_then(|v| v.to_str().ok()) {
        lock(&state).tokens.remove(token);
    }
    Ok(Json(json!({"message": "Logged out."})))
}

async fn me(State(state): State<Shared>, headers: HeaderMap) -> ApiResult {
    let user = lock(&state).user_for(&headers);
    to_json(&user)
}

/// A running fake backend.
pub struct FakeBackend {
    pub addr: SocketAddr,
    pub state: Shared,
}

impl FakeBackend {
    /// Password accepted for every user.
    pub const PASSWORD: &'static str = "password";

    /// Start serving on an ephemeral port.
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(Store::default()));
        let api = Router::new()
            .route("/folder", get(list_folders).post(create_folder))
            .route(
                "/folder/{id}",
                get(get_folder).put(update_folder).delete(delete_folder),
            )
            .route("/folder/{id}/metadata", put(folder_metadata))
            .route("/item", get(list_items).post(create_item))
            .route("/item/{id}", get(get_item))
            .route("/item/{id}/metadata", put(item_metadata))
            .route("/collection/{id}", get(get_collection))
            .route("/user/authentication", get(authenticate).delete(logout))
            .route("/user/me", get(me))
            .route("/user/{id}", get(get_user))
            .route("/resource", post(bulk_delete))
            .route("/resource/move", put(bulk_move))
            .route("/resource/copy", post(bulk_copy));
        let router = Router::new()
            .nest("/api/v1", api)
            .layer(middleware::from_fn_with_state(state.clone(), record))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve");
        });
        Self { addr, state }
    }

    fn store(&self) -> MutexGuard<'_, Store> {
        lock(&self.state)
    }

    /// Client configuration pointing at this backend.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_root: format!("http://{}/api/v1", self.addr),
            page_size: 50,
            ..ClientConfig::default()
        }
    }

    /// A REST client for this backend.
    pub fn client(&self) -> Arc<RestClient> {
        Arc::new(RestClient::from_config(&self.client_config()).expect("client"))
    }

    /// A fresh session.
    pub fn session(&self) -> Arc<Session> {
        Arc::new(Session::default())
    }

    pub fn add_collection(&self, name: &str, level: AccessLevel) -> ResourceId {
        let collection = Collection {
            id: new_id(),
            name: name.to_string(),
            description: String::new(),
            public: true,
            access_level: Some(level),
            size: 0,
        };
        let id = collection.id.clone();
        self.store().collections.insert(id.clone(), collection);
        id
    }

    pub fn add_folder(
        &self,
        parent_kind: ResourceKind,
        parent_id: &ResourceId,
        name: &str,
        level: AccessLevel,
    ) -> ResourceId {
        let folder = Folder {
            id: new_id(),
            name: name.to_string(),
            description: String::new(),
            parent_kind,
            parent_id: parent_id.clone(),
            public: false,
            access_level: Some(level),
            meta: Metadata::new(),
            size: 0,
            created: None,
            updated: None,
        };
        let id = folder.id.clone();
        self.store().folders.insert(id.clone(), folder);
        id
    }

    pub fn add_item(&self, folder_id: &ResourceId, name: &str) -> ResourceId {
        let item = Item {
            id: new_id(),
            name: name.to_string(),
            description: String::new(),
            folder_id: folder_id.clone(),
            size: 1024,
            meta: Metadata::new(),
            created: None,
            updated: None,
        };
        let id = item.id.clone();
        self.store().items.insert(id.clone(), item);
        id
    }

    pub fn add_user(&self, login: &str, admin: bool) -> ResourceId {
        let user = User {
            id: new_id(),
            login: login.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: Some(format!("{login}@example.org")),
            admin,
            public: true,
            access_level: Some(AccessLevel::Read),
        };
        let id = user.id.clone();
        self.store().users.insert(id.clone(), user);
        id
    }

    pub fn folder(&self, id: &ResourceId) -> Option<Folder> {
        self.store().folders.get(id).cloned()
    }

    pub fn item(&self, id: &ResourceId) -> Option<Item> {
        self.store().items.get(id).cloned()
    }

    /// Names of the folders under a parent, sorted.
    pub fn child_folder_names(&self, parent_id: &ResourceId) -> Vec<String> {
        let mut names: Vec<String> = self
            .store()
            .folders
            .values()
            .filter(|f| &f.parent_id == parent_id)
            .map(|f| f.name.clone())
            .collect();
        names.sort();
        names
    }

    /// Requests received so far, as `METHOD /path[ override=X]`.
    pub fn requests(&self) -> Vec<String> {
        self.store().requests.clone()
    }

    /// Forget recorded requests.
    pub fn clear_requests(&self) {
        self.store().requests.clear();
    }

    /// Make every logout request fail with a server error.
    pub fn fail_logout(&self) {
        self.store().fail_logout = true;
    }
}
