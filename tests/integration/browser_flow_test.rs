//! Hierarchy browsing against a live HTTP backend.

mod helpers;

use std::sync::Arc;

use datahub_browser::{HierarchyBrowser, Route, Session};
use datahub_cli::commands::Context;
use datahub_client::ResourceApi;
use datahub_core::config::AppConfig;
use datahub_core::types::{AccessLevel, ResourceId};
use datahub_entity::{ResourceKind, ResourceRef};
use helpers::FakeBackend;

struct Setup {
    backend: FakeBackend,
    api: Arc<dyn ResourceApi>,
    session: Arc<Session>,
    collection: ResourceId,
    alpha: ResourceId,
    beta: ResourceId,
    file: ResourceId,
}

async fn setup() -> Setup {
    let backend = FakeBackend::start().await;
    let collection = backend.add_collection("Projects", AccessLevel::Admin);
    let alpha = backend.add_folder(ResourceKind::Collection, &collection, "alpha", AccessLevel::Admin);
    let beta = backend.add_folder(ResourceKind::Collection, &collection, "beta", AccessLevel::Write);
    let file = backend.add_item(&alpha, "data.csv");
    let api: Arc<dyn ResourceApi> = backend.client();
    let session = backend.session();
    Setup {
        backend,
        api,
        session,
        collection,
        alpha,
        beta,
        file,
    }
}

async fn open_at(setup: &Setup, target: ResourceRef) -> HierarchyBrowser {
    let root = setup.api.fetch(&target).await.expect("fetch root");
    HierarchyBrowser::open(Arc::clone(&setup.api), Arc::clone(&setup.session), root, 50)
        .await
        .expect("open browser")
}

fn collection_ref(setup: &Setup) -> ResourceRef {
    ResourceRef::new(ResourceKind::Collection, setup.collection.clone())
}

#[tokio::test]
async fn test_open_collection_lists_sorted_folders() {
    let setup = setup().await;
    let browser = open_at(&setup, collection_ref(&setup)).await;

    let names: Vec<&str> = browser
        .folders()
        .entries()
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(names, vec!["alpha", "beta"]);
    assert!(browser.items().is_none());
    assert_eq!(browser.access_level(), AccessLevel::Admin);

    let view = browser.view();
    assert!(view.actions.create_folder);
    assert!(!view.actions.create_item);
    assert!(view.breadcrumb.links.is_empty());
}

#[tokio::test]
async fn test_open_folder_resolves_breadcrumbs() {
    let setup = setup().await;
    let inner = setup
        .backend
        .add_folder(ResourceKind::Folder, &setup.alpha, "inner", AccessLevel::Admin);
    let browser = open_at(&setup, ResourceRef::folder(inner.clone())).await;

    assert_eq!(browser.breadcrumbs().len(), 3);
    assert_eq!(browser.breadcrumbs().root().name(), "Projects");
    assert_eq!(browser.current().name(), "inner");
    assert_eq!(
        browser.route(),
        Route::Hierarchy {
            root: collection_ref(&setup),
            folder: Some(inner),
        }
    );
}

#[tokio::test]
async fn test_descend_and_breadcrumb_click_record_routes() {
    let setup = setup().await;
    let mut browser = open_at(&setup, collection_ref(&setup)).await;
    let before = setup.session.history_len();

    browser.descend(&setup.alpha).await.expect("descend");
    assert_eq!(browser.current().name(), "alpha");
    let items = browser.items().expect("folder lists items");
    assert!(items.find_by_name("data.csv").is_some());
    assert_eq!(setup.session.history_len(), before + 1);

    browser.breadcrumb_clicked(0).await.expect("breadcrumb");
    assert_eq!(browser.current().name(), "Projects");
    assert_eq!(setup.session.history_len(), before + 2);
    assert_eq!(
        setup.session.current_route(),
        Some(Route::Hierarchy {
            root: collection_ref(&setup),
            folder: None,
        })
    );
}

#[tokio::test]
async fn test_create_then_bulk_delete_checked() {
    let setup = setup().await;
    let mut browser = open_at(&setup, collection_ref(&setup)).await;

    let created = browser.create_folder("gamma", "scratch").await.expect("create");
    assert!(browser.folders().get(&created.id).is_some());
    assert!(setup.backend.folder(&created.id).is_some());

    let history = setup.session.history_len();
    let route = browser.route();
    setup.backend.clear_requests();

    browser.check_folder(&created.id, true).expect("check");
    browser.check_folder(&setup.alpha, true).expect("check");
    let prompt = browser.request_delete_checked().expect("prompt");
    assert_eq!(
        prompt.text,
        "Are you sure you want to delete the checked resources (2 folders)?"
    );
    assert_eq!(prompt.yes_text, "Delete");
    browser.confirm(prompt).await.expect("delete");

    assert!(setup.backend.folder(&created.id).is_none());
    assert!(setup.backend.folder(&setup.alpha).is_none());
    assert!(setup.backend.item(&setup.file).is_none());
    assert!(browser.folders().get(&created.id).is_none());
    assert_eq!(browser.folders().len(), 1);
    assert_eq!(browser.route(), route);
    assert_eq!(setup.session.history_len(), history);

    let deletes: Vec<String> = setup
        .backend
        .requests()
        .into_iter()
        .filter(|r| r.contains("override=DELETE"))
        .collect();
    assert_eq!(deletes, vec!["POST /api/v1/resource override=DELETE".to_string()]);
}

#[tokio::test]
async fn test_delete_container_ascends() {
    let setup = setup().await;
    let mut browser = open_at(&setup, ResourceRef::folder(setup.alpha.clone())).await;

    let prompt = browser.request_delete_container().expect("prompt");
    assert_eq!(prompt.text, "Are you sure you want to delete the folder alpha?");
    browser.confirm(prompt).await.expect("delete");

    assert!(setup.backend.folder(&setup.alpha).is_none());
    assert!(setup.backend.item(&setup.file).is_none());
    assert_eq!(browser.current().name(), "Projects");
    assert_eq!(browser.folders().len(), 1);
}

#[tokio::test]
async fn test_pick_item_and_move_into_other_folder() {
    let setup = setup().await;
    let mut source = open_at(&setup, ResourceRef::folder(setup.alpha.clone())).await;

    source.check_item(&setup.file, true).expect("check");
    let text = source.pick_checked().expect("pick");
    assert_eq!(text, "1 item picked.");
    assert_eq!(source.menu().picked_count, 1);

    let mut target = open_at(&setup, ResourceRef::folder(setup.beta.clone())).await;
    assert!(target.move_allowed());
    target.move_picked().await.expect("move");

    assert_eq!(
        setup.backend.item(&setup.file).expect("item").folder_id,
        setup.beta
    );
    assert!(setup.session.picked().is_none());
    let items = target.items().expect("items");
    assert!(items.find_by_name("data.csv").is_some());
    assert_eq!(target.menu().picked_count, 0);
}

#[tokio::test]
async fn test_items_cannot_be_moved_into_a_collection() {
    let setup = setup().await;
    let mut source = open_at(&setup, ResourceRef::folder(setup.alpha.clone())).await;
    source.check_item(&setup.file, true).expect("check");
    source.pick_checked().expect("pick");

    let mut root = open_at(&setup, collection_ref(&setup)).await;
    assert!(!root.move_allowed());
    assert!(!root.copy_allowed());
    let err = root.move_picked().await.expect_err("must be refused");
    assert_eq!(err.kind, datahub_core::error::ErrorKind::Authorization);
    assert!(setup.session.picked().is_some());
}

#[tokio::test]
async fn test_pick_accumulates_and_copy_folder() {
    let setup = setup().await;
    let mut root = open_at(&setup, collection_ref(&setup)).await;

    root.check_folder(&setup.alpha, true).expect("check");
    assert_eq!(root.pick_checked().expect("pick"), "1 folder picked.");

    let mut inside = open_at(&setup, ResourceRef::folder(setup.alpha.clone())).await;
    inside.check_item(&setup.file, true).expect("check");
    assert_eq!(
        inside.pick_checked().expect("pick"),
        "1 item added to picked resources.  Now 1 folder and 1 item picked."
    );

    let mut target = open_at(&setup, ResourceRef::folder(setup.beta.clone())).await;
    assert!(target.copy_allowed());
    target.copy_picked().await.expect("copy");

    assert_eq!(setup.backend.child_folder_names(&setup.beta), vec!["alpha"]);
    let items = target.items().expect("items");
    assert!(items.find_by_name("data.csv").is_some());
    assert!(setup.backend.item(&setup.file).is_some());
    assert!(setup.session.picked().is_none());
}

#[tokio::test]
async fn test_login_discards_picked() {
    let setup = setup().await;
    let user_id = setup.backend.add_user("jdoe", false);
    let mut root = open_at(&setup, collection_ref(&setup)).await;
    root.check_all(true);
    root.pick_checked().expect("pick");
    assert!(setup.session.picked().is_some());

    let (user, _) = setup
        .api
        .authenticate("jdoe", FakeBackend::PASSWORD)
        .await
        .expect("login");
    assert_eq!(user.id, user_id);
    setup.session.login(Some(user));
    assert!(setup.session.picked().is_none());

    assert!(root.sync_events());
    assert_eq!(root.menu().picked_count, 0);
}

#[tokio::test]
async fn test_failed_logout_still_clears_session() {
    let setup = setup().await;
    setup.backend.add_user("jdoe", false);
    let ctx = Context {
        config: AppConfig {
            client: setup.backend.client_config(),
            ..AppConfig::default()
        },
        api: Arc::clone(&setup.api),
        session: Arc::clone(&setup.session),
    };
    ctx.log_in("jdoe", FakeBackend::PASSWORD).await.expect("login");
    assert!(setup.session.current_user().is_some());
    let mut root = open_at(&setup, collection_ref(&setup)).await;
    root.check_all(true);
    root.pick_checked().expect("pick");

    setup.backend.fail_logout();
    ctx.log_out().await.expect_err("backend refuses logout");
    assert!(setup.session.current_user().is_none());
    assert!(setup.session.picked().is_none());
    assert!(setup.api.current_user().await.expect("anonymous").is_none());
}

#[tokio::test]
async fn test_paging_shows_more_folders() {
    let setup = setup().await;
    for n in 0..5 {
        setup.backend.add_folder(
            ResourceKind::Folder,
            &setup.alpha,
            &format!("sub{n}"),
            AccessLevel::Read,
        );
    }
    let root = setup
        .api
        .fetch(&ResourceRef::folder(setup.alpha.clone()))
        .await
        .expect("fetch");
    let mut browser =
        HierarchyBrowser::open(Arc::clone(&setup.api), Arc::clone(&setup.session), root, 2)
            .await
            .expect("open");

    assert_eq!(browser.folders().len(), 2);
    assert!(browser.folders().has_more());
    assert_eq!(browser.show_more_folders().await.expect("more"), 2);
    assert_eq!(browser.show_more_folders().await.expect("more"), 1);
    assert_eq!(browser.folders().len(), 5);
    assert!(!browser.folders().has_more());
}
