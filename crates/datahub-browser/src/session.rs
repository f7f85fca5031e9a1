//! Session-scoped state shared by the UI components.

use std::sync::Mutex;

use tracing::{debug, info};

use datahub_core::AppError;
use datahub_core::config::ui::UiConfig;
use datahub_core::events::{Alert, EventBus, UiEvent};
use datahub_entity::User;

use crate::picked::PickedResources;
use crate::route::Route;

/// State owned by one signed-in (or anonymous) session.
///
/// Holds the picked store, the current user, the route history and the
/// event bus. Components receive an `Arc<Session>` explicitly. The
/// picked store is reset in exactly one place: [`Session::login`].
#[derive(Debug)]
pub struct Session {
    bus: EventBus,
    picked: Mutex<Option<PickedResources>>,
    user: Mutex<Option<User>>,
    history: Mutex<Vec<Route>>,
    alert_timeout_ms: u64,
}

impl Session {
    /// A session publishing on `bus`.
    pub fn new(bus: EventBus, alert_timeout_ms: u64) -> Self {
        Self {
            bus,
            picked: Mutex::new(None),
            user: Mutex::new(None),
            history: Mutex::new(Vec::new()),
            alert_timeout_ms,
        }
    }

    /// A session with its own bus sized from configuration.
    pub fn from_config(config: &UiConfig) -> Self {
        Self::new(EventBus::new(config.event_buffer), config.alert_timeout_ms)
    }

    /// The session's event bus.
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Change the authenticated user; `None` logs out.
    ///
    /// Discards the picked store and announces the change.
    pub fn login(&self, user: Option<User>) {
        let identity = user.as_ref().map(User::identity);
        info!(
            login = identity.as_ref().map(|i| i.login.as_str()).unwrap_or("<anonymous>"),
            "Session user changed"
        );
        *self.user.lock().unwrap_or_else(|e| e.into_inner()) = user;
        *self.picked.lock().unwrap_or_else(|e| e.into_inner()) = None;
        self.bus.publish(UiEvent::Login { user: identity });
    }

    /// The authenticated user.
    pub fn current_user(&self) -> Option<User> {
        self.user.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Whether the current user is a site administrator.
    pub fn is_admin(&self) -> bool {
        self.user
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .is_some_and(|u| u.admin)
    }

    /// A copy of the picked store, if anything was ever picked.
    pub fn picked(&self) -> Option<PickedResources> {
        self.picked.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Mutate the picked store, creating it on first use.
    pub fn update_picked<R>(&self, f: impl FnOnce(&mut PickedResources) -> R) -> R {
        let mut guard = self.picked.lock().unwrap_or_else(|e| e.into_inner());
        f(guard.get_or_insert_with(PickedResources::new))
    }

    /// Remove and return the picked store.
    pub fn take_picked(&self) -> Option<PickedResources> {
        self.picked.lock().unwrap_or_else(|e| e.into_inner()).take()
    }

    /// Record a navigation and announce it.
    pub fn navigate(&self, route: Route) {
        debug!(%route, "Navigating");
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(route.clone());
        self.bus.publish(UiEvent::HierarchyRoute {
            route: route.to_string(),
        });
    }

    /// The most recent route.
    pub fn current_route(&self) -> Option<Route> {
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }

    /// Number of recorded navigations.
    pub fn history_len(&self) -> usize {
        self.history.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Publish an alert.
    pub fn alert(&self, alert: Alert) {
        self.bus.publish(UiEvent::Alert(alert));
    }

    /// Publish an info alert.
    pub fn info(&self, text: impl Into<String>) {
        self.alert(Alert::info(text, self.alert_timeout_ms));
    }

    /// Publish a success alert.
    pub fn success(&self, text: impl Into<String>) {
        self.alert(Alert::success(text, self.alert_timeout_ms));
    }

    /// Turn a failed action into an alert.
    pub fn report(&self, err: &AppError) {
        debug!(error = %err, "Reporting failed action");
        self.alert(Alert::from_error(err, self.alert_timeout_ms));
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::from_config(&UiConfig::default())
    }
}
