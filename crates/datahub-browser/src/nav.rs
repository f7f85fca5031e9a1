//! Global navigation links.

use serde::Serialize;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, warn};

use datahub_core::config::ui::NavItemConfig;
use datahub_core::events::{EventBus, UiEvent};

/// One navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display name.
    pub name: String,
    /// Icon class.
    pub icon: String,
    /// Route fragment.
    pub target: String,
}

impl NavItem {
    fn new(name: &str, icon: &str, target: &str) -> Self {
        Self {
            name: name.to_string(),
            icon: icon.to_string(),
            target: target.to_string(),
        }
    }
}

impl From<NavItemConfig> for NavItem {
    fn from(config: NavItemConfig) -> Self {
        Self {
            name: config.name,
            icon: config.icon,
            target: config.target,
        }
    }
}

/// A rendered link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntryView {
    /// Display name.
    pub name: String,
    /// Icon class.
    pub icon: String,
    /// Route fragment.
    pub target: String,
    /// Whether this is the highlighted link.
    pub active: bool,
}

/// Rendered navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavView {
    /// Links in display order.
    pub entries: Vec<NavEntryView>,
}

/// The global navigation component.
///
/// Shows an injected list of links or, without one, the default links
/// plus an admin console entry for administrators. At most one link is
/// active. Listens for login and highlight events.
#[derive(Debug)]
pub struct GlobalNav {
    injected: Option<Vec<NavItem>>,
    admin: bool,
    active: Option<String>,
    events: broadcast::Receiver<UiEvent>,
}

impl GlobalNav {
    /// Subscribe a navigation component to `bus`.
    pub fn new(bus: &EventBus, injected: Option<Vec<NavItemConfig>>) -> Self {
        Self {
            injected: injected.map(|items| items.into_iter().map(NavItem::from).collect()),
            admin: false,
            active: None,
            events: bus.subscribe(),
        }
    }

    /// The links currently shown.
    pub fn items(&self) -> Vec<NavItem> {
        if let Some(items) = &self.injected {
            return items.clone();
        }
        let mut items = vec![
            NavItem::new("Collections", "icon-sitemap", "collections"),
            NavItem::new("Users", "icon-user", "users"),
            NavItem::new("Groups", "icon-users", "groups"),
        ];
        if self.admin {
            items.push(NavItem::new("Admin console", "icon-wrench", "admin"));
        }
        items
    }

    /// Show or hide the administrator entry.
    pub fn set_admin(&mut self, admin: bool) {
        self.admin = admin;
    }

    /// Re-render for a route fragment: the link whose target matches
    /// becomes active.
    pub fn render(&mut self, fragment: &str) -> NavView {
        let fragment = fragment.trim_start_matches('#');
        self.active = self
            .items()
            .into_iter()
            .find(|item| item.target == fragment)
            .map(|item| item.target);
        self.view()
    }

    /// Highlight the link for a view name such as `"CollectionsView"`.
    pub fn select_for_view(&mut self, view: &str) {
        let name = view.strip_suffix("View").unwrap_or(view);
        self.active = self
            .items()
            .into_iter()
            .find(|item| item.name == name)
            .map(|item| item.target);
        if self.active.is_none() {
            debug!(view, "No navigation link for view");
        }
    }

    /// Remove the highlight from every link.
    pub fn deactivate_all(&mut self) {
        self.active = None;
    }

    /// Activate the clicked link and return the route to navigate to.
    pub fn click(&mut self, target: &str) -> Option<String> {
        let item = self.items().into_iter().find(|item| item.target == target)?;
        self.active = Some(item.target.clone());
        Some(item.target)
    }

    /// Apply pending login and highlight events. Returns whether
    /// anything changed.
    pub fn sync(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.events.try_recv() {
                Ok(UiEvent::Login { user }) => {
                    self.set_admin(user.is_some_and(|u| u.admin));
                    changed = true;
                }
                Ok(UiEvent::HighlightItem { view }) => {
                    self.select_for_view(&view);
                    changed = true;
                }
                Ok(_) => {}
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "Navigation fell behind on UI events");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        changed
    }

    /// Render-ready state.
    pub fn view(&self) -> NavView {
        NavView {
            entries: self
                .items()
                .into_iter()
                .map(|item| NavEntryView {
                    active: self.active.as_deref() == Some(item.target.as_str()),
                    name: item.name,
                    icon: item.icon,
                    target: item.target,
                })
                .collect(),
        }
    }
}
