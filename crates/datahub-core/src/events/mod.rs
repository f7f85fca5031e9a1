//! UI events exchanged between components.
//!
//! Components publish and consume typed events through an [`EventBus`]
//! handed to them explicitly. Each subscriber owns its receiver, so a
//! subscription lives exactly as long as the component holding it.

pub mod alert;
pub mod bus;

use serde::{Deserialize, Serialize};

pub use alert::{Alert, AlertKind};
pub use bus::EventBus;

/// Identity of the signed-in user as carried by login events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginIdentity {
    /// The user's id.
    pub id: String,
    /// The user's login name.
    pub login: String,
    /// Whether the user is a site administrator.
    pub admin: bool,
}

/// Union of all UI events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// The authenticated user changed; `None` means logged out.
    Login {
        /// The new user, if any.
        user: Option<LoginIdentity>,
    },
    /// A transient notification for the user.
    Alert(Alert),
    /// A view asks the navigation to highlight its entry.
    HighlightItem {
        /// View name, e.g. `"CollectionsView"`.
        view: String,
    },
    /// The hierarchy browser changed the current route.
    HierarchyRoute {
        /// The new route fragment.
        route: String,
    },
}
