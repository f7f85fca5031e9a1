//! Presentation configuration.

use serde::{Deserialize, Serialize};

/// A navigation link supplied through configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItemConfig {
    /// Display name.
    pub name: String,
    /// Icon class name.
    #[serde(default)]
    pub icon: String,
    /// Route fragment the link navigates to.
    pub target: String,
}

/// Alert, event and navigation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// How long transient alerts stay visible, in milliseconds.
    #[serde(default = "default_alert_timeout")]
    pub alert_timeout_ms: u64,
    /// Capacity of the UI event channel.
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
    /// Replaces the default navigation links when set.
    #[serde(default)]
    pub nav_items: Option<Vec<NavItemConfig>>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            alert_timeout_ms: default_alert_timeout(),
            event_buffer: default_event_buffer(),
            nav_items: None,
        }
    }
}

fn default_alert_timeout() -> u64 {
    4000
}

fn default_event_buffer() -> usize {
    64
}
