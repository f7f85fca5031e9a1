//! Transient user notifications.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Visual category of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    /// An operation completed.
    Success,
    /// Neutral information.
    Info,
    /// Local validation problem.
    Warning,
    /// A failed operation.
    Danger,
}

/// A timed, dismissible notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Message text.
    pub text: String,
    /// Category.
    pub kind: AlertKind,
    /// Optional icon name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// How long the alert stays visible, in milliseconds.
    pub timeout_ms: u64,
}

impl Alert {
    /// Create an alert with the given category and timeout.
    pub fn new(kind: AlertKind, text: impl Into<String>, timeout_ms: u64) -> Self {
        Self {
            text: text.into(),
            kind,
            icon: None,
            timeout_ms,
        }
    }

    /// A success alert with the `ok` icon.
    pub fn success(text: impl Into<String>, timeout_ms: u64) -> Self {
        Self::new(AlertKind::Success, text, timeout_ms).with_icon("ok")
    }

    /// An info alert with the `ok` icon.
    pub fn info(text: impl Into<String>, timeout_ms: u64) -> Self {
        Self::new(AlertKind::Info, text, timeout_ms).with_icon("ok")
    }

    /// Build the alert reported for a failed action.
    ///
    /// Validation failures are warnings; everything else is danger.
    pub fn from_error(err: &AppError, timeout_ms: u64) -> Self {
        let kind = match err.kind {
            crate::error::ErrorKind::Validation => AlertKind::Warning,
            _ => AlertKind::Danger,
        };
        Self::new(kind, err.user_message(), timeout_ms)
    }

    /// Attach an icon.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}
