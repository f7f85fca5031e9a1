//! Two-step confirmation of destructive actions.

use serde::Serialize;

/// A question for the user and the action it guards.
///
/// Requesting a destructive action yields a prompt; the action runs
/// only when the prompt is handed back to the component that issued it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfirmPrompt<A> {
    /// Question shown to the user.
    pub text: String,
    /// Label of the confirming button.
    pub yes_text: String,
    /// What happens on confirmation.
    pub action: A,
}

impl<A> ConfirmPrompt<A> {
    /// A prompt confirmed with a "Delete" button.
    pub fn delete(text: impl Into<String>, action: A) -> Self {
        Self {
            text: text.into(),
            yes_text: "Delete".to_string(),
            action,
        }
    }
}
