//! State machine of a single metadata row.

use serde::Serialize;
use serde_json::Value;

use datahub_core::AppError;
use datahub_core::result::AppResult;
use datahub_entity::MetadataValue;

/// Where a row is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldState {
    /// Showing the stored pair.
    Viewing,
    /// Showing key and value inputs.
    Editing,
    /// Gone; a removed row never comes back.
    Removed,
}

/// A validated save, ready to be sent to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    /// Key before the edit; `None` for a new row.
    pub old_key: Option<String>,
    /// Key after the edit.
    pub key: String,
    /// Coerced value.
    pub value: MetadataValue,
}

impl FieldChange {
    /// Whether the edit renames an existing key.
    pub fn is_rename(&self) -> bool {
        self.old_key.as_deref().is_some_and(|old| old != self.key)
    }
}

/// One metadata key/value row.
#[derive(Debug, Clone)]
pub struct MetadataField {
    key: String,
    value: MetadataValue,
    state: FieldState,
    is_new: bool,
}

impl MetadataField {
    /// A blank row opened for editing.
    pub fn new_field() -> Self {
        Self {
            key: String::new(),
            value: MetadataValue::Text(String::new()),
            state: FieldState::Editing,
            is_new: true,
        }
    }

    /// A row for a stored pair.
    pub fn existing(key: impl Into<String>, value: &Value) -> Self {
        Self {
            key: key.into(),
            value: MetadataValue::from_stored(value),
            state: FieldState::Viewing,
            is_new: false,
        }
    }

    /// Current key; empty for an unsaved new row.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current value.
    pub fn value(&self) -> &MetadataValue {
        &self.value
    }

    /// Lifecycle state.
    pub fn state(&self) -> FieldState {
        self.state
    }

    /// Whether the row has never been saved.
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// Switch to editing.
    pub fn begin_edit(&mut self) -> AppResult<()> {
        match self.state {
            FieldState::Viewing | FieldState::Editing => {
                self.state = FieldState::Editing;
                Ok(())
            }
            FieldState::Removed => Err(AppError::validation("This metadatum was removed")),
        }
    }

    /// Abandon the edit. A new row disappears; an existing one goes back
    /// to showing its stored pair.
    pub fn cancel(&mut self) {
        if self.state != FieldState::Editing {
            return;
        }
        self.state = if self.is_new {
            FieldState::Removed
        } else {
            FieldState::Viewing
        };
    }

    /// Validate entered text and coerce the value.
    ///
    /// Only a new row requires a non-empty key; an existing row keeps
    /// its key when none is entered.
    pub fn prepare_save(&self, key: &str, raw_value: &str) -> AppResult<FieldChange> {
        if self.state != FieldState::Editing {
            return Err(AppError::validation("This metadatum is not being edited"));
        }
        if self.is_new && key.is_empty() {
            return Err(AppError::validation("A key is required for all metadata."));
        }
        let key = if key.is_empty() { self.key.clone() } else { key.to_string() };
        Ok(FieldChange {
            old_key: (!self.is_new).then(|| self.key.clone()),
            key,
            value: self.value.edited(raw_value),
        })
    }

    /// Apply a change the backend accepted.
    pub fn commit(&mut self, change: FieldChange) {
        self.key = change.key;
        self.value = change.value;
        self.is_new = false;
        self.state = FieldState::Viewing;
    }

    /// Mark the row removed.
    pub fn remove(&mut self) {
        self.state = FieldState::Removed;
    }
}
