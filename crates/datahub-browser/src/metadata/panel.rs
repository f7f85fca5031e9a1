//! Metadata of one resource as a list of editable rows.

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use datahub_client::ResourceApi;
use datahub_core::AppError;
use datahub_core::result::AppResult;
use datahub_core::types::AccessLevel;
use datahub_entity::{Metadata, ResourceRef};

use super::editor::{FieldChange, FieldState, MetadataField};
use crate::confirm::ConfirmPrompt;

/// Destructive metadata actions awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MetadataAction {
    /// Remove the key from the resource.
    Delete {
        /// Key to remove.
        key: String,
    },
}

/// A rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataFieldView {
    /// Row position, used to address edits.
    pub index: usize,
    /// Key text.
    pub key: String,
    /// Value as displayed.
    pub value: String,
    /// Row state.
    pub state: FieldState,
    /// Whether the value is a JSON object or array.
    pub structured: bool,
}

/// Rendered metadata panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataView {
    /// Whether the viewer may add, edit or delete keys.
    pub editable: bool,
    /// Visible rows.
    pub fields: Vec<MetadataFieldView>,
}

/// Metadata rows of one resource.
#[derive(Debug, Clone)]
pub struct MetadataPanel {
    target: ResourceRef,
    access_level: AccessLevel,
    meta: Metadata,
    fields: Vec<MetadataField>,
}

impl MetadataPanel {
    /// Rows for `meta`, ordered by key.
    pub fn new(target: ResourceRef, access_level: AccessLevel, meta: Metadata) -> Self {
        let fields = meta
            .iter()
            .map(|(key, value)| MetadataField::existing(key.clone(), value))
            .collect();
        Self {
            target,
            access_level,
            meta,
            fields,
        }
    }

    /// The resource owning the metadata.
    pub fn target(&self) -> &ResourceRef {
        &self.target
    }

    /// Stored metadata as last confirmed by the backend.
    pub fn metadata(&self) -> &Metadata {
        &self.meta
    }

    /// Whether the viewer may change metadata.
    pub fn editable(&self) -> bool {
        self.access_level >= AccessLevel::Write
    }

    fn require_write(&self) -> AppResult<()> {
        if self.editable() {
            Ok(())
        } else {
            Err(AppError::authorization(
                "Write access is required to edit metadata",
            ))
        }
    }

    fn field_mut(&mut self, index: usize) -> AppResult<&mut MetadataField> {
        self.fields
            .get_mut(index)
            .filter(|f| f.state() != FieldState::Removed)
            .ok_or_else(|| AppError::not_found(format!("No metadatum at position {index}")))
    }

    /// Open a blank row; returns its position.
    pub fn add_field(&mut self) -> AppResult<usize> {
        self.require_write()?;
        self.fields.push(MetadataField::new_field());
        Ok(self.fields.len() - 1)
    }

    /// Position of the row holding `key`.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|f| !f.is_new() && f.state() != FieldState::Removed && f.key() == key)
    }

    /// Open an existing row for editing.
    pub fn begin_edit(&mut self, index: usize) -> AppResult<()> {
        self.require_write()?;
        self.field_mut(index)?.begin_edit()
    }

    /// Abandon an edit.
    pub fn cancel(&mut self, index: usize) -> AppResult<()> {
        self.field_mut(index)?.cancel();
        self.prune();
        Ok(())
    }

    fn check_unique(&self, index: usize, change: &FieldChange) -> AppResult<()> {
        let taken = self
            .fields
            .iter()
            .enumerate()
            .any(|(i, f)| {
                i != index && !f.is_new() && f.state() != FieldState::Removed && f.key() == change.key
            });
        if !taken {
            return Ok(());
        }
        match &change.old_key {
            None => Err(AppError::validation(format!(
                "{} is already a metadata key. Metadata keys must be unique.",
                change.key
            ))),
            Some(_) => Err(AppError::validation(format!(
                "{} is a key which already exists.",
                change.key
            ))),
        }
    }

    /// Save the row at `index` with the entered key and value text.
    ///
    /// A rename is sent as one patch removing the old key and adding the
    /// new one. On failure the row stays in editing.
    pub async fn save(
        &mut self,
        index: usize,
        key: &str,
        raw_value: &str,
        api: &dyn ResourceApi,
    ) -> AppResult<()> {
        self.require_write()?;
        let change = self.field_mut(index)?.prepare_save(key, raw_value)?;
        self.check_unique(index, &change)?;

        let mut patch = Metadata::new();
        if let Some(old) = change.old_key.as_ref().filter(|_| change.is_rename()) {
            patch.insert(old.clone(), Value::Null);
        }
        patch.insert(change.key.clone(), change.value.to_wire());

        self.meta = api.update_metadata(&self.target, &patch).await?;
        info!(target = %self.target, key = %change.key, "Saved metadatum");
        self.field_mut(index)?.commit(change);
        Ok(())
    }

    /// Ask before removing the key at `index`.
    pub fn request_delete(&self, index: usize) -> AppResult<ConfirmPrompt<MetadataAction>> {
        self.require_write()?;
        let field = self
            .fields
            .get(index)
            .filter(|f| !f.is_new() && f.state() != FieldState::Removed)
            .ok_or_else(|| AppError::not_found(format!("No metadatum at position {index}")))?;
        Ok(ConfirmPrompt::delete(
            format!(
                "Are you sure you want to delete the metadatum {}?",
                field.key()
            ),
            MetadataAction::Delete {
                key: field.key().to_string(),
            },
        ))
    }

    /// Carry out a confirmed action.
    pub async fn confirm(
        &mut self,
        prompt: ConfirmPrompt<MetadataAction>,
        api: &dyn ResourceApi,
    ) -> AppResult<()> {
        self.require_write()?;
        match prompt.action {
            MetadataAction::Delete { key } => {
                let index = self
                    .position(&key)
                    .ok_or_else(|| AppError::not_found(format!("No metadatum named {key}")))?;
                let mut patch = Metadata::new();
                patch.insert(key.clone(), Value::Null);
                self.meta = api.update_metadata(&self.target, &patch).await?;
                info!(target = %self.target, key = %key, "Deleted metadatum");
                self.field_mut(index)?.remove();
                self.prune();
                Ok(())
            }
        }
    }

    fn prune(&mut self) {
        self.fields.retain(|f| f.state() != FieldState::Removed);
    }

    /// Render-ready state.
    pub fn view(&self) -> MetadataView {
        MetadataView {
            editable: self.editable(),
            fields: self
                .fields
                .iter()
                .enumerate()
                .map(|(index, field)| MetadataFieldView {
                    index,
                    key: field.key().to_string(),
                    value: field.value().display().to_string(),
                    state: field.state(),
                    structured: field.value().is_structured(),
                })
                .collect(),
        }
    }
}
