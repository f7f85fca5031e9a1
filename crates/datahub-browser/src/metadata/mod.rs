//! In-place editing of resource metadata.
//!
//! A [`MetadataPanel`] lists the key/value pairs of one resource; each
//! row is a [`MetadataField`] moving between viewing, editing and
//! removed.

pub mod editor;
pub mod panel;

pub use editor::{FieldChange, FieldState, MetadataField};
pub use panel::{MetadataAction, MetadataFieldView, MetadataPanel, MetadataView};
