//! # datahub-entity
//!
//! Resource models for the DataHub client. Every struct in this crate
//! mirrors a JSON document returned by the REST backend or a value object
//! sent back to it. All entities derive `Debug`, `Clone`, `Serialize`,
//! and `Deserialize`.

pub mod collection;
pub mod folder;
pub mod group;
pub mod item;
pub mod metadata;
pub mod resource;
pub mod user;

pub use collection::Collection;
pub use folder::Folder;
pub use group::Group;
pub use item::Item;
pub use metadata::{Metadata, MetadataValue};
pub use resource::{Resource, ResourceKind, ResourceRef, ResourceSet};
pub use user::{AuthToken, User};
