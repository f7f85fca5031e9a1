//! Core type definitions used across the DataHub workspace.

pub mod access;
pub mod id;
pub mod pagination;
pub mod sorting;

pub use access::AccessLevel;
pub use id::ResourceId;
pub use pagination::PageRequest;
pub use sorting::{SortDirection, SortField};
