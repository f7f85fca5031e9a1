//! # datahub-core
//!
//! Core crate for the DataHub client. Contains configuration schemas,
//! typed identifiers, access levels, paging/sorting parameters, UI
//! events with their bus, and the unified error system.
//!
//! This crate has **no** internal dependencies on other DataHub crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
