//! # datahub-client
//!
//! The REST seam of the DataHub client. [`ResourceApi`] lists every
//! backend call the browser makes; [`RestClient`] implements it over
//! HTTP with `reqwest`. Tests substitute in-memory implementations.

pub mod api;
pub mod download;
pub mod rest;

pub use api::ResourceApi;
pub use download::FormSubmission;
pub use rest::RestClient;
