//! User domain entities.

pub mod model;

pub use model::{AuthToken, User};
