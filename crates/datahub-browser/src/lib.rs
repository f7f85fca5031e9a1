//! # datahub-browser
//!
//! Client-side state of the DataHub user interface: the hierarchy
//! browser with its breadcrumb, checked lists and picked resources, the
//! global navigation links, and the metadata field editor.
//!
//! Components never touch a display. Every mutation updates plain state,
//! and `view()` methods turn that state into serializable view-state for
//! whatever presents it.

pub mod access;
pub mod breadcrumb;
pub mod confirm;
pub mod describe;
pub mod hierarchy;
pub mod list;
pub mod metadata;
pub mod nav;
pub mod picked;
pub mod route;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use confirm::ConfirmPrompt;
pub use hierarchy::HierarchyBrowser;
pub use nav::GlobalNav;
pub use route::Route;
pub use session::Session;
