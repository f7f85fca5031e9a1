//! Generic resource handling shared by every resource kind.

pub mod kind;
pub mod model;
pub mod reference;
pub mod set;

pub use kind::ResourceKind;
pub use model::Resource;
pub use reference::ResourceRef;
pub use set::ResourceSet;
