//! HTTP handlers for the panel navigation and per-resource pages and actions.

pub mod panel;
pub mod resource;
pub use panel::*;
pub use resource::*;
