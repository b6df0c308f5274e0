//! UI components for the daed dashboard.

mod pages;
mod sidebar;

pub use pages::{Home, RoutePage};
pub use sidebar::Sidebar;
