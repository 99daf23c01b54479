//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod form;
pub mod resource_panel;
pub mod sidebar;
pub mod toast;

pub use sidebar::Sidebar;
pub use toast::Toast;
