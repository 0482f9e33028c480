//! UI Components
//!
//! Reusable Leptos components.

mod activity_log;
mod delete_confirm_button;
mod entity_form;
mod orderable_table;
mod scope_selector;
mod sidebar;
mod toasts;

pub use activity_log::ActivityLog;
pub use delete_confirm_button::DeleteConfirmButton;
pub use entity_form::{EditTarget, EntityForm};
pub use orderable_table::OrderableTable;
pub use scope_selector::ScopeSelector;
pub use sidebar::Sidebar;
pub use toasts::Toasts;
