//! dash-grid-types: Shared data types for the dash-grid widget dashboard.
//!
//! This crate contains pure data types (widgets and the ordered widget list)
//! that are shared across all dash-grid crates. These types have no GTK or
//! Cairo dependencies, making them suitable as a foundation layer.

pub mod list;
pub mod widget;

// Re-export commonly used types at the crate root for convenience
pub use list::{WidgetList, WidgetListError};
pub use widget::{Widget, WidgetId};
