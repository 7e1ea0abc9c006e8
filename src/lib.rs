//! dash-grid: A rearrangeable grid of dashboard widget cards
//!
//! This library provides:
//! - Configuration management (window, grid, seed widgets)
//! - The GTK grid that renders cards and feeds drag events to the
//!   drag adapter from `dash-grid-core`

pub mod config;
pub mod ui;

// Re-export commonly used types
pub use config::{AppConfig, GridConfig};
pub use dash_grid_core::{DragAdapter, DragEngine, DragEvent, KeyboardSensor};
pub use dash_grid_types::{Widget, WidgetId, WidgetList};
