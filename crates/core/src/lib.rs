//! dash-grid-core: Drag interaction core for the dash-grid dashboard.
//!
//! This crate contains the drag engine capability trait, the adapter that
//! turns drag notifications into list moves, and the keyboard sensor.
//! Nothing here depends on a UI toolkit.

mod adapter;
mod engine;
mod keyboard;

pub use adapter::{DragAdapter, DragOutcome, DragState, OrderCallback};
pub use engine::{DragEngine, DragEvent};
pub use keyboard::{KeyAction, KeyboardSensor, SensorEvent};

// Re-export types used in trait signatures for convenience
pub use dash_grid_types::{Widget, WidgetId, WidgetList, WidgetListError};
