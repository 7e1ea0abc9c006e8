//! Configuration management

mod settings;

pub use settings::{AppConfig, Breakpoint, GridConfig, WidgetSeed, WindowConfig};
