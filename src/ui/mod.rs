//! UI components

mod card;
mod grid_layout;
mod main_window;

pub use card::{Card, CardStyle};
pub use grid_layout::GridLayout;
pub use main_window::MainWindow;
