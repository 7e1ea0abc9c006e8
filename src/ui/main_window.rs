//! Main application window

use super::GridLayout;
use crate::config::AppConfig;
use dash_grid_types::{Widget, WidgetList};
use gtk4::prelude::*;
use gtk4::{Application, ApplicationWindow, Box as GtkBox, Label, ScrolledWindow};

/// Status line text after the order changed
fn order_summary(widgets: &[Widget]) -> String {
    let titles: Vec<&str> = widgets.iter().map(|w| w.title.as_str()).collect();
    format!("Order: {}", titles.join(" · "))
}

pub struct MainWindow {
    window: ApplicationWindow,
}

impl MainWindow {
    pub fn new(app: &Application, config: &AppConfig, list: WidgetList) -> Self {
        let window = ApplicationWindow::builder()
            .application(app)
            .title(config.window.title.as_str())
            .default_width(config.window.width)
            .default_height(config.window.height)
            .build();

        let container = GtkBox::new(gtk4::Orientation::Vertical, 0);
        container.add_css_class("dashboard");

        let heading = Label::new(Some(config.window.title.as_str()));
        heading.add_css_class("dashboard-heading");
        heading.set_halign(gtk4::Align::Start);
        container.append(&heading);

        let grid_layout = GridLayout::new(config.grid.clone(), list, config.window.width);

        let scrolled = ScrolledWindow::new();
        scrolled.set_vexpand(true);
        scrolled.set_child(Some(&grid_layout.widget()));
        container.append(&scrolled);

        let status = Label::new(Some(order_summary(&grid_layout.order()).as_str()));
        status.add_css_class("dashboard-status");
        status.set_halign(gtk4::Align::Start);
        container.append(&status);

        let status_clone = status.clone();
        grid_layout.set_on_change(move |widgets| {
            status_clone.set_text(&order_summary(widgets));
        });

        // Re-flow columns as the window is resized
        window.connect_default_width_notify(move |window| {
            grid_layout.set_width(window.default_width());
        });

        window.set_child(Some(&container));

        Self { window }
    }

    pub fn present(&self) {
        self.window.present();
    }
}
