use clap::Parser;
use dash_grid::config::AppConfig;
use dash_grid::ui::MainWindow;
use dash_grid_types::WidgetList;
use gtk4::gdk::Display;
use gtk4::prelude::*;
use gtk4::{Application, CssProvider};
use log::{info, warn};
use std::path::PathBuf;

const APP_ID: &str = "com.github.dash_grid.dash_grid";

/// dash-grid - A rearrangeable grid of dashboard widget cards
#[derive(Parser, Debug, Clone)]
#[command(name = "dash-grid")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,

    /// Fixed number of grid columns (overrides the layout file and disables width breakpoints)
    #[arg(short = 'c', long = "columns", value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    columns: Option<u32>,

    /// Layout file to load at startup
    #[arg(value_name = "LAYOUT_FILE")]
    layout_file: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    // Level 0 (default): warn only
    // Level 1: info
    // Level 2: debug (drag notifications, ignored moves)
    // Level 3+: trace
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    info!("Starting dash-grid v{}", env!("CARGO_PKG_VERSION"));

    let app = Application::builder().application_id(APP_ID).build();

    app.connect_activate(move |app| build_ui(app, &cli));

    // Run the application (pass empty args since we already parsed them)
    app.run_with_args(&["dash-grid"]);
}

/// Load the layout file if given, otherwise the default config location
fn load_config(cli: &Cli) -> AppConfig {
    let mut config = if let Some(ref layout_path) = cli.layout_file {
        match AppConfig::load_from_path(layout_path) {
            Ok(config) => {
                info!("Loaded layout from: {}", layout_path.display());
                config
            }
            Err(e) => {
                warn!("Failed to load layout file '{}': {:#}", layout_path.display(), e);
                AppConfig::default()
            }
        }
    } else {
        match AppConfig::load() {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load config, using defaults: {:#}", e);
                AppConfig::default()
            }
        }
    };

    if let Some(columns) = cli.columns {
        config.grid.columns = columns;
        config.grid.breakpoints.clear();
    }
    config
}

fn build_ui(app: &Application, cli: &Cli) {
    info!("Building UI");

    load_css();

    let config = load_config(cli);

    let list = match config.seed_list() {
        Ok(list) => list,
        Err(e) => {
            warn!("{:#}; falling back to the default widgets", e);
            WidgetList::default()
        }
    };
    info!("Seeded {} widgets", list.len());

    let main_window = MainWindow::new(app, &config, list);
    main_window.present();
}

fn load_css() {
    let provider = CssProvider::new();
    provider.load_from_data(
        "
        .dashboard {
            background-color: #f9fafb;
            padding: 32px;
        }

        .dashboard-heading {
            font-size: 20px;
            font-weight: bold;
            color: #111827;
            margin-bottom: 16px;
        }

        .dashboard-status {
            color: #6b7280;
            margin-top: 8px;
        }

        .widget-card {
            border: none;
            padding: 0;
            background: transparent;
        }

        .widget-card:focus-visible {
            outline: 2px solid #3b82f6;
            outline-offset: 2px;
            border-radius: 12px;
        }

        .card-title {
            font-weight: bold;
            color: #374151;
        }
        ",
    );

    match Display::default() {
        Some(display) => gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        ),
        None => warn!("No display available, skipping CSS"),
    }
}
