//! Application and grid configuration

use anyhow::{Context, Result};
use dash_grid_types::{list::default_seed, Widget, WidgetId, WidgetList};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application-wide configuration
///
/// Only read at startup. The widget order is never written back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the config format
    #[serde(default = "default_version")]
    pub version: u32,
    /// Window dimensions
    #[serde(default)]
    pub window: WindowConfig,
    /// Grid settings
    #[serde(default)]
    pub grid: GridConfig,
    /// Seed widgets; the built-in set when empty
    #[serde(default)]
    pub widgets: Vec<WidgetSeed>,
}

fn default_version() -> u32 {
    1
}

impl AppConfig {
    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "github.dash_grid", "dash-grid")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.json"))
    }

    /// Build the initial widget list from the configured seed
    pub fn seed_list(&self) -> Result<WidgetList> {
        if self.widgets.is_empty() {
            return Ok(WidgetList::default());
        }
        let widgets = self.widgets.iter().map(WidgetSeed::to_widget).collect();
        WidgetList::new(widgets).context("invalid widget seed")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            window: WindowConfig::default(),
            grid: GridConfig::default(),
            widgets: default_seed().into_iter().map(WidgetSeed::from).collect(),
        }
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: i32,
    pub height: i32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 960,
            height: 600,
            title: "Dashboard".to_string(),
        }
    }
}

/// Grid configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Column count when no breakpoint applies
    pub columns: u32,
    /// Width-dependent column counts; empty means `columns` is fixed
    pub breakpoints: Vec<Breakpoint>,
    pub card_width: i32,
    pub card_height: i32,
    pub spacing: i32,
    /// Corner radius of card backgrounds
    pub corner_radius: f64,
}

impl GridConfig {
    /// Columns to lay out for a window `width` pixels wide
    pub fn columns_for_width(&self, width: i32) -> u32 {
        self.breakpoints
            .iter()
            .filter(|bp| bp.min_width <= width)
            .max_by_key(|bp| bp.min_width)
            .map_or(self.columns, |bp| bp.columns)
            .max(1)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: 3,
            breakpoints: vec![
                Breakpoint { min_width: 0, columns: 1 },
                Breakpoint { min_width: 768, columns: 2 },
                Breakpoint { min_width: 1024, columns: 3 },
            ],
            card_width: 240,
            card_height: 160,
            spacing: 16,
            corner_radius: 12.0,
        }
    }
}

/// Column count used from `min_width` pixels upward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub min_width: i32,
    pub columns: u32,
}

/// A widget entry in the config file. The id may be omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetSeed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
}

impl WidgetSeed {
    fn to_widget(&self) -> Widget {
        let id = match &self.id {
            Some(id) => WidgetId::from(id.as_str()),
            None => WidgetId::generate(),
        };
        Widget::new(id, self.title.clone())
    }
}

impl From<Widget> for WidgetSeed {
    fn from(widget: Widget) -> Self {
        Self {
            id: Some(widget.id.to_string()),
            title: widget.title,
        }
    }
}
