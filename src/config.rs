// File: ./src/config.rs
// Handles configuration loading and defaults.
use crate::context::AppContext;
use crate::layout::{DAY_HEIGHT_PX, LayoutConfig};
use crate::model::time_to_minutes;
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use strum::{Display, EnumIter, IntoEnumIterator};

fn default_day_start() -> String {
    "08:00".to_string()
}
fn default_day_end() -> String {
    "20:00".to_string()
}
fn default_cell_height() -> f32 {
    DAY_HEIGHT_PX
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter, Display)]
pub enum AppTheme {
    #[default]
    Light,
    Dark,
}

impl AppTheme {
    /// Next theme in declaration order, wrapping around.
    pub fn toggled(self) -> Self {
        AppTheme::iter()
            .cycle()
            .skip_while(|t| *t != self)
            .nth(1)
            .unwrap_or_default()
    }

    pub fn is_dark(self) -> bool {
        self == AppTheme::Dark
    }

    /// Foreground used on event blocks.
    pub fn event_text_color(self) -> &'static str {
        if self.is_dark() { "#fff" } else { "#000" }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    /// First visible minute of a day cell ("HH:MM" or any accepted time form).
    #[serde(default = "default_day_start")]
    pub day_start: String,
    #[serde(default = "default_day_end")]
    pub day_end: String,
    #[serde(default = "default_cell_height")]
    pub cell_height: f32,
    #[serde(default)]
    pub week_starts_monday: bool,
    /// Theme at startup. Toggling inside the app is not written back.
    #[serde(default)]
    pub theme: AppTheme,
    /// Extra course presets; persisted assignments still win over these.
    #[serde(default)]
    pub course_colors: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            day_start: default_day_start(),
            day_end: default_day_end(),
            cell_height: default_cell_height(),
            week_starts_monday: false,
            theme: AppTheme::default(),
            course_colors: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Like `load`, but a missing file means defaults. Other errors still propagate.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(cfg) => Ok(cfg),
            Err(e) if Self::is_missing_config_error(&e) => {
                log::info!("No config file found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Helper to detect whether an anyhow::Error indicates that the config file was missing.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    /// Day-cell geometry. Unparseable or inverted bounds fall back to 08:00-20:00.
    pub fn layout(&self) -> LayoutConfig {
        let defaults = LayoutConfig::default();
        let start = time_to_minutes(&self.day_start);
        let end = time_to_minutes(&self.day_end);

        let (day_start, day_end) = match (start, end) {
            (Some(s), Some(e)) if s < e => (s, e),
            _ => {
                log::warn!(
                    "Invalid day window '{}'-'{}', using defaults",
                    self.day_start,
                    self.day_end
                );
                (defaults.day_start, defaults.day_end)
            }
        };

        let cell_height = if self.cell_height > 0.0 {
            self.cell_height
        } else {
            defaults.cell_height
        };

        LayoutConfig {
            day_start,
            day_end,
            cell_height,
        }
    }
}
