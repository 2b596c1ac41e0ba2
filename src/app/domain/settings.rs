use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::theme::Theme;
use crate::app::infrastructure::error::Result;

/// Smallest window the editor will open with, whatever the settings say.
pub const MIN_WINDOW_WIDTH: i32 = 320;
pub const MIN_WINDOW_HEIGHT: i32 = 240;

/// Window geometry and theme, read at startup and written at close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_window_pos")]
    pub window_x: i32,

    #[serde(default = "default_window_pos")]
    pub window_y: i32,

    #[serde(default = "default_window_extent")]
    pub window_width: i32,

    #[serde(default = "default_window_extent")]
    pub window_height: i32,

    #[serde(default, deserialize_with = "Theme::deserialize_lenient")]
    pub theme: Theme,
}

fn default_window_pos() -> i32 {
    200
}

fn default_window_extent() -> i32 {
    400
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            window_x: default_window_pos(),
            window_y: default_window_pos(),
            window_width: default_window_extent(),
            window_height: default_window_extent(),
            theme: Theme::default(),
        }
    }
}

impl AppSettings {
    /// Window size clamped to the minimum the layout needs.
    pub fn window_size(&self) -> (i32, i32) {
        (
            self.window_width.max(MIN_WINDOW_WIDTH),
            self.window_height.max(MIN_WINDOW_HEIGHT),
        )
    }

    /// Load settings from the user config directory, or defaults.
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_path())
    }

    /// Load settings from `path`. A missing file yields defaults; a corrupt
    /// one is reported and replaced by defaults.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<AppSettings>(&contents) {
                Ok(settings) => {
                    tracing::debug!(theme = settings.theme.lexer_name(), "Loaded settings");
                    settings
                }
                Err(e) => {
                    tracing::warn!("Failed to parse settings {}: {}. Using defaults.", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Save settings to the user config directory.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        tracing::debug!(theme = self.theme.lexer_name(), "Saved settings");

        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("open-turing-editor");
        path.push("settings.json");
        path
    }
}
