// Settings module
// User preferences loaded from settings.toml

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_STORAGE_KEY: &str = "calendar-tasks";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding persisted blobs; the platform data dir when unset
    pub data_dir: Option<PathBuf>,
    /// Blob key the task list is stored under
    pub storage_key: String,
    pub show_sidebar: bool,
    /// "light", "dark" or "system"
    pub theme: String,
    /// Task names listed inside each day cell before "+N more"
    pub max_day_indicators: usize,
    /// Seed sample tasks when the stored task list is empty
    pub seed_demo_data: bool,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            show_sidebar: true,
            theme: "system".to_string(),
            max_day_indicators: 2,
            seed_demo_data: false,
            window_width: 1200.0,
            window_height: 800.0,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), String> {
        if self.storage_key.trim().is_empty() {
            return Err("Storage key cannot be empty".to_string());
        }

        if !matches!(self.theme.to_lowercase().as_str(), "light" | "dark" | "system") {
            return Err(format!("Unknown theme '{}'", self.theme));
        }

        if self.max_day_indicators == 0 {
            return Err("At least one task indicator per day is required".to_string());
        }

        if self.window_width <= 0.0 || self.window_height <= 0.0 {
            return Err("Window size must be positive".to_string());
        }

        Ok(())
    }
}
