//! Dashboard Configuration Module
//! Optional JSON file overriding the default dataset and logo paths.

use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Looked up in the working directory; absent means all defaults.
pub const CONFIG_FILE: &str = "dashboard.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub day_csv: PathBuf,
    pub hour_csv: PathBuf,
    pub logo: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            day_csv: PathBuf::from("main_day_df_data.csv"),
            hour_csv: PathBuf::from("main_hour_df_data.csv"),
            logo: Some(PathBuf::from("logo.png")),
        }
    }
}

impl AppConfig {
    /// Read the config file if present. A missing file means defaults; a
    /// malformed one logs a warning and falls back to defaults too, so a
    /// bad edit never blocks startup.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => config,
                Err(err) => {
                    warn!("ignoring malformed {}: {}", path.display(), err);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}
