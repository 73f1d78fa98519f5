use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DATA_DIR_NAME: &str = "data";

/// Stores user-configurable tracker preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Where the transaction and category files live. Defaults to `<app dir>/data`.
    pub data_dir: Option<PathBuf>,
    /// Install demo transactions and default categories when nothing is saved yet.
    #[serde(default = "Config::default_seed_demo_data")]
    pub seed_demo_data: bool,
    #[serde(default = "Config::default_notice_duration_ms")]
    pub notice_duration_ms: u64,
    /// Sort token applied by `list` when none is given.
    #[serde(default = "Config::default_sort_value")]
    pub default_sort: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            seed_demo_data: Self::default_seed_demo_data(),
            notice_duration_ms: Self::default_notice_duration_ms(),
            default_sort: Self::default_sort_value(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            export_dir: None,
        }
    }
}

impl Config {
    fn default_seed_demo_data() -> bool {
        true
    }

    fn default_notice_duration_ms() -> u64 {
        2000
    }

    fn default_sort_value() -> String {
        "date-desc".into()
    }

    fn default_ui_color_enabled() -> bool {
        true
    }

    /// Resolves the data directory against the application base directory.
    pub fn resolve_data_dir(&self, app_dir: &Path) -> PathBuf {
        match &self.data_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => app_dir.join(dir),
            None => app_dir.join(DATA_DIR_NAME),
        }
    }

    /// Export directory, falling back to the current directory.
    pub fn resolve_export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
