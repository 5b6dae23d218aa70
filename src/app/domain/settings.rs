use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::document::DocumentDefaults;
use super::encoding::{Encoding, LineEnding};
use crate::app::infrastructure::error::AppError;
use crate::app::presentation::{Placement, ViewStyle};
use crate::app::services::session::SessionRestore;
use crate::app::services::syntax::SyntaxFilterSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub view_style: ViewStyle,

    #[serde(default)]
    pub selection_placement: Placement,

    /// Tab size in spaces (default 4)
    #[serde(default = "default_tab_size")]
    pub tab_size: u32,

    #[serde(default = "default_font_name")]
    pub font_name: String,

    #[serde(default = "default_font_size")]
    pub font_size: u32,

    #[serde(default = "LineEnding::system")]
    pub line_terminator: LineEnding,

    #[serde(default)]
    pub default_encoding: Encoding,

    #[serde(default = "default_true")]
    pub file_size_check_enabled: bool,

    /// Files larger than this prompt before being read
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: f32,

    /// Guess a style from the first line of extension-less files
    #[serde(default = "default_true")]
    pub guess_content_type: bool,

    #[serde(default = "default_true")]
    pub ignore_backup_extensions: bool,

    #[serde(default = "default_true")]
    pub check_modified_enabled: bool,

    #[serde(default = "default_check_period_secs")]
    pub check_modified_period_secs: u64,

    /// Serialized syntax filters; empty means built-in defaults
    #[serde(default)]
    pub syntax_filters: String,

    #[serde(default)]
    pub session_restore: SessionRestore,

    /// Directory untitled documents are created in
    #[serde(default)]
    pub default_directory: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_tab_size() -> u32 {
    4
}

fn default_font_name() -> String {
    "Monospaced".to_string()
}

fn default_font_size() -> u32 {
    13
}

fn default_max_file_size_mb() -> f32 {
    10.0
}

fn default_check_period_secs() -> u64 {
    10
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            view_style: ViewStyle::default(),
            selection_placement: Placement::default(),
            tab_size: default_tab_size(),
            font_name: default_font_name(),
            font_size: default_font_size(),
            line_terminator: LineEnding::system(),
            default_encoding: Encoding::default(),
            file_size_check_enabled: true,
            max_file_size_mb: default_max_file_size_mb(),
            guess_content_type: true,
            ignore_backup_extensions: true,
            check_modified_enabled: true,
            check_modified_period_secs: default_check_period_secs(),
            syntax_filters: String::new(),
            session_restore: SessionRestore::default(),
            default_directory: None,
        }
    }
}

impl AppSettings {
    /// Defaults handed to every new document.
    pub fn document_defaults(&self) -> DocumentDefaults {
        DocumentDefaults {
            tab_size: self.tab_size,
            font_name: self.font_name.clone(),
            font_size: self.font_size,
            line_ending: self.line_terminator,
            encoding: self.default_encoding,
        }
    }

    /// Threshold in bytes above which opening asks for confirmation.
    pub fn max_file_size_bytes(&self) -> u64 {
        (self.max_file_size_mb.max(0.0) as f64 * 1024.0 * 1024.0) as u64
    }

    /// Directory for untitled documents: configured, else home, else cwd.
    pub fn untitled_directory(&self) -> PathBuf {
        self.default_directory
            .clone()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// The configured filters, falling back to defaults when empty or invalid.
    pub fn syntax_filter_set(&self) -> SyntaxFilterSet {
        if self.syntax_filters.trim().is_empty() {
            return SyntaxFilterSet::default();
        }
        match SyntaxFilterSet::parse(&self.syntax_filters) {
            Ok(set) => set,
            Err(e) => {
                tracing::warn!("Ignoring saved syntax filters: {}", e);
                SyntaxFilterSet::default()
            }
        }
    }

    /// Load settings from disk, or create default if not exists
    pub fn load() -> Self {
        let config_path = Self::get_config_path();
        let loaded = Self::load_from(&config_path);
        if !config_path.exists() {
            // Try to save defaults for next time
            let _ = loaded.save();
        }
        loaded
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!("Failed to parse settings: {}. Using defaults.", e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), AppError> {
        self.save_to(&Self::get_config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), AppError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::Settings(format!("Failed to create config dir: {}", e)))?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .map_err(|e| AppError::Settings(format!("Failed to write settings: {}", e)))?;

        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("deskpad");
        path.push("settings.json");
        path
    }
}
