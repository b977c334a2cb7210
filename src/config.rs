//! Application Configuration
//!
//! Where the database and logs live, plus store behaviour switches.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};
use crate::store::StoreOptions;

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "GROCERY_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub db_file_name: String,
    /// Defaults to `<data_dir>/logs`
    pub log_dir: Option<PathBuf>,
    pub app_name: String,
    pub allow_empty_names: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("grocery-list");
        Self::in_dir(data_dir)
    }
}

impl AppConfig {
    /// Defaults rooted at `data_dir`
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            db_file_name: "grocery_list.db".to_string(),
            log_dir: None,
            app_name: "GroceryList".to_string(),
            allow_empty_names: true,
        }
    }

    /// Defaults, with the data directory taken from `GROCERY_DATA_DIR` if set
    pub fn from_env() -> Self {
        match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::in_dir(PathBuf::from(dir)),
            _ => Self::default(),
        }
    }

    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> DomainResult<Self> {
        serde_json::from_str(json).map_err(|e| DomainError::serialization("config", e))
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file_name)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("logs"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            allow_empty_names: self.allow_empty_names,
        }
    }
}
