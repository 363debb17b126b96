use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ServiceError, ServiceResult};

pub const CONFIG_FILENAME: &str = "bookshelf.json";
pub const CONFIG_VERSION: &str = "1.0.0";
/// Upper bound for any configured page size.
pub const PAGE_SIZE_LIMIT: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookshelfConfig {
    pub version: String,
    pub search: SearchPreferences,
    pub popularity: PopularityPreferences,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPreferences {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularityPreferences {
    pub enabled: bool,
    pub counter_key: String,
    pub top_k: usize,
    pub read_timeout_ms: u64,
}

impl PopularityPreferences {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

impl BookshelfConfig {
    pub fn default_new() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            search: SearchPreferences {
                default_page_size: 20,
                max_page_size: 100,
            },
            popularity: PopularityPreferences {
                enabled: true,
                counter_key: "search:query:popular".to_string(),
                top_k: 10,
                read_timeout_ms: 500,
            },
        }
    }
}

impl SearchPreferences {
    /// Checks `1 <= default_page_size <= max_page_size <= PAGE_SIZE_LIMIT`.
    pub fn validate(&self) -> ServiceResult<()> {
        if self.max_page_size < 1 || self.max_page_size > PAGE_SIZE_LIMIT {
            return Err(ServiceError::Internal(format!(
                "max_page_size must be between 1 and {PAGE_SIZE_LIMIT}, got {}",
                self.max_page_size
            )));
        }
        if self.default_page_size < 1 || self.default_page_size > self.max_page_size {
            return Err(ServiceError::Internal(format!(
                "default_page_size must be between 1 and {}, got {}",
                self.max_page_size, self.default_page_size
            )));
        }
        Ok(())
    }
}

impl Default for BookshelfConfig {
    fn default() -> Self {
        Self::default_new()
    }
}

pub fn load_or_create_config(dir: &Path) -> ServiceResult<BookshelfConfig> {
    std::fs::create_dir_all(dir).map_err(|error| {
        ServiceError::Internal(format!(
            "failed to create config directory {}: {error}",
            dir.display()
        ))
    })?;

    let path = config_path(dir);
    if !path.exists() {
        let config = BookshelfConfig::default_new();
        write_config(&path, &config)?;
        return Ok(config);
    }

    let data = std::fs::read_to_string(&path).map_err(|error| {
        ServiceError::Internal(format!(
            "failed to read bookshelf config {}: {error}",
            path.display()
        ))
    })?;
    let config: BookshelfConfig = serde_json::from_str(&data).map_err(|error| {
        ServiceError::Internal(format!(
            "failed to parse bookshelf config {}: {error}",
            path.display()
        ))
    })?;

    if config.version != CONFIG_VERSION {
        return Err(ServiceError::Internal(format!(
            "unsupported bookshelf config version {} (expected {CONFIG_VERSION})",
            config.version
        )));
    }
    config.search.validate().map_err(|error| {
        ServiceError::Internal(format!(
            "invalid bookshelf config {}: {}",
            path.display(),
            error.message()
        ))
    })?;

    Ok(config)
}

pub fn config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILENAME)
}

pub fn write_config(path: &Path, config: &BookshelfConfig) -> ServiceResult<()> {
    let data = serde_json::to_string_pretty(config).map_err(|error| {
        ServiceError::Internal(format!(
            "failed to serialize bookshelf config {}: {error}",
            path.display()
        ))
    })?;
    std::fs::write(path, data).map_err(|error| {
        ServiceError::Internal(format!(
            "failed to write bookshelf config {}: {error}",
            path.display()
        ))
    })?;
    Ok(())
}
