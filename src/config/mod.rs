//! Configuration module for qqwry-rs
//!
//! Handles loading and managing configuration from YAML files and environment variables.

use crate::error::{QQwryError, Result};
use crate::utils::path;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub global: GlobalConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database file name inside the data directory
    #[serde(default = "default_database_file")]
    pub file: String,

    /// Custom database path, takes precedence over `file`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub enable_colors: bool,

    /// Output in JSON format
    #[serde(default)]
    pub json: bool,

    /// Target file for `--dump`
    #[serde(default = "default_dump_file")]
    pub dump_file: String,
}

/// Global configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Verbose logging
    #[serde(default)]
    pub verbose: bool,

    /// Suppress the version banner
    #[serde(default)]
    pub quiet: bool,
}

// Default value functions
fn default_database_file() -> String {
    "qqwry.dat".to_string()
}

fn default_dump_file() -> String {
    "ip.txt".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            file: default_database_file(),
            path: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            enable_colors: true,
            json: false,
            dump_file: default_dump_file(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from(&path::config_file()?)
    }

    /// Load `config_file`, writing the defaults there if it does not exist
    ///
    /// Environment overrides apply to the returned value only, never to the
    /// file.
    pub fn load_from(config_file: &Path) -> Result<Self> {
        let mut config = if config_file.exists() {
            Self::from_file(config_file)?
        } else {
            // Create default config
            let config = Self::default();
            config.save(config_file)?;
            config
        };

        // Override with environment variables
        config.apply_env();

        Ok(config)
    }

    /// Parse a configuration file without touching the environment
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| QQwryError::config(format!("Failed to read config file: {}", e)))?;

        serde_yaml::from_str(&content)
            .map_err(|e| QQwryError::YamlError(format!("Failed to parse config file: {}", e)))
    }

    /// Apply environment variable overrides
    pub fn apply_env(&mut self) {
        if let Ok(val) = env::var("QQWRY_DB_PATH") {
            self.database.path = Some(val);
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| QQwryError::config(format!("Failed to create config directory: {}", e)))?;
        }

        let yaml = serde_yaml::to_string(self)
            .map_err(|e| QQwryError::YamlError(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, yaml)
            .map_err(|e| QQwryError::config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Resolve the database file path
    pub fn get_database_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.database.path {
            return Ok(path::expand_tilde(custom_path));
        }

        path::database_file(&self.database.file)
    }
}
