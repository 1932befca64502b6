//! Configuration management for the validator
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (validator.toml)
//! - Environment variables (VALIDATOR__*)
//!
//! ## Example config file (validator.toml):
//! ```toml
//! [output]
//! format = "text"
//! show_warnings = true
//!
//! [validation]
//! fail_on_warnings = false
//!
//! [project]
//! default_map_type = "Modbus TCP/IP"
//!
//! [project.files."pcs_address_map.json"]
//! role = "address_map"
//! map_type = "CANbus"
//!
//! [project.files."breaker_io.json"]
//! role = "address_map"
//! map_type = "Breaker"
//! ```

use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::catalog::Dialect;
use crate::error::Result;
use crate::project::FileRole;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Exit-code policy
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Project file classification
    #[serde(default)]
    pub project: ProjectConfig,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Report format
    #[serde(default)]
    pub format: OutputFormat,

    /// Print warnings, not only errors
    #[serde(default = "default_true")]
    pub show_warnings: bool,
}

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Validation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Treat warnings as failure for the exit code
    #[serde(default)]
    pub fail_on_warnings: bool,
}

/// Project configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Dialect assumed for files guessed to be address maps
    #[serde(default = "default_map_type")]
    pub default_map_type: Dialect,

    /// Explicit roles by file name, overriding the name-based guess
    #[serde(default)]
    pub files: BTreeMap<String, FileRole>,
}

fn default_true() -> bool {
    true
}

fn default_map_type() -> Dialect {
    Dialect::ModbusTcpIp
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            show_warnings: true,
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            default_map_type: default_map_type(),
            files: BTreeMap::new(),
        }
    }
}

impl ProjectConfig {
    /// Role for `file_name`: an explicit override, else a guess from the name
    pub fn role_for(&self, file_name: &str) -> FileRole {
        self.files
            .get(file_name)
            .cloned()
            .unwrap_or_else(|| FileRole::guess_with_default(file_name, self.default_map_type))
    }
}

impl ValidatorConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, layering an explicit file over the defaults
    pub fn load_from(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_locations = ["validator.toml", ".validator.toml", "config/validator.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "controlsystems", "config-validator") {
            let xdg_config = config_dir.config_dir().join("validator.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        // Load from environment variables (VALIDATOR__OUTPUT__FORMAT=json)
        builder = builder.add_source(
            Environment::with_prefix("VALIDATOR")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
