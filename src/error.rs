//! Error types for loading and configuration
//!
//! Validation itself never fails; it reports findings. These errors cover
//! the shell around it: reading files, settings, and command-line input.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for loader and configuration operations
pub type Result<T> = std::result::Result<T, ValidatorError>;

#[derive(Error, Debug)]
pub enum ValidatorError {
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid file role: {0} (expected config, devices, control-map or address-map[:<map type>])")]
    InvalidRole(String),

    #[error("Unknown map type: {0}")]
    UnknownMapType(String),

    #[error("Invalid assignment '{0}', expected <file>=<role>")]
    InvalidAssignment(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}
