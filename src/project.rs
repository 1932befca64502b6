//! Multi-file project validation
//!
//! A project is a set of already-parsed documents keyed by basename, each
//! classified by role. Every file gets its own result; project-level checks
//! (exactly one devices file, exactly one config file) go into a separate
//! result. Cross-file checks always see the full submission, so the order
//! files arrive in does not matter.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

use crate::catalog::Dialect;
use crate::error::ValidatorError;
use crate::result::{Status, ValidationResult};
use crate::validators::{
    find_missing_device_references, precharge_contactor_feedback, validate_address_map,
    validate_config, validate_control_map_commands, validate_control_maps, validate_devices,
};

/// What a submitted file is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum FileRole {
    Config,
    Devices,
    AddressMap { map_type: String },
    ControlMap,
}

impl FileRole {
    pub fn address_map(dialect: Dialect) -> Self {
        FileRole::AddressMap {
            map_type: dialect.key().to_string(),
        }
    }

    /// Role suggested by a file name, falling back to a Modbus address map
    pub fn guess(file_name: &str) -> Self {
        Self::guess_with_default(file_name, Dialect::ModbusTcpIp)
    }

    pub fn guess_with_default(file_name: &str, default_map_type: Dialect) -> Self {
        match file_name {
            "config.json" => FileRole::Config,
            "devices.json" => FileRole::Devices,
            name if name.contains("control") => FileRole::ControlMap,
            _ => FileRole::address_map(default_map_type),
        }
    }

    /// Parse `config`, `devices`, `control-map`, `address-map` or
    /// `address-map:<map type>`. A bare `address-map` uses `default_map_type`.
    pub fn parse_with_default(s: &str, default_map_type: Dialect) -> Result<Self, ValidatorError> {
        let (kind, map_type) = match s.split_once(':') {
            Some((kind, map_type)) => (kind.trim(), Some(map_type.trim())),
            None => (s.trim(), None),
        };
        let normalized = kind.to_ascii_lowercase().replace(['_', ' '], "-");

        match (normalized.as_str(), map_type) {
            ("config", None) => Ok(FileRole::Config),
            ("devices", None) => Ok(FileRole::Devices),
            ("control-map", None) => Ok(FileRole::ControlMap),
            ("address-map", None) => Ok(FileRole::address_map(default_map_type)),
            ("address-map", Some(map_type)) => Dialect::from_key(map_type)
                .map(FileRole::address_map)
                .ok_or_else(|| ValidatorError::UnknownMapType(map_type.to_string())),
            _ => Err(ValidatorError::InvalidRole(s.to_string())),
        }
    }
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileRole::Config => write!(f, "config"),
            FileRole::Devices => write!(f, "devices"),
            FileRole::AddressMap { map_type } => write!(f, "address-map:{}", map_type),
            FileRole::ControlMap => write!(f, "control-map"),
        }
    }
}

/// Same as [`FileRole::parse_with_default`] with Modbus TCP/IP as the default
impl FromStr for FileRole {
    type Err = ValidatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with_default(s, Dialect::ModbusTcpIp)
    }
}

/// One submitted file. Parsing happens outside the engine; a document that
/// failed to parse carries the parser's reason instead.
#[derive(Debug, Clone)]
pub struct ProjectFile {
    pub name: String,
    pub role: FileRole,
    pub document: Result<Value, String>,
}

impl ProjectFile {
    pub fn new(name: impl Into<String>, role: FileRole, document: Value) -> Self {
        Self {
            name: name.into(),
            role,
            document: Ok(document),
        }
    }

    pub fn unparsed(name: impl Into<String>, role: FileRole, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role,
            document: Err(reason.into()),
        }
    }
}

/// Result for one submitted file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub name: String,
    pub role: FileRole,
    pub result: ValidationResult,
}

/// Results for a whole submission
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectReport {
    /// Findings about the submission as a whole
    pub project: ValidationResult,
    pub files: Vec<FileReport>,
}

impl ProjectReport {
    /// Every finding, project-level first, then file by file
    pub fn summary(&self) -> ValidationResult {
        std::iter::once(self.project.clone())
            .chain(self.files.iter().map(|f| f.result.clone()))
            .collect()
    }

    pub fn status(&self) -> Status {
        self.summary().status()
    }

    pub fn file(&self, name: &str) -> Option<&FileReport> {
        self.files.iter().find(|f| f.name == name)
    }
}

fn check_single(result: &mut ValidationResult, count: usize, what: &str) {
    match count {
        0 => result.error(format!("No {} file selected", what)),
        1 => {}
        _ => result.error(format!("Multiple {} files selected", what)),
    }
}

/// Validate every file of a project plus the cross-file wiring
pub fn validate_project(files: &[ProjectFile]) -> ProjectReport {
    let mut project = ValidationResult::new();

    let count = |role: &FileRole| files.iter().filter(|f| &f.role == role).count();
    check_single(&mut project, count(&FileRole::Devices), "devices");
    check_single(&mut project, count(&FileRole::Config), "config");

    let mut available_files: BTreeSet<String> = BTreeSet::new();
    let mut reported: BTreeSet<&str> = BTreeSet::new();
    for file in files {
        if !available_files.insert(file.name.clone()) && reported.insert(&file.name) {
            project.error(format!("Multiple files named '{}' selected", file.name));
        }
    }

    let mut devices_payload: Option<&Value> = None;
    let mut address_maps_by_file: BTreeMap<String, Value> = BTreeMap::new();
    for file in files {
        let Ok(document) = &file.document else {
            continue;
        };
        match file.role {
            FileRole::Devices => devices_payload = Some(document),
            FileRole::AddressMap { .. } => {
                address_maps_by_file.insert(file.name.clone(), document.clone());
            }
            _ => {}
        }
    }

    let no_devices = Value::Null;
    let devices = devices_payload.unwrap_or(&no_devices);

    let reports = files
        .iter()
        .map(|file| {
            let result = match &file.document {
                Err(reason) => {
                    let mut result = ValidationResult::new();
                    result.error(format!("Invalid JSON: {}", reason));
                    result
                }
                Ok(document) => match &file.role {
                    FileRole::Devices => ValidationResult::merge([
                        validate_devices(document),
                        find_missing_device_references(document, &available_files),
                    ]),
                    FileRole::Config => validate_config(document),
                    FileRole::ControlMap => ValidationResult::merge([
                        validate_control_maps(document),
                        validate_control_map_commands(&file.name, document, devices, &address_maps_by_file),
                    ]),
                    FileRole::AddressMap { map_type } => {
                        let feedback = map_type == Dialect::Precharge.key()
                            && precharge_contactor_feedback(devices, &file.name);
                        validate_address_map(document, map_type, feedback)
                    }
                },
            };

            debug!(
                file = %file.name,
                role = %file.role,
                findings = result.len(),
                status = %result.status(),
                "validated file"
            );

            FileReport {
                name: file.name.clone(),
                role: file.role.clone(),
                result,
            }
        })
        .collect();

    let report = ProjectReport {
        project,
        files: reports,
    };
    info!(files = files.len(), status = %report.status(), "project validated");
    report
}
