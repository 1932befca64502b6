//! Control Config Validator
//!
//! Schema-driven validation for the JSON documents that configure an
//! industrial controller: device inventories, per-protocol address maps,
//! control-command maps and the controller config itself.
//!
//! ## Features
//!
//! - **Static Schemas**: Device taxonomy, address-map dialects and config
//!   layout are `'static` tables shared across threads
//! - **Classified Findings**: Every check reports errors or warnings into a
//!   [`ValidationResult`] instead of failing
//! - **Dialect Rules**: Range constraints, derived-register expressions and
//!   mandatory registers per protocol
//! - **Cross-File Checks**: Missing referenced files and command tokens that
//!   name no register in the device's address map
//!
//! ## Architecture
//!
//! ```text
//! schema / matcher        value kinds, type descriptors, shape matching
//! result                  findings and the merged result
//! catalog/                devices, address maps, control map, config
//! validators/
//! ├── document            recursive object validation
//! ├── devices             device list
//! ├── address_map         registers + dialect rules
//! ├── control_map         control records + command syntax
//! └── references          cross-file wiring
//! project                 multi-file submission
//! loader / config         filesystem and settings for the CLI
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod loader;
pub mod matcher;
pub mod project;
pub mod result;
pub mod schema;
pub mod validators;

pub use catalog::{DeviceType, Dialect};
pub use config::ValidatorConfig;
pub use error::{Result, ValidatorError};
pub use project::{validate_project, FileReport, FileRole, ProjectFile, ProjectReport};
pub use result::{Finding, Level, Status, ValidationResult};
pub use schema::{FieldSchema, Kind, ObjectSchema, TypeDescriptor};
pub use validators::{
    find_missing_device_references, precharge_contactor_feedback, validate_address_map,
    validate_config, validate_control_map_commands, validate_control_maps, validate_devices,
    validate_document, RegisterIndex,
};
