//! Document validators
//!
//! One validator per document role plus the cross-file reference checks.
//! Every entry point is a pure function returning a [`ValidationResult`];
//! nothing here panics on malformed input or performs I/O.
//!
//! [`ValidationResult`]: crate::result::ValidationResult

pub mod address_map;
pub mod commands;
pub mod config;
pub mod control_map;
pub mod devices;
pub mod document;
pub mod references;
pub mod registers;

pub use address_map::{precharge_contactor_feedback, validate_address_map};
pub use config::validate_config;
pub use control_map::validate_control_maps;
pub use devices::validate_devices;
pub use document::validate_document;
pub use references::{find_missing_device_references, validate_control_map_commands};
pub use registers::{validate_required_registers, RegisterIndex};
