//! Static schema catalog
//!
//! Read-only tables for every document role: the device taxonomy, the
//! address-map dialects, the control-map record and the controller config.
//! All of it is `'static` constant data, safe to share between threads.

pub mod address_maps;
pub mod config;
pub mod control_map;
pub mod devices;

pub use address_maps::{Dialect, RequiredRegister};
pub use config::CONFIG_SCHEMA;
pub use control_map::CONTROL_MAP_SCHEMA;
pub use devices::DeviceType;
