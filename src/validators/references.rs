//! Cross-file reference checks
//!
//! Both checks read already-parsed documents only. A device pointing at a
//! file that was not submitted is an error; a command naming a register the
//! address map does not define is a warning, since the wiring may simply be
//! incomplete.

use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

use crate::result::ValidationResult;
use crate::validators::commands;
use crate::validators::control_map::control_records;
use crate::validators::document::record_label;
use crate::validators::registers::RegisterIndex;

fn strip_json_suffix(file: &str) -> &str {
    let file = file.rsplit(['/', '\\']).next().unwrap_or(file);
    if file.len() >= 5 && file.is_char_boundary(file.len() - 5) && file[file.len() - 5..].eq_ignore_ascii_case(".json") {
        &file[..file.len() - 5]
    } else {
        file
    }
}

fn non_blank(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.trim().is_empty())
}

/// Every `addressMap` (and non-blank `controlMap`) a device names must be
/// among the submitted files as `<name>.json`.
pub fn find_missing_device_references(devices: &Value, available_files: &BTreeSet<String>) -> ValidationResult {
    let mut result = ValidationResult::new();

    let Some(devices) = devices.as_array() else {
        return result;
    };

    for (idx, item) in devices.iter().enumerate() {
        let Some(device) = item.as_object() else {
            continue;
        };
        let device_id = record_label(item, "id", "device", idx);

        if let Some(address_map) = device.get("addressMap").and_then(Value::as_str) {
            if !available_files.contains(&format!("{}.json", address_map)) {
                result.error(format!(
                    "Device '{}' references missing address map file '{}.json'",
                    device_id, address_map
                ));
            }
        }

        if let Some(control_map) = non_blank(device.get("controlMap")) {
            if !available_files.contains(&format!("{}.json", control_map)) {
                result.error(format!(
                    "Device '{}' references missing control map file '{}.json'",
                    device_id, control_map
                ));
            }
        }
    }

    result
}

/// Check that every command token in `control_map` names a register in the
/// address map of each device wired to this control map.
pub fn validate_control_map_commands(
    control_map_file: &str,
    control_map: &Value,
    devices: &Value,
    address_maps_by_file: &BTreeMap<String, Value>,
) -> ValidationResult {
    let mut result = ValidationResult::new();

    let (Some(devices), Some(records)) = (devices.as_array(), control_records(control_map)) else {
        return result;
    };

    let control_map_ref = strip_json_suffix(control_map_file);

    for (d_idx, item) in devices.iter().enumerate() {
        let Some(device) = item.as_object() else {
            continue;
        };
        if non_blank(device.get("controlMap")) != Some(control_map_ref) {
            continue;
        }
        let Some(address_map_ref) = non_blank(device.get("addressMap")) else {
            continue;
        };
        let Some(address_map) = address_maps_by_file.get(&format!("{}.json", address_map_ref)) else {
            continue;
        };

        let device_id = record_label(item, "id", "device", d_idx);
        let index = RegisterIndex::build(address_map);

        for (cm_idx, record) in records.iter().enumerate() {
            let Some(commands) = non_blank(record.get("commands")) else {
                continue;
            };
            let cm_name = record_label(record, "name", "register", cm_idx);

            for token in commands::tokens(commands) {
                let Some(base) = commands::base_name(token) else {
                    continue;
                };
                if !index.contains(base) {
                    result.warning(format!(
                        "Device '{}' control register '{}' references command '{}' which is missing from address map '{}'",
                        device_id, cm_name, base, address_map_ref
                    ));
                }
            }
        }
    }

    result
}
