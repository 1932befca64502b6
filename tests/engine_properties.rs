//! Engine Behaviour Tests
//!
//! Documented behaviours of the single-document validators and the
//! cross-file resolver.

use std::collections::BTreeMap;

use control_config_validator::{
    validate_address_map, validate_config, validate_control_map_commands, validate_control_maps,
    validate_devices, Level, ValidationResult,
};
use serde_json::json;

fn has_error_containing(result: &ValidationResult, needle: &str) -> bool {
    result.errors().any(|m| m.message.contains(needle))
}

fn flags_consistent(result: &ValidationResult) -> bool {
    result.has_errors() == result.messages().iter().any(|m| m.level == Level::Error)
        && result.has_warnings() == result.messages().iter().any(|m| m.level == Level::Warning)
}

#[test]
fn test_unknown_device_type() {
    let result = validate_devices(&json!([{"id": "d1", "type": "bogus"}]));
    assert_eq!(result.errors().count(), 1);
    assert_eq!(result.warnings().count(), 0);
    assert!(has_error_containing(&result, "unknown device type"));
    assert!(result.has_errors());
}

#[test]
fn test_duplicate_device_id() {
    let result = validate_devices(&json!([
        {"id": "d1", "type": "reset"},
        {"id": "d1", "type": "reset"}
    ]));
    assert!(has_error_containing(&result, "Duplicate device id 'd1'"));
}

#[test]
fn test_canbus_start_byte_range() {
    let result = validate_address_map(
        &json!([{"canId": 1, "name": "x", "startByte": 9, "startBit": 0, "bitLength": 8, "datatype": "int8"}]),
        "CANbus",
        false,
    );
    assert!(has_error_containing(&result, "'startByte' must be between 0 and 7"));
}

#[test]
fn test_modbus_communication_check_required() {
    let result = validate_address_map(
        &json!([{"name": "power", "address": 1, "numberOfRegisters": 2, "datatype": "float32", "functionCode": 4}]),
        "Modbus TCP/IP",
        false,
    );
    assert_eq!(result.errors().count(), 1);
    assert!(has_error_containing(&result, "communicationCheck"));
}

#[test]
fn test_control_commands() {
    let ok = validate_control_maps(&json!({"name": "c1", "commands": "motor.start? | relay1=1"}));
    assert!(!ok.has_errors());

    let bad = validate_control_maps(&json!({"name": "c2", "commands": "motor.start?=1"}));
    assert!(bad.has_errors());
    assert!(has_error_containing(&bad, "motor.start?=1"));
}

#[test]
fn test_dangling_command_single_warning() {
    let devices = json!([{"id": "pcs1", "addressMap": "pcs_map", "controlMap": "pcs_control"}]);
    let mut maps = BTreeMap::new();
    maps.insert("pcs_map.json".to_string(), json!([{"name": "relay1"}]));
    let control = json!([{"name": "trip", "commands": "relay1=0 | relay9=0"}]);

    let result = validate_control_map_commands("pcs_control.json", &control, &devices, &maps);
    assert_eq!(result.len(), 1);
    assert_eq!(result.warnings().count(), 1);
    assert!(!result.has_errors());
    assert!(result.messages()[0].message.contains("relay9"));
}

#[test]
fn test_expression_missing_reference() {
    let result = validate_address_map(
        &json!([
            {"name": "a", "address": 0, "type": "input"},
            {"name": "calc", "expression": "{a}+{b}"}
        ]),
        "Digital I/O",
        false,
    );
    assert_eq!(result.errors().count(), 1);
    assert!(has_error_containing(&result, "references missing registers: b"));
}

#[test]
fn test_validation_is_deterministic() {
    let config = json!({"plcnext": {"x": 1, "b": 2, "a": 3}, "extra": [], "mqtt": 1});
    assert_eq!(validate_config(&config), validate_config(&config));

    let devices = json!([{"id": 1, "type": "precharge"}, {"type": "battery", "protocol": 3}]);
    assert_eq!(validate_devices(&devices), validate_devices(&devices));
}

#[test]
fn test_flags_match_messages() {
    let results = [
        validate_config(&json!({"plcnext": {"ipAddress": 1, "junk": 0}})),
        validate_devices(&json!([{"id": "x", "type": "battery"}])),
        validate_control_maps(&json!([{"name": "c", "commands": "a? | b", "z": 1}])),
        validate_address_map(&json!([{"name": "m", "expression": "{n}"}]), "MQTT", false),
    ];
    for result in &results {
        assert!(flags_consistent(result), "{:?}", result);
    }
    let merged = ValidationResult::merge(results.iter().cloned());
    assert!(flags_consistent(&merged));
    assert_eq!(merged.len(), results.iter().map(|r| r.len()).sum::<usize>());
}
