//! Device inventory validation

use serde_json::Value;
use std::collections::HashSet;

use crate::catalog::DeviceType;
use crate::matcher::render;
use crate::result::ValidationResult;
use crate::schema::Kind;
use crate::validators::document::{check_optional, check_required, record_label};

/// Validate a device list against the device taxonomy.
///
/// Unknown or missing types stop the checks for that device only. Unknown
/// fields are not reported for devices.
pub fn validate_devices(devices: &Value) -> ValidationResult {
    let mut result = ValidationResult::new();

    let Some(devices) = devices.as_array() else {
        result.error(format!("Devices file must be a list, got {}", Kind::of(devices)));
        return result;
    };

    let mut ids = HashSet::new();

    for (idx, item) in devices.iter().enumerate() {
        let device_id = record_label(item, "id", "device", idx);

        let Some(device) = item.as_object() else {
            result.error(format!("Device '{}' must be an object", device_id));
            continue;
        };

        if !ids.insert(device_id.clone()) {
            result.error(format!("Duplicate device id '{}'", device_id));
        }

        let device_type = match device.get("type") {
            None | Some(Value::Null) => {
                result.error(format!("Device '{}' missing 'type'", device_id));
                continue;
            }
            Some(raw) => match raw.as_str().and_then(DeviceType::from_key) {
                Some(t) => t,
                None => {
                    result.error(format!(
                        "Device '{}' has unknown device type '{}'",
                        device_id,
                        render(raw)
                    ));
                    continue;
                }
            },
        };

        let schema = device_type.schema();
        let subject = format!("Device '{}'", device_id);
        result.absorb(check_required(&subject, device, schema.required));
        result.absorb(check_optional(&subject, device, schema.optional));
    }

    result
}
