//! Device taxonomy

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::schema::{leaf, Field, ObjectSchema, TypeDescriptor, BOOL, INT, STRING};

const PROTOCOL: TypeDescriptor = TypeDescriptor::OneOfStrings(&["Modbus TCP/IP", "MQTT", "CANbus"]);

const COMMON: &[Field] = &[
    leaf("id", STRING),
    leaf("type", STRING),
    leaf("addressMap", STRING),
    leaf("disabled", BOOL),
];

const COMMON_WITH_PROTOCOL: &[Field] = &[
    leaf("id", STRING),
    leaf("type", STRING),
    leaf("addressMap", STRING),
    leaf("disabled", BOOL),
    leaf("protocol", PROTOCOL),
];

const PRECHARGE_REQUIRED: &[Field] = &[
    leaf("id", STRING),
    leaf("type", STRING),
    leaf("addressMap", STRING),
    leaf("disabled", BOOL),
    leaf("prechargePeriodInSeconds", INT),
    leaf("holdonTimeAuxiliaryContactorInSeconds", INT),
    leaf("tresholdVoltage", INT),
];

const DIGITAL_IO_OPTIONAL: &[Field] = &[leaf("retainInputs", BOOL), leaf("controlMap", STRING)];

const INDICATORS_OPTIONAL: &[Field] = &[leaf("controlMap", STRING)];

const PRECHARGE_OPTIONAL: &[Field] = &[
    leaf("contactorFeedback", BOOL),
    leaf("breakerFeedback", BOOL),
    leaf("maximumVoltage", INT),
    leaf("analogMeasurementAddressMap", STRING),
];

static PROTOCOL_DEVICE: ObjectSchema = ObjectSchema::new(COMMON_WITH_PROTOCOL, &[]);
static DIGITAL_IO_DEVICE: ObjectSchema = ObjectSchema::new(COMMON, DIGITAL_IO_OPTIONAL);
static ANALOG_IO_DEVICE: ObjectSchema = ObjectSchema::new(COMMON, &[]);
static INDICATORS_DEVICE: ObjectSchema = ObjectSchema::new(COMMON, INDICATORS_OPTIONAL);
static RESET_DEVICE: ObjectSchema = ObjectSchema::new(COMMON, &[]);
static PRECHARGE_DEVICE: ObjectSchema = ObjectSchema::new(PRECHARGE_REQUIRED, PRECHARGE_OPTIONAL);

/// Known device types, keyed by the `type` discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeviceType {
    Converter,
    Battery,
    Other,
    DigitalInputOutput,
    AnalogInputOutput,
    Indicators,
    Reset,
    Precharge,
    Breaker,
    Contactor,
}

impl DeviceType {
    pub const ALL: [DeviceType; 10] = [
        DeviceType::Converter,
        DeviceType::Battery,
        DeviceType::Other,
        DeviceType::DigitalInputOutput,
        DeviceType::AnalogInputOutput,
        DeviceType::Indicators,
        DeviceType::Reset,
        DeviceType::Precharge,
        DeviceType::Breaker,
        DeviceType::Contactor,
    ];

    /// The discriminator string used in device documents
    pub fn key(&self) -> &'static str {
        match self {
            DeviceType::Converter => "converter",
            DeviceType::Battery => "battery",
            DeviceType::Other => "other",
            DeviceType::DigitalInputOutput => "digitalInputOutput",
            DeviceType::AnalogInputOutput => "analogInputOutput",
            DeviceType::Indicators => "indicators",
            DeviceType::Reset => "reset",
            DeviceType::Precharge => "precharge",
            DeviceType::Breaker => "breaker",
            DeviceType::Contactor => "contactor",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.key() == key)
    }

    pub fn schema(&self) -> &'static ObjectSchema {
        match self {
            DeviceType::Converter | DeviceType::Battery | DeviceType::Other => &PROTOCOL_DEVICE,
            DeviceType::DigitalInputOutput | DeviceType::Breaker | DeviceType::Contactor => {
                &DIGITAL_IO_DEVICE
            }
            DeviceType::AnalogInputOutput => &ANALOG_IO_DEVICE,
            DeviceType::Indicators => &INDICATORS_DEVICE,
            DeviceType::Reset => &RESET_DEVICE,
            DeviceType::Precharge => &PRECHARGE_DEVICE,
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_roundtrip() {
        for t in DeviceType::ALL {
            assert_eq!(DeviceType::from_key(t.key()), Some(t));
        }
        assert_eq!(DeviceType::from_key("bogus"), None);
        assert_eq!(DeviceType::from_key("Converter"), None);
    }

    #[test]
    fn test_protocol_only_for_protocol_devices() {
        assert!(DeviceType::Battery.schema().required.iter().any(|f| f.name == "protocol"));
        assert!(!DeviceType::Reset.schema().declares("protocol"));
        assert!(DeviceType::Precharge.schema().declares("contactorFeedback"));
    }
}
