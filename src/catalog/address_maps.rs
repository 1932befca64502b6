//! Address-map dialects

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::schema::{
    leaf, Constraint, Field, Kind, ObjectSchema, TypeDescriptor, BOOL, INT, NUMBER, OBJECT, STRING,
};

const DATATYPE: TypeDescriptor = TypeDescriptor::OneOfStrings(&[
    "int8", "uint8", "int16", "uint16", "int32", "uint32", "float32", "int64", "uint64", "float64",
    "string32",
]);
const FUNCTION_CODE: TypeDescriptor = TypeDescriptor::OneOfNumbers(&[1, 2, 3, 4, 5, 6, 15, 16]);
const DIRECTION: TypeDescriptor = TypeDescriptor::OneOfStrings(&["input", "output"]);
const ORDER: TypeDescriptor = TypeDescriptor::OneOfStrings(&["big", "little"]);
const SCALING: TypeDescriptor = TypeDescriptor::AnyOf(&[Kind::Int, Kind::Float, Kind::String]);

const MODBUS_REQUIRED: &[Field] = &[
    leaf("address", INT),
    leaf("numberOfRegisters", INT),
    leaf("name", STRING),
    leaf("datatype", DATATYPE),
    leaf("functionCode", FUNCTION_CODE),
];

const MODBUS_OPTIONAL: &[Field] = &[
    leaf("scaling", SCALING),
    leaf("offset", NUMBER),
    leaf("direction", DIRECTION),
    leaf("minimum", NUMBER),
    leaf("maximum", NUMBER),
    leaf("map", OBJECT),
    leaf("multiRead", BOOL),
    leaf("wordOrder", ORDER),
    leaf("byteOrder", ORDER),
    leaf("notes", STRING),
];

const CANBUS_REQUIRED: &[Field] = &[
    leaf("canId", INT),
    leaf("name", STRING),
    leaf("startByte", INT),
    leaf("startBit", INT),
    leaf("bitLength", INT),
    leaf("datatype", DATATYPE),
];

const CANBUS_OPTIONAL: &[Field] = &[
    leaf("scaling", SCALING),
    leaf("offset", NUMBER),
    leaf("direction", DIRECTION),
    leaf("minimum", NUMBER),
    leaf("maximum", NUMBER),
    leaf("map", OBJECT),
    leaf("byteOrder", ORDER),
    leaf("notes", STRING),
];

const CANBUS_CONSTRAINTS: &[Constraint] = &[
    Constraint { field: "startByte", min: 0, max: 7 },
    Constraint { field: "startBit", min: 0, max: 7 },
    Constraint { field: "bitLength", min: 1, max: 64 },
];

const MQTT_REQUIRED: &[Field] = &[
    leaf("name", STRING),
    leaf("key", STRING),
    leaf("pathToReadings", STRING),
    leaf("pathToKey", STRING),
    leaf("pathToValue", STRING),
    leaf("valueIncludesUnit", BOOL),
];

const IO_REQUIRED: &[Field] = &[
    leaf("name", STRING),
    leaf("address", INT),
    leaf("type", DIRECTION),
];

const DIGITAL_IO_OPTIONAL: &[Field] = &[leaf("invert", BOOL), leaf("notes", STRING)];

const ANALOG_IO_OPTIONAL: &[Field] = &[
    leaf("scaling", NUMBER),
    leaf("offset", NUMBER),
    leaf("notes", STRING),
];

static MODBUS: ObjectSchema = ObjectSchema::new(MODBUS_REQUIRED, MODBUS_OPTIONAL);
static CANBUS: ObjectSchema =
    ObjectSchema::new(CANBUS_REQUIRED, CANBUS_OPTIONAL).with_constraints(CANBUS_CONSTRAINTS);
static MQTT: ObjectSchema = ObjectSchema::new(MQTT_REQUIRED, &[]);
static DIGITAL_IO: ObjectSchema = ObjectSchema::new(IO_REQUIRED, DIGITAL_IO_OPTIONAL);
static ANALOG_IO: ObjectSchema = ObjectSchema::new(IO_REQUIRED, ANALOG_IO_OPTIONAL);

/// Derived registers carry only an expression
pub const EXPRESSION_FIELD: Field = leaf("expression", STRING);

/// Register that must exist in a map, with one field pinned to a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredRegister {
    pub name: &'static str,
    pub field: &'static str,
    pub expected: &'static str,
}

const fn pinned(name: &'static str, expected: &'static str) -> RequiredRegister {
    RequiredRegister {
        name,
        field: "type",
        expected,
    }
}

const PRECHARGE_CONTROL: &[RequiredRegister] = &[
    pinned("control.contactor.main", "output"),
    pinned("control.contactor.auxiliary", "output"),
];

const PRECHARGE_FEEDBACK: &[RequiredRegister] = &[
    pinned("measure.contactor.main", "input"),
    pinned("measure.contactor.auxiliary", "input"),
];

const BREAKER_REGISTERS: &[RequiredRegister] = &[pinned("measure.breaker", "input")];

const CONTACTOR_REGISTERS: &[RequiredRegister] = &[pinned("measure.contactor", "input")];

/// Modbus maps must expose a liveness register under this name
pub const COMMUNICATION_CHECK: &str = "communicationCheck";

/// Address-map protocol dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    #[serde(rename = "Modbus TCP/IP")]
    ModbusTcpIp,
    #[serde(rename = "CANbus")]
    Canbus,
    #[serde(rename = "MQTT")]
    Mqtt,
    #[serde(rename = "Digital I/O")]
    DigitalIo,
    Precharge,
    Breaker,
    Contactor,
    #[serde(rename = "Analog I/O")]
    AnalogIo,
}

impl Dialect {
    pub const ALL: [Dialect; 8] = [
        Dialect::ModbusTcpIp,
        Dialect::Canbus,
        Dialect::Mqtt,
        Dialect::DigitalIo,
        Dialect::Precharge,
        Dialect::Breaker,
        Dialect::Contactor,
        Dialect::AnalogIo,
    ];

    /// The map-type key as it appears in project files and on the CLI
    pub fn key(&self) -> &'static str {
        match self {
            Dialect::ModbusTcpIp => "Modbus TCP/IP",
            Dialect::Canbus => "CANbus",
            Dialect::Mqtt => "MQTT",
            Dialect::DigitalIo => "Digital I/O",
            Dialect::Precharge => "Precharge",
            Dialect::Breaker => "Breaker",
            Dialect::Contactor => "Contactor",
            Dialect::AnalogIo => "Analog I/O",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.key() == key)
    }

    pub fn schema(&self) -> &'static ObjectSchema {
        match self {
            Dialect::ModbusTcpIp => &MODBUS,
            Dialect::Canbus => &CANBUS,
            Dialect::Mqtt => &MQTT,
            Dialect::DigitalIo | Dialect::Precharge | Dialect::Breaker | Dialect::Contactor => {
                &DIGITAL_IO
            }
            Dialect::AnalogIo => &ANALOG_IO,
        }
    }

    /// Registers this dialect needs by name. Precharge maps also need the
    /// contactor measurement registers when the device reports feedback.
    pub fn required_registers(&self, contactor_feedback: bool) -> Vec<RequiredRegister> {
        match self {
            Dialect::Precharge if contactor_feedback => {
                [PRECHARGE_CONTROL, PRECHARGE_FEEDBACK].concat()
            }
            Dialect::Precharge => PRECHARGE_CONTROL.to_vec(),
            Dialect::Breaker => BREAKER_REGISTERS.to_vec(),
            Dialect::Contactor => CONTACTOR_REGISTERS.to_vec(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
