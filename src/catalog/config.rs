//! Controller configuration schema

use crate::schema::{leaf, object, Field, ObjectSchema, INT, STRING};

const PLCNEXT_REQUIRED: &[Field] = &[leaf("ipAddress", STRING)];
const PLCNEXT_OPTIONAL: &[Field] = &[leaf("username", STRING), leaf("password", STRING)];
const PLCNEXT: ObjectSchema = ObjectSchema::new(PLCNEXT_REQUIRED, PLCNEXT_OPTIONAL);

const BROKER_REQUIRED: &[Field] = &[leaf("ipAddress", STRING)];
const BROKER_OPTIONAL: &[Field] = &[leaf("port", INT)];
const MQTT_BROKER: ObjectSchema = ObjectSchema::new(BROKER_REQUIRED, BROKER_OPTIONAL);

const MQTT_REQUIRED: &[Field] = &[object("broker", &MQTT_BROKER)];
const MQTT: ObjectSchema = ObjectSchema::new(MQTT_REQUIRED, &[]);

const TELEGRAM_REQUIRED: &[Field] = &[leaf("chatId", STRING), leaf("botToken", STRING)];
const TELEGRAM: ObjectSchema = ObjectSchema::new(TELEGRAM_REQUIRED, &[]);

const CREDENTIALS: &[Field] = &[leaf("username", STRING), leaf("password", STRING)];
const NATS_LOCAL: ObjectSchema = ObjectSchema::new(CREDENTIALS, &[]);

const NATS_CLOUD_OPTIONAL: &[Field] = &[
    leaf("username", STRING),
    leaf("password", STRING),
    leaf("ipAddress", STRING),
    leaf("bucket", STRING),
];
const NATS_CLOUD: ObjectSchema = ObjectSchema::new(&[], NATS_CLOUD_OPTIONAL);

const NATS_REQUIRED: &[Field] = &[object("local", &NATS_LOCAL)];
const NATS_OPTIONAL: &[Field] = &[object("cloud", &NATS_CLOUD)];
const NATS: ObjectSchema = ObjectSchema::new(NATS_REQUIRED, NATS_OPTIONAL);

const DCIDE_OPTIONAL: &[Field] = &[
    leaf("baseUrl", STRING),
    leaf("projectId", STRING),
    leaf("secret", STRING),
];
const DCIDE: ObjectSchema = ObjectSchema::new(&[], DCIDE_OPTIONAL);

const ROOT_REQUIRED: &[Field] = &[
    object("plcnext", &PLCNEXT),
    object("mqtt", &MQTT),
    object("telegram", &TELEGRAM),
    object("nats", &NATS),
];
const ROOT_OPTIONAL: &[Field] = &[object("dcide", &DCIDE)];

pub static CONFIG_SCHEMA: ObjectSchema = ObjectSchema::new(ROOT_REQUIRED, ROOT_OPTIONAL);
