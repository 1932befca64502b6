//! Control-map record schema

use crate::schema::{leaf, Field, ObjectSchema, STRING};

const REQUIRED: &[Field] = &[leaf("name", STRING), leaf("commands", STRING)];

pub static CONTROL_MAP_SCHEMA: ObjectSchema = ObjectSchema::new(REQUIRED, &[]);
