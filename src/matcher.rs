//! Type/shape matching
//!
//! Decides whether a value satisfies a [`TypeDescriptor`] and renders the
//! expected shape for messages. No coercion: `true` is not an int, `1` is
//! not a float.

use serde_json::Value;

use crate::schema::{FieldSchema, Kind, TypeDescriptor};

/// Whether `value` satisfies `descriptor`
pub fn matches(value: &Value, descriptor: &TypeDescriptor) -> bool {
    match descriptor {
        TypeDescriptor::Primitive(kind) => Kind::of(value) == *kind,
        TypeDescriptor::OneOfStrings(allowed) => value
            .as_str()
            .is_some_and(|s| allowed.contains(&s)),
        TypeDescriptor::OneOfNumbers(allowed) => match value {
            Value::Number(n) => n
                .as_f64()
                .is_some_and(|n| allowed.iter().any(|&lit| lit as f64 == n)),
            _ => false,
        },
        TypeDescriptor::AnyOf(kinds) => kinds.contains(&Kind::of(value)),
    }
}

/// Expected shape rendered for error messages
pub fn describe(descriptor: &TypeDescriptor) -> String {
    match descriptor {
        TypeDescriptor::Primitive(kind) => kind.name().to_string(),
        TypeDescriptor::OneOfStrings(allowed) => allowed.join(", "),
        TypeDescriptor::OneOfNumbers(allowed) => allowed
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(", "),
        TypeDescriptor::AnyOf(kinds) => kinds
            .iter()
            .map(|k| k.name())
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Shallow match of a schema node: leaves use [`matches`], nested nodes
/// only check the container kind.
pub fn matches_field(value: &Value, schema: &FieldSchema) -> bool {
    match schema {
        FieldSchema::Leaf(descriptor) => matches(value, descriptor),
        FieldSchema::Object(_) => value.is_object(),
        FieldSchema::List(_) => value.is_array(),
    }
}

pub fn describe_field(schema: &FieldSchema) -> String {
    match schema {
        FieldSchema::Leaf(descriptor) => describe(descriptor),
        FieldSchema::Object(_) => Kind::Object.name().to_string(),
        FieldSchema::List(_) => Kind::Array.name().to_string(),
    }
}

/// Render a value the way messages quote it: strings verbatim, anything
/// else as compact JSON.
pub fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
