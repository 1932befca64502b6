//! Register lookup by name

use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::catalog::RequiredRegister;
use crate::matcher::render;
use crate::result::ValidationResult;

/// Registers of one address map indexed by `name`.
///
/// Only object entries with a non-blank string name are indexed. The first
/// occurrence of a name wins; duplicates are reported by the address-map
/// validator, not overwritten here.
#[derive(Debug, Default)]
pub struct RegisterIndex<'a> {
    by_name: HashMap<&'a str, &'a Map<String, Value>>,
}

impl<'a> RegisterIndex<'a> {
    /// Build from an address-map document. Anything but a list yields an
    /// empty index.
    pub fn build(registers: &'a Value) -> Self {
        let mut by_name = HashMap::new();

        for reg in registers.as_array().into_iter().flatten() {
            let Some(record) = reg.as_object() else {
                continue;
            };
            if let Some(name) = record.get("name").and_then(Value::as_str) {
                if !name.trim().is_empty() {
                    by_name.entry(name).or_insert(record);
                }
            }
        }

        Self { by_name }
    }

    pub fn get(&self, name: &str) -> Option<&'a Map<String, Value>> {
        self.by_name.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Check that each required register exists and carries the pinned field value
pub fn validate_required_registers(index: &RegisterIndex<'_>, required: &[RequiredRegister]) -> ValidationResult {
    let mut result = ValidationResult::new();

    for req in required {
        let Some(register) = index.get(req.name) else {
            result.error(format!("Missing required register '{}'", req.name));
            continue;
        };

        match register.get(req.field) {
            None => result.error(format!(
                "Register '{}' missing required field '{}'",
                req.name, req.field
            )),
            Some(actual) if actual.as_str() != Some(req.expected) => result.error(format!(
                "Register '{}' field '{}' expected '{}', got '{}'",
                req.name,
                req.field,
                req.expected,
                render(actual)
            )),
            Some(_) => {}
        }
    }

    result
}
