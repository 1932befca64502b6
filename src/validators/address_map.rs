//! Address-map validation
//!
//! Registers are checked against the selected dialect's schema. Registers
//! with an `expression` are derived values: only the expression itself and
//! the `{name}` references inside it are checked. After the per-register
//! pass, dialect rules require certain registers by name.

use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

use crate::catalog::address_maps::{COMMUNICATION_CHECK, EXPRESSION_FIELD};
use crate::catalog::Dialect;
use crate::matcher::matches_field;
use crate::result::ValidationResult;
use crate::schema::Kind;
use crate::validators::document::{check_constraints, check_optional, check_required, check_unknown, record_label};
use crate::validators::registers::{validate_required_registers, RegisterIndex};

static EXPRESSION_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^}]+)\}").expect("expression reference pattern"));

/// `{name}` references in an expression, in order of first appearance
pub fn expression_references(expression: &str) -> Vec<&str> {
    let mut refs: Vec<&str> = Vec::new();
    for cap in EXPRESSION_REF_RE.captures_iter(expression) {
        if let Some(m) = cap.get(1) {
            if !refs.contains(&m.as_str()) {
                refs.push(m.as_str());
            }
        }
    }
    refs
}

/// Validate an address map for the dialect keyed by `map_type`.
///
/// `precharge_contactor_feedback` only matters for Precharge maps, where it
/// makes the contactor measurement registers mandatory.
pub fn validate_address_map(
    registers: &Value,
    map_type: &str,
    precharge_contactor_feedback: bool,
) -> ValidationResult {
    let mut result = ValidationResult::new();

    let Some(dialect) = Dialect::from_key(map_type) else {
        result.error(format!("Invalid map type '{}'", map_type));
        return result;
    };

    let Some(items) = registers.as_array() else {
        result.error(format!("Address map file must be a list, got {}", Kind::of(registers)));
        return result;
    };

    debug!(map_type = dialect.key(), registers = items.len(), "validating address map");

    let schema = dialect.schema();
    let mut seen_labels = HashSet::new();
    let mut expressions = Vec::new();

    for (idx, item) in items.iter().enumerate() {
        let name = record_label(item, "name", "register", idx);

        let Some(register) = item.as_object() else {
            result.error(format!("Register '{}' must be an object", name));
            continue;
        };

        if !seen_labels.insert(name.clone()) {
            result.error(format!("Duplicate register '{}'", name));
        }

        if let Some(expression) = register.get(EXPRESSION_FIELD.name) {
            match expression.as_str() {
                Some(text) if matches_field(expression, &EXPRESSION_FIELD.schema) => {
                    expressions.push((name, text));
                }
                _ => result.error(format!("Invalid expression in register '{}'", name)),
            }
            continue;
        }

        let subject = format!("Register '{}'", name);
        result.absorb(check_required(&subject, register, schema.required));
        result.absorb(check_constraints(&subject, register, schema.constraints));
        result.absorb(check_optional(&subject, register, schema.optional));
        result.absorb(check_unknown(&subject, register, schema));
    }

    let index = RegisterIndex::build(registers);

    for (name, expression) in &expressions {
        let missing: Vec<&str> = expression_references(expression)
            .into_iter()
            .filter(|r| !index.contains(r))
            .collect();
        if !missing.is_empty() {
            result.error(format!(
                "Expression '{}' references missing registers: {}",
                name,
                missing.join(", ")
            ));
        }
    }

    if dialect == Dialect::ModbusTcpIp && !index.contains(COMMUNICATION_CHECK) {
        result.error(format!(
            "Missing required register '{}' for {}",
            COMMUNICATION_CHECK,
            dialect.key()
        ));
    }

    let required = dialect.required_registers(precharge_contactor_feedback);
    if !required.is_empty() {
        result.absorb(validate_required_registers(&index, &required));
    }

    result
}

/// Whether the precharge device wired to `address_map_file` reports
/// contactor feedback.
///
/// Looks at the first `precharge` device whose `addressMap` equals the
/// file's basename without `.json`. No such device means `false`.
pub fn precharge_contactor_feedback(devices: &Value, address_map_file: &str) -> bool {
    let file_name = Path::new(address_map_file)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(address_map_file);
    let address_map_ref = file_name.strip_suffix(".json").unwrap_or(file_name);

    devices
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
        .find(|d| {
            d.get("type").and_then(Value::as_str) == Some("precharge")
                && d.get("addressMap").and_then(Value::as_str) == Some(address_map_ref)
        })
        .is_some_and(|d| d.get("contactorFeedback") == Some(&Value::Bool(true)))
}
