//! Recursive document validation
//!
//! Walks a nested [`ObjectSchema`] alongside a value, reporting missing
//! required fields, type mismatches, out-of-range numbers and unknown
//! fields with dotted paths. Each level returns its own result and the
//! caller merges it.
//!
//! The `check_*` helpers at the bottom are the flat-record variant used by
//! the device, address-map and control-map validators, where each record is
//! named by a subject such as `Device 'pcs1'` instead of a path.

use serde_json::{Map, Value};

use crate::matcher::{describe_field, matches_field, render};
use crate::result::ValidationResult;
use crate::schema::{Constraint, Field, FieldSchema, Kind, ObjectSchema};

/// Validate `value` against `schema`. `subject` names the document in the
/// root-shape error, e.g. `Config must be an object`.
pub fn validate_document(value: &Value, schema: &ObjectSchema, subject: &str) -> ValidationResult {
    match value.as_object() {
        Some(map) => validate_object(map, schema, ""),
        None => {
            let mut result = ValidationResult::new();
            result.error(format!("{} must be an object", subject));
            result
        }
    }
}

fn join_path(base: &str, key: &str) -> String {
    if base.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", base, key)
    }
}

fn validate_node(value: &Value, schema: &FieldSchema, path: &str) -> ValidationResult {
    let mut result = ValidationResult::new();

    match schema {
        FieldSchema::Leaf(_) => {
            if !matches_field(value, schema) {
                result.error(format!("Field '{}' expected {}", path, describe_field(schema)));
            }
        }
        FieldSchema::Object(nested) => match value.as_object() {
            Some(map) => result.absorb(validate_object(map, nested, path)),
            None => result.error(format!("Field '{}' must be an object", path)),
        },
        FieldSchema::List(element) => match value.as_array() {
            Some(items) => {
                for (idx, item) in items.iter().enumerate() {
                    let item_path = format!("{}[{}]", path, idx);
                    match item.as_object() {
                        Some(map) => result.absorb(validate_object(map, element, &item_path)),
                        None => result.error(format!("Field '{}' must be an object", item_path)),
                    }
                }
            }
            None => result.error(format!("Field '{}' must be a list", path)),
        },
    }

    result
}

fn validate_object(map: &Map<String, Value>, schema: &ObjectSchema, path: &str) -> ValidationResult {
    let mut result = ValidationResult::new();
    let container = if path.is_empty() { "root" } else { path };

    for field in schema.required {
        match map.get(field.name) {
            Some(value) => result.absorb(validate_node(value, &field.schema, &join_path(path, field.name))),
            None => result.error(format!("Missing '{}' in '{}'", field.name, container)),
        }
    }

    for field in schema.optional {
        if let Some(value) = map.get(field.name) {
            result.absorb(validate_node(value, &field.schema, &join_path(path, field.name)));
        }
    }

    for constraint in schema.constraints {
        if out_of_range(map, constraint) {
            result.error(format!(
                "Field '{}' must be between {} and {}",
                join_path(path, constraint.field),
                constraint.min,
                constraint.max
            ));
        }
    }

    let unknown = unknown_fields(map, schema);
    if !unknown.is_empty() {
        result.warning(format!("Unknown fields at '{}': {}", container, unknown.join(", ")));
    }

    result
}

/// Keys of `map` the schema does not declare, sorted
pub(crate) fn unknown_fields<'a>(map: &'a Map<String, Value>, schema: &ObjectSchema) -> Vec<&'a str> {
    let mut unknown: Vec<&str> = map
        .keys()
        .map(String::as_str)
        .filter(|k| !schema.declares(k))
        .collect();
    unknown.sort_unstable();
    unknown
}

/// A present numeric field outside its bounds. Absent and non-numeric
/// values are left to the type checks.
pub(crate) fn out_of_range(map: &Map<String, Value>, constraint: &Constraint) -> bool {
    let Some(value) = map.get(constraint.field) else {
        return false;
    };
    if !matches!(Kind::of(value), Kind::Int | Kind::Float) {
        return false;
    }
    value.as_f64().is_some_and(|n| !constraint.contains(n))
}

/// Name a list element by `key` when present, else `<fallback>[<index>]`
pub(crate) fn record_label(item: &Value, key: &str, fallback: &str, index: usize) -> String {
    match item.get(key) {
        Some(value) => render(value),
        None => format!("{}[{}]", fallback, index),
    }
}

pub(crate) fn check_required(subject: &str, record: &Map<String, Value>, fields: &[Field]) -> ValidationResult {
    let mut result = ValidationResult::new();
    for field in fields {
        match record.get(field.name) {
            None => result.error(format!(
                "{} missing '{}' (expected {})",
                subject,
                field.name,
                describe_field(&field.schema)
            )),
            Some(value) if !matches_field(value, &field.schema) => result.error(format!(
                "{} field '{}' expected {}",
                subject,
                field.name,
                describe_field(&field.schema)
            )),
            Some(_) => {}
        }
    }
    result
}

pub(crate) fn check_optional(subject: &str, record: &Map<String, Value>, fields: &[Field]) -> ValidationResult {
    let mut result = ValidationResult::new();
    for field in fields {
        if let Some(value) = record.get(field.name) {
            if !matches_field(value, &field.schema) {
                result.warning(format!(
                    "{} optional field '{}' expected {}",
                    subject,
                    field.name,
                    describe_field(&field.schema)
                ));
            }
        }
    }
    result
}

pub(crate) fn check_constraints(
    subject: &str,
    record: &Map<String, Value>,
    constraints: &[Constraint],
) -> ValidationResult {
    let mut result = ValidationResult::new();
    for constraint in constraints {
        if out_of_range(record, constraint) {
            result.error(format!(
                "{} field '{}' must be between {} and {}",
                subject, constraint.field, constraint.min, constraint.max
            ));
        }
    }
    result
}

pub(crate) fn check_unknown(subject: &str, record: &Map<String, Value>, schema: &ObjectSchema) -> ValidationResult {
    let mut result = ValidationResult::new();
    let unknown = unknown_fields(record, schema);
    if !unknown.is_empty() {
        result.warning(format!("{} unknown fields: {}", subject, unknown.join(", ")));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Level;
    use crate::schema::{leaf, list, object, INT, NUMBER, STRING};
    use serde_json::json;

    const POINT_REQUIRED: &[Field] = &[leaf("x", INT), leaf("y", INT)];
    const POINT_OPTIONAL: &[Field] = &[leaf("label", STRING)];
    const POINT: ObjectSchema = ObjectSchema::new(POINT_REQUIRED, POINT_OPTIONAL);

    const LIMITS: &[Constraint] = &[Constraint { field: "gain", min: 0, max: 10 }];
    const ROOT_REQUIRED: &[Field] = &[leaf("name", STRING), object("origin", &POINT)];
    const ROOT_OPTIONAL: &[Field] = &[list("points", &POINT), leaf("gain", NUMBER)];
    static ROOT: ObjectSchema = ObjectSchema::new(ROOT_REQUIRED, ROOT_OPTIONAL).with_constraints(LIMITS);

    fn texts(result: &ValidationResult) -> Vec<&str> {
        result.messages().iter().map(|m| m.message.as_str()).collect()
    }

    #[test]
    fn test_valid_document() {
        let doc = json!({"name": "a", "origin": {"x": 1, "y": 2}, "points": [{"x": 0, "y": 0}]});
        let result = validate_document(&doc, &ROOT, "Shape");
        assert!(result.is_empty(), "{:?}", result);
    }

    #[test]
    fn test_root_must_be_object() {
        let result = validate_document(&json!([1, 2]), &ROOT, "Shape");
        assert_eq!(texts(&result), vec!["Shape must be an object"]);
        assert!(result.has_errors());
    }

    #[test]
    fn test_missing_and_mismatch_paths() {
        let doc = json!({"origin": {"x": "1"}});
        let result = validate_document(&doc, &ROOT, "Shape");
        assert_eq!(
            texts(&result),
            vec![
                "Missing 'name' in 'root'",
                "Field 'origin.x' expected int",
                "Missing 'y' in 'origin'",
            ]
        );
    }

    #[test]
    fn test_nested_must_be_object_stops_descent() {
        let doc = json!({"name": "a", "origin": 5});
        let result = validate_document(&doc, &ROOT, "Shape");
        assert_eq!(texts(&result), vec!["Field 'origin' must be an object"]);
    }

    #[test]
    fn test_unknown_fields_sorted_per_container() {
        let doc = json!({"name": "a", "zeta": 1, "alpha": 2, "origin": {"x": 1, "y": 2, "z": 3}});
        let result = validate_document(&doc, &ROOT, "Shape");
        assert_eq!(
            texts(&result),
            vec!["Unknown fields at 'origin': z", "Unknown fields at 'root': alpha, zeta"]
        );
        assert!(result.messages().iter().all(|m| m.level == Level::Warning));
        assert!(!result.has_errors());
    }

    #[test]
    fn test_list_elements_use_indexed_paths() {
        let doc = json!({"name": "a", "origin": {"x": 1, "y": 2}, "points": [{"x": 1, "y": 1}, {"x": 1}, 3]});
        let result = validate_document(&doc, &ROOT, "Shape");
        assert_eq!(
            texts(&result),
            vec!["Missing 'y' in 'points[1]'", "Field 'points[2]' must be an object"]
        );

        let doc = json!({"name": "a", "origin": {"x": 1, "y": 2}, "points": {}});
        let result = validate_document(&doc, &ROOT, "Shape");
        assert_eq!(texts(&result), vec!["Field 'points' must be a list"]);
    }

    #[test]
    fn test_constraints_on_document() {
        let doc = json!({"name": "a", "origin": {"x": 1, "y": 2}, "gain": 10.5});
        let result = validate_document(&doc, &ROOT, "Shape");
        assert_eq!(texts(&result), vec!["Field 'gain' must be between 0 and 10"]);
    }

    #[test]
    fn test_record_label_fallback() {
        assert_eq!(record_label(&json!({"name": "r"}), "name", "register", 3), "r");
        assert_eq!(record_label(&json!({}), "name", "register", 3), "register[3]");
        assert_eq!(record_label(&json!("x"), "name", "register", 0), "register[0]");
    }

    #[test]
    fn test_out_of_range_ignores_non_numbers() {
        let c = Constraint { field: "startBit", min: 0, max: 7 };
        let map = json!({"startBit": "9"});
        assert!(!out_of_range(map.as_object().unwrap(), &c));
        let map = json!({"startBit": true});
        assert!(!out_of_range(map.as_object().unwrap(), &c));
        let map = json!({"startBit": 9});
        assert!(out_of_range(map.as_object().unwrap(), &c));
    }
}
