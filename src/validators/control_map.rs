//! Control-map validation

use serde_json::Value;
use std::collections::HashSet;
use std::slice;

use crate::catalog::CONTROL_MAP_SCHEMA;
use crate::result::ValidationResult;
use crate::schema::Kind;
use crate::validators::commands::{self, CommandError};
use crate::validators::document::{check_required, check_unknown, record_label};

/// Treat a single control record as a one-element list. Anything else that
/// is not a list is `None`.
pub(crate) fn control_records(control_maps: &Value) -> Option<&[Value]> {
    match control_maps {
        Value::Object(_) => Some(slice::from_ref(control_maps)),
        Value::Array(items) => Some(items),
        _ => None,
    }
}

/// Validate a control-map document: one record object or a list of them
pub fn validate_control_maps(control_maps: &Value) -> ValidationResult {
    let mut result = ValidationResult::new();

    let Some(records) = control_records(control_maps) else {
        result.error(format!(
            "Control map file must be a list (or object), got {}",
            Kind::of(control_maps)
        ));
        return result;
    };

    let mut seen_names = HashSet::new();

    for (idx, item) in records.iter().enumerate() {
        let name = record_label(item, "name", "register", idx);

        let Some(record) = item.as_object() else {
            result.error(format!("Control register '{}' must be an object", name));
            continue;
        };

        if !seen_names.insert(name.clone()) {
            result.error(format!("Duplicate control register name '{}'", name));
            continue;
        }

        let subject = format!("Control register '{}'", name);
        result.absorb(check_required(&subject, record, CONTROL_MAP_SCHEMA.required));

        if let Some(commands) = record.get("commands").and_then(Value::as_str) {
            result.absorb(validate_commands(&subject, commands));
        }

        result.absorb(check_unknown(&subject, record, &CONTROL_MAP_SCHEMA));
    }

    result
}

fn validate_commands(subject: &str, commands: &str) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (position, token) in commands::tokens(commands).into_iter().enumerate() {
        let Err(err) = commands::parse(token) else {
            continue;
        };
        let message = match err {
            CommandError::Empty => format!(
                "{} field 'commands' contains an empty command at position {}",
                subject, position
            ),
            CommandError::ReadWithAssignment | CommandError::ReadWithoutTarget => {
                format!("{} read command '{}' {}", subject, token, err)
            }
            CommandError::WriteIncomplete | CommandError::WriteTargetIsRead => {
                format!("{} write command '{}' {}", subject, token, err)
            }
            CommandError::Unrecognized => format!("{} command '{}' {}", subject, token, err),
        };
        result.error(message);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn texts(result: &ValidationResult) -> Vec<&str> {
        result.messages().iter().map(|m| m.message.as_str()).collect()
    }

    #[test]
    fn test_valid_read_and_write() {
        let result = validate_control_maps(&json!([{"name": "c1", "commands": "motor.start? | relay1=1"}]));
        assert!(result.is_empty(), "{:?}", result);
    }

    #[test]
    fn test_single_object_is_one_record() {
        let result = validate_control_maps(&json!({"name": "c1", "commands": "a?"}));
        assert!(result.is_empty());
    }

    #[test]
    fn test_wrong_top_level_shape() {
        let result = validate_control_maps(&json!("nope"));
        assert_eq!(texts(&result), vec!["Control map file must be a list (or object), got string"]);
    }

    #[test]
    fn test_command_errors() {
        let result = validate_control_maps(&json!([
            {"name": "c2", "commands": "motor.start?=1"},
            {"name": "c3", "commands": "a? || b"},
            {"name": "c4", "commands": "?"},
            {"name": "c5", "commands": "x=?"},
        ]));
        assert_eq!(
            texts(&result),
            vec![
                "Control register 'c2' write command 'motor.start?=1' must not have '?' in the command part",
                "Control register 'c3' field 'commands' contains an empty command at position 1",
                "Control register 'c3' command 'b' must end with '?' (read) or contain '=' (write)",
                "Control register 'c4' read command '?' must have a command before '?'",
                "Control register 'c5' read command 'x=?' must not contain '='",
            ]
        );
    }

    #[test]
    fn test_blank_commands_are_not_tokenized() {
        let result = validate_control_maps(&json!([{"name": "c1", "commands": "   "}]));
        assert!(result.is_empty());
    }

    #[test]
    fn test_duplicate_skips_remaining_checks() {
        let result = validate_control_maps(&json!([
            {"name": "c1", "commands": "a?"},
            {"name": "c1", "commands": "bad", "extra": 1},
        ]));
        assert_eq!(texts(&result), vec!["Duplicate control register name 'c1'"]);
    }

    #[test]
    fn test_missing_fields_and_unknown() {
        let result = validate_control_maps(&json!([{"commands": 5, "zz": 1, "aa": 2}]));
        assert_eq!(
            texts(&result),
            vec![
                "Control register 'register[0]' missing 'name' (expected string)",
                "Control register 'register[0]' field 'commands' expected string",
                "Control register 'register[0]' unknown fields: aa, zz",
            ]
        );
        assert!(result.has_errors() && result.has_warnings());
    }

    #[test]
    fn test_non_object_record() {
        let result = validate_control_maps(&json!([3]));
        assert_eq!(texts(&result), vec!["Control register 'register[0]' must be an object"]);
    }
}
