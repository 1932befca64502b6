//! Controller config validation

use serde_json::Value;

use crate::catalog::CONFIG_SCHEMA;
use crate::result::ValidationResult;
use crate::validators::document::validate_document;

pub fn validate_config(config: &Value) -> ValidationResult {
    validate_document(config, &CONFIG_SCHEMA, "Config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn texts(result: &ValidationResult) -> Vec<&str> {
        result.messages().iter().map(|m| m.message.as_str()).collect()
    }

    fn valid_config() -> Value {
        json!({
            "plcnext": {"ipAddress": "192.168.1.10", "username": "admin"},
            "mqtt": {"broker": {"ipAddress": "192.168.1.20", "port": 1883}},
            "telegram": {"chatId": "-100", "botToken": "abc"},
            "nats": {"local": {"username": "u", "password": "p"}, "cloud": {"bucket": "b"}},
            "dcide": {"baseUrl": "https://example.invalid"}
        })
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&valid_config()).is_empty());
    }

    #[test]
    fn test_config_must_be_object() {
        let result = validate_config(&json!([]));
        assert_eq!(texts(&result), vec!["Config must be an object"]);
    }

    #[test]
    fn test_nested_errors() {
        let mut config = valid_config();
        config["mqtt"]["broker"]["port"] = json!("1883");
        config["nats"]["local"] = json!("u:p");
        config.as_object_mut().unwrap().remove("telegram");
        let result = validate_config(&config);
        assert_eq!(
            texts(&result),
            vec![
                "Field 'mqtt.broker.port' expected int",
                "Missing 'telegram' in 'root'",
                "Field 'nats.local' must be an object",
            ]
        );
    }

    #[test]
    fn test_unknown_fields_warn() {
        let mut config = valid_config();
        config["plcnext"]["timeout"] = json!(5);
        config["extra"] = json!(true);
        let result = validate_config(&config);
        assert!(!result.has_errors());
        assert_eq!(
            texts(&result),
            vec!["Unknown fields at 'plcnext': timeout", "Unknown fields at 'root': extra"]
        );
    }
}
