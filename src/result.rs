//! Validation results
//!
//! An append-only log of classified findings. `has_errors` / `has_warnings`
//! always equal "some finding has that level"; they are kept in step on every
//! push and OR-combined on merge, and the fields are private so nothing else
//! can break that.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Finding severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Warning,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A single classified validation message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub level: Level,
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)
    }
}

/// Overall verdict derived from a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Valid,
    ValidWithWarnings,
    Invalid,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => write!(f, "Valid"),
            Self::ValidWithWarnings => write!(f, "Valid with warnings"),
            Self::Invalid => write!(f, "Errors found"),
        }
    }
}

/// Ordered findings for one validation unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    messages: Vec<Finding>,
    has_errors: bool,
    has_warnings: bool,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finding
    pub fn push(&mut self, level: Level, message: impl Into<String>) {
        match level {
            Level::Error => self.has_errors = true,
            Level::Warning => self.has_warnings = true,
        }
        self.messages.push(Finding {
            level,
            message: message.into(),
        });
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Level::Error, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Level::Warning, message);
    }

    /// Append all of `other`'s findings after ours
    pub fn absorb(&mut self, other: ValidationResult) {
        self.has_errors |= other.has_errors;
        self.has_warnings |= other.has_warnings;
        self.messages.extend(other.messages);
    }

    /// Concatenate results left to right. No inputs gives an empty result.
    pub fn merge<I>(results: I) -> Self
    where
        I: IntoIterator<Item = ValidationResult>,
    {
        results.into_iter().fold(Self::new(), |mut acc, r| {
            acc.absorb(r);
            acc
        })
    }

    pub fn messages(&self) -> &[Finding] {
        &self.messages
    }

    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    pub fn has_warnings(&self) -> bool {
        self.has_warnings
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.messages.iter().filter(|m| m.level == Level::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.messages.iter().filter(|m| m.level == Level::Warning)
    }

    pub fn status(&self) -> Status {
        if self.has_errors {
            Status::Invalid
        } else if self.has_warnings {
            Status::ValidWithWarnings
        } else {
            Status::Valid
        }
    }
}

impl FromIterator<ValidationResult> for ValidationResult {
    fn from_iter<T: IntoIterator<Item = ValidationResult>>(iter: T) -> Self {
        Self::merge(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(levels: &[Level]) -> ValidationResult {
        let mut r = ValidationResult::new();
        for (i, level) in levels.iter().enumerate() {
            r.push(*level, format!("m{}", i));
        }
        r
    }

    fn flags_consistent(r: &ValidationResult) -> bool {
        r.has_errors() == r.errors().next().is_some()
            && r.has_warnings() == r.warnings().next().is_some()
    }

    #[test]
    fn test_flags_follow_pushes() {
        let mut r = ValidationResult::new();
        assert!(!r.has_errors() && !r.has_warnings());
        r.warning("w");
        assert!(r.has_warnings() && !r.has_errors());
        r.error("e");
        assert!(r.has_warnings() && r.has_errors());
        assert!(flags_consistent(&r));
    }

    #[test]
    fn test_merge_preserves_order_and_ors_flags() {
        let a = sample(&[Level::Warning]);
        let b = sample(&[Level::Error, Level::Warning]);
        let merged = ValidationResult::merge([a.clone(), b.clone()]);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged.messages()[0], a.messages()[0]);
        assert_eq!(merged.messages()[1..], b.messages()[..]);
        assert_eq!(merged.has_errors(), a.has_errors() || b.has_errors());
        assert_eq!(merged.has_warnings(), a.has_warnings() || b.has_warnings());
        assert!(flags_consistent(&merged));
    }

    #[test]
    fn test_merge_empty() {
        let merged = ValidationResult::merge(Vec::<ValidationResult>::new());
        assert!(merged.is_empty());
        assert!(!merged.has_errors());
        assert!(!merged.has_warnings());
        assert_eq!(merged.status(), Status::Valid);
    }

    #[test]
    fn test_merge_is_associative() {
        let a = sample(&[Level::Error]);
        let b = sample(&[Level::Warning, Level::Warning]);
        let c = sample(&[]);

        let left = ValidationResult::merge([ValidationResult::merge([a.clone(), b.clone()]), c.clone()]);
        let right = ValidationResult::merge([a, ValidationResult::merge([b, c])]);
        assert_eq!(left, right);
    }

    #[test]
    fn test_status() {
        assert_eq!(sample(&[Level::Warning]).status(), Status::ValidWithWarnings);
        assert_eq!(sample(&[Level::Warning, Level::Error]).status(), Status::Invalid);
        assert_eq!(Status::Invalid.to_string(), "Errors found");
    }

    #[test]
    fn test_serializes_flags() {
        let r = sample(&[Level::Error]);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["has_errors"], true);
        assert_eq!(json["messages"][0]["level"], "error");
    }
}
