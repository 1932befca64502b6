//! Control command mini-language
//!
//! A `commands` string is a `|`-separated list of tokens. A token ending in
//! `?` reads a register (`motor.start?`); a token containing `=` writes one
//! (`relay1=1`).

use std::fmt;

/// A well-formed command token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    Read { target: &'a str },
    Write { target: &'a str, value: &'a str },
}

impl<'a> Command<'a> {
    pub fn target(&self) -> &'a str {
        match self {
            Command::Read { target } | Command::Write { target, .. } => target,
        }
    }
}

/// Why a token is malformed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    Empty,
    ReadWithAssignment,
    ReadWithoutTarget,
    WriteIncomplete,
    WriteTargetIsRead,
    Unrecognized,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            CommandError::Empty => "is empty",
            CommandError::ReadWithAssignment => "must not contain '='",
            CommandError::ReadWithoutTarget => "must have a command before '?'",
            CommandError::WriteIncomplete => "must have a command before '=' and a value after",
            CommandError::WriteTargetIsRead => "must not have '?' in the command part",
            CommandError::Unrecognized => "must end with '?' (read) or contain '=' (write)",
        };
        f.write_str(text)
    }
}

/// Split a commands string into trimmed tokens. A blank string has no
/// tokens at all; otherwise empty tokens are kept so they can be reported.
pub fn tokens(commands: &str) -> Vec<&str> {
    if commands.trim().is_empty() {
        return Vec::new();
    }
    commands.split('|').map(str::trim).collect()
}

/// Parse one trimmed token
pub fn parse(token: &str) -> Result<Command<'_>, CommandError> {
    if token.is_empty() {
        return Err(CommandError::Empty);
    }

    if let Some(head) = token.strip_suffix('?') {
        if token.contains('=') {
            return Err(CommandError::ReadWithAssignment);
        }
        let target = head.trim();
        if target.is_empty() {
            return Err(CommandError::ReadWithoutTarget);
        }
        return Ok(Command::Read { target });
    }

    if let Some((left, right)) = token.split_once('=') {
        let (target, value) = (left.trim(), right.trim());
        if target.is_empty() || value.is_empty() {
            return Err(CommandError::WriteIncomplete);
        }
        if target.ends_with('?') {
            return Err(CommandError::WriteTargetIsRead);
        }
        return Ok(Command::Write { target, value });
    }

    Err(CommandError::Unrecognized)
}

/// Register name a token refers to, regardless of whether the token is
/// otherwise well formed: the text before a trailing `?`, or before the
/// first `=`.
pub fn base_name(token: &str) -> Option<&str> {
    let base = if let Some(head) = token.strip_suffix('?') {
        head.trim()
    } else if let Some((left, _)) = token.split_once('=') {
        left.trim()
    } else {
        return None;
    };
    (!base.is_empty()).then_some(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens() {
        assert!(tokens("   ").is_empty());
        assert_eq!(tokens("a? | b=1"), vec!["a?", "b=1"]);
        assert_eq!(tokens("a?||b?"), vec!["a?", "", "b?"]);
    }

    #[test]
    fn test_parse_valid() {
        assert_eq!(parse("motor.start?"), Ok(Command::Read { target: "motor.start" }));
        assert_eq!(parse("motor.start ?"), Ok(Command::Read { target: "motor.start" }));
        assert_eq!(
            parse("relay1 = 1"),
            Ok(Command::Write { target: "relay1", value: "1" })
        );
        assert_eq!(
            parse("setpoint=a=b"),
            Ok(Command::Write { target: "setpoint", value: "a=b" })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse(""), Err(CommandError::Empty));
        assert_eq!(parse("motor.start?=1?"), Err(CommandError::ReadWithAssignment));
        assert_eq!(parse("motor.start?=1"), Err(CommandError::WriteTargetIsRead));
        assert_eq!(parse("?"), Err(CommandError::ReadWithoutTarget));
        assert_eq!(parse("=1"), Err(CommandError::WriteIncomplete));
        assert_eq!(parse("relay="), Err(CommandError::WriteIncomplete));
        assert_eq!(parse("relay"), Err(CommandError::Unrecognized));
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("motor.start?"), Some("motor.start"));
        assert_eq!(base_name("relay1=1"), Some("relay1"));
        assert_eq!(base_name("relay1"), None);
        assert_eq!(base_name("?"), None);
        assert_eq!(base_name("a?=1"), Some("a?"));
    }
}
