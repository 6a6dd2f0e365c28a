//! Where a handler comes from.
//!
//! A source is configured as a single string: `builtin:<name>` selects a
//! compiled-in handler, anything else is a command line run once per call.

use std::fmt;
use std::str::FromStr;

use crate::builtin::BuiltinHandler;
use crate::error::LoadError;

/// Prefix selecting a compiled-in handler.
const BUILTIN_PREFIX: &str = "builtin:";

/// A configured handler source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerSource {
    /// A handler compiled into this binary.
    Builtin(BuiltinHandler),
    /// An external program spawned for every invocation.
    Process {
        /// Program name or path.
        program: String,
        /// Arguments passed to the program.
        args: Vec<String>,
    },
}

impl Default for HandlerSource {
    fn default() -> Self {
        Self::Builtin(BuiltinHandler::Starter)
    }
}

impl FromStr for HandlerSource {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(name) = s.strip_prefix(BUILTIN_PREFIX) {
            return BuiltinHandler::from_name(name)
                .map(Self::Builtin)
                .ok_or_else(|| LoadError::InvalidSource(format!("unknown built-in handler `{name}`")));
        }

        let mut parts = s.split_whitespace().map(str::to_owned);
        let Some(program) = parts.next() else {
            return Err(LoadError::InvalidSource(String::from("empty handler command")));
        };
        Ok(Self::Process {
            program,
            args: parts.collect(),
        })
    }
}

impl fmt::Display for HandlerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(handler) => write!(f, "{BUILTIN_PREFIX}{}", handler.name()),
            Self::Process { program, args } => {
                f.write_str(program)?;
                for arg in args {
                    write!(f, " {arg}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_builtins() {
        assert_eq!(
            "builtin:starter".parse::<HandlerSource>().ok(),
            Some(HandlerSource::Builtin(BuiltinHandler::Starter))
        );
        assert_eq!(
            " builtin:lesson ".parse::<HandlerSource>().ok(),
            Some(HandlerSource::Builtin(BuiltinHandler::Lesson))
        );
        assert!("builtin:nope".parse::<HandlerSource>().is_err());
    }

    #[test]
    fn parses_command_lines() {
        let source = "python3  handlers/student.py --quiet".parse::<HandlerSource>().ok();
        assert_eq!(
            source,
            Some(HandlerSource::Process {
                program: String::from("python3"),
                args: vec![String::from("handlers/student.py"), String::from("--quiet")],
            })
        );
    }

    #[test]
    fn rejects_empty_command() {
        assert!("   ".parse::<HandlerSource>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for text in ["builtin:starter", "node handler.js"] {
            let shown = text.parse::<HandlerSource>().map(|s| s.to_string()).ok();
            assert_eq!(shown.as_deref(), Some(text));
        }
    }
}
