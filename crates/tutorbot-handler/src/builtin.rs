//! Handlers compiled into the binary.
//!
//! These are the starting points students are given. They follow the same
//! contract as any external handler: take an input string and a state, and
//! return a raw JSON result with `output` and `state`. They never fail; bad
//! state is treated as empty rather than rejected.

use serde_json::{Map, Value, json};
use tutorbot_types::UserState;

/// Placeholder output for empty input.
pub const NO_INPUT: &str = "(no input)";

/// Placeholder output for `show` with no stored messages.
pub const NO_MESSAGES: &str = "(no messages)";

/// Output for any input the starter does not recognize.
pub const NOT_UNDERSTOOD: &str = "I don't understand that command.";

/// The built-in handlers selectable as `builtin:<name>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinHandler {
    /// Notes starter: `show`, `add <text>`, `clear`.
    Starter,
    /// First lesson: recognize `!commands` and answer `ping`.
    Lesson,
}

impl BuiltinHandler {
    /// Look up a built-in by name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "starter" => Some(Self::Starter),
            "lesson" => Some(Self::Lesson),
            _ => None,
        }
    }

    /// The name used in `builtin:<name>`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Starter => "starter",
            Self::Lesson => "lesson",
        }
    }

    /// Run the handler and return its raw JSON result.
    pub fn call(self, input: &str, state: &UserState) -> Value {
        match self {
            Self::Starter => starter(input, state),
            Self::Lesson => lesson(input, state),
        }
    }
}

/// Notes starter.
///
/// The leading token selects the command, case-insensitively. `add` stores
/// everything after the token, trimmed.
pub fn starter(input: &str, state: &UserState) -> Value {
    let mut state = match state.as_value() {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };

    let trimmed = input.trim_start();
    let Some(command) = trimmed.split_whitespace().next() else {
        return result(NO_INPUT, state);
    };
    let rest = trimmed.get(command.len()..).unwrap_or_default().trim();

    match command.to_lowercase().as_str() {
        "show" => {
            // A history of blank notes shows the placeholder, never an empty reply.
            let joined = messages(&state).join("\n");
            if joined.is_empty() {
                result(NO_MESSAGES, state)
            } else {
                result(&joined, state)
            }
        }
        "add" => {
            let mut messages = messages(&state);
            messages.push(rest.to_owned());
            state.insert(String::from("messages"), json!(messages));
            result(&format!("Added: {rest}"), state)
        }
        "clear" => {
            state.insert(String::from("messages"), json!([]));
            result("Cleared", state)
        }
        _ => result(NOT_UNDERSTOOD, state),
    }
}

/// First-lesson handler: commands start with `!`, and `ping` gets `pong`.
pub fn lesson(input: &str, state: &UserState) -> Value {
    let output = if is_command(input) {
        "That's a command!"
    } else if input == "ping" {
        handle_ping(input)
    } else {
        "I don't understand."
    };
    json!({ "output": output, "state": state })
}

fn is_command(text: &str) -> bool {
    text.starts_with('!')
}

fn handle_ping(text: &str) -> &'static str {
    if text == "ping" { "pong" } else { "not a ping" }
}

/// Stored messages as display strings. Non-array values count as empty.
fn messages(state: &Map<String, Value>) -> Vec<String> {
    state
        .get("messages")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn result(output: &str, state: Map<String, Value>) -> Value {
    json!({ "output": output, "state": Value::Object(state) })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn run(input: &str, state: &UserState) -> (String, UserState) {
        let raw = starter(input, state);
        let output = raw
            .get("output")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();
        let state = UserState::from(raw.get("state").cloned().unwrap_or_default());
        (output, state)
    }

    #[test]
    fn show_on_fresh_state_reports_no_messages() {
        let (output, state) = run("show", &UserState::default());
        assert_eq!(output, NO_MESSAGES);
        assert!(state.is_empty_object());
    }

    #[test]
    fn add_then_show_lists_in_order() {
        let (out, state) = run("add first note", &UserState::default());
        assert_eq!(out, "Added: first note");
        let (_, state) = run("ADD   second  ", &state);
        let (out, _) = run("Show", &state);
        assert_eq!(out, "first note\nsecond");
    }

    #[test]
    fn add_without_text_then_show_reports_no_messages() {
        let (out, state) = run("add", &UserState::default());
        assert_eq!(out, "Added: ");
        assert_eq!(state.as_value(), &json!({"messages": [""]}));
        let (out, _) = run("show", &state);
        assert_eq!(out, NO_MESSAGES);
    }

    #[test]
    fn clear_empties_any_history() {
        let state = UserState::from(json!({"messages": ["a", "b"], "other": 1}));
        let (out, state) = run("clear", &state);
        assert_eq!(out, "Cleared");
        assert_eq!(state.as_value(), &json!({"messages": [], "other": 1}));
        let (out, _) = run("show", &state);
        assert!(out.contains("no messages"));
    }

    #[test]
    fn empty_and_blank_input_are_no_input() {
        let before = UserState::from(json!({"messages": ["keep"]}));
        for input in ["", "   ", "\n\t"] {
            let (out, state) = run(input, &before);
            assert_eq!(out, NO_INPUT);
            assert_eq!(state, before);
        }
    }

    #[test]
    fn unknown_command_leaves_state_unchanged() {
        let before = UserState::from(json!({"messages": ["keep"]}));
        let (out, state) = run("dance", &before);
        assert_eq!(out, NOT_UNDERSTOOD);
        assert_eq!(state, before);
    }

    #[test]
    fn command_must_be_whole_token() {
        let (out, _) = run("address book", &UserState::default());
        assert_eq!(out, NOT_UNDERSTOOD);
    }

    #[test]
    fn leading_whitespace_does_not_corrupt_added_text() {
        let (out, _) = run("   add hello", &UserState::default());
        assert_eq!(out, "Added: hello");
    }

    #[test]
    fn garbage_state_is_treated_as_empty() {
        let (out, _) = run("show", &UserState::from(json!("not an object")));
        assert_eq!(out, NO_MESSAGES);
        let (out, _) = run("show", &UserState::from(json!({"messages": 5})));
        assert_eq!(out, NO_MESSAGES);
    }

    #[test]
    fn lesson_recognizes_commands_and_ping() {
        let state = UserState::default();
        let output = |input: &str| {
            lesson(input, &state)
                .get("output")
                .and_then(Value::as_str)
                .map(str::to_owned)
        };
        assert_eq!(output("!help").as_deref(), Some("That's a command!"));
        assert_eq!(output("ping").as_deref(), Some("pong"));
        assert_eq!(output("pong").as_deref(), Some("I don't understand."));
    }

    #[test]
    fn builtin_names_round_trip() {
        for handler in [BuiltinHandler::Starter, BuiltinHandler::Lesson] {
            assert_eq!(BuiltinHandler::from_name(handler.name()), Some(handler));
        }
        assert_eq!(BuiltinHandler::from_name("Starter"), Some(BuiltinHandler::Starter));
        assert_eq!(BuiltinHandler::from_name("missing"), None);
    }
}
