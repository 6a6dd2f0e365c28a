//! Per-user state and the handler result shape.
//!
//! The store imposes no schema on [`UserState`]: whatever JSON a handler
//! returns is what gets persisted. The only convention is that a user who
//! has never been seen starts with an empty object.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Arbitrary JSON state scoped to one user.
///
/// Defaults to the empty object `{}`, never `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserState(pub Value);

impl UserState {
    /// An empty JSON object.
    pub fn empty() -> Self {
        Self(Value::Object(Map::new()))
    }

    /// Borrow the underlying JSON value.
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consume the state and return the underlying JSON value.
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Whether this state is an object with no keys.
    pub fn is_empty_object(&self) -> bool {
        self.0.as_object().is_some_and(Map::is_empty)
    }
}

impl Default for UserState {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Value> for UserState {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<UserState> for Value {
    fn from(state: UserState) -> Self {
        state.0
    }
}

/// A well-formed handler result: the text to send back and the state to
/// persist for the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerResult {
    /// Text sent back to the channel (or checked by the grader).
    pub output: String,
    /// State to persist for the calling user.
    #[serde(default)]
    pub state: UserState,
}
