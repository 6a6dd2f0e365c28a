//! Validation of raw handler results.
//!
//! Handlers hand back untyped JSON. This module checks it against the
//! result shape (`output` string, optional `state`) and produces a typed
//! [`HandlerResult`]. Anything else is a [`ContractViolation`]; nothing is
//! repaired or guessed.

use serde_json::Value;
use tutorbot_types::{HandlerResult, UserState};

use crate::error::ContractViolation;

/// Maximum number of characters of bad stdout quoted in a violation.
const MAX_QUOTED_LEN: usize = 200;

/// Validate a raw result, keeping `input_state` when `state` is absent.
///
/// A `state` of `null` counts as absent.
pub fn validate(raw: Value, input_state: &UserState) -> Result<HandlerResult, ContractViolation> {
    let Value::Object(mut map) = raw else {
        return Err(ContractViolation::NotAnObject);
    };

    let output = match map.remove("output") {
        None => return Err(ContractViolation::MissingOutput),
        Some(Value::String(output)) => output,
        Some(_) => return Err(ContractViolation::OutputNotString),
    };

    let state = match map.remove("state") {
        None | Some(Value::Null) => input_state.clone(),
        Some(state) => UserState::from(state),
    };

    Ok(HandlerResult { output, state })
}

/// Parse a handler's stdout and validate it.
pub fn validate_stdout(
    stdout: &str,
    input_state: &UserState,
) -> Result<HandlerResult, ContractViolation> {
    let trimmed = stdout.trim();
    let raw: Value = serde_json::from_str(trimmed).map_err(|e| {
        let quoted: String = trimmed.chars().take(MAX_QUOTED_LEN).collect();
        ContractViolation::MalformedJson(format!("{e} in {quoted:?}"))
    })?;
    validate(raw, input_state)
}
