//! Conditional and looping combinators over caller-supplied thunks.
//!
//! Every thunk receives the same caller context `cx`, so conditions and
//! bodies can read and mutate shared state (typically a [`crate::Runtime`]).
//! Thunks run synchronously and a failing thunk aborts the construct.

use crate::{diagnostics::Result, value::{Value, ValueKind}};

/// Deferred expression evaluated against the caller's context.
pub type Thunk<'a, C> = &'a mut dyn FnMut(&mut C) -> Result<Value>;

/// Only `Bool(true)` is truthy. Every other value, including `Int(1)` and
/// non-empty strings, is false.
pub fn evaluate_condition(value: &Value) -> bool {
    matches!(&*value.0, ValueKind::Bool(true))
}

pub fn execute_if<C>(
    cx: &mut C,
    condition: &Value,
    then_branch: Thunk<'_, C>,
    else_branch: Option<Thunk<'_, C>>,
) -> Result<Value> {
    if evaluate_condition(condition) {
        then_branch(cx)
    } else if let Some(else_branch) = else_branch {
        else_branch(cx)
    } else {
        Ok(Value::default())
    }
}

/// Returns the last body result, or the default value if the body never ran.
pub fn execute_while<C>(
    cx: &mut C,
    condition: Thunk<'_, C>,
    body: Thunk<'_, C>,
) -> Result<Value> {
    let mut result = Value::default();
    while evaluate_condition(&condition(cx)?) {
        result = body(cx)?;
    }
    Ok(result)
}

pub fn execute_for<C>(
    cx: &mut C,
    init: Thunk<'_, C>,
    condition: Thunk<'_, C>,
    increment: Thunk<'_, C>,
    body: Thunk<'_, C>,
) -> Result<Value> {
    let mut result = Value::default();
    init(cx)?;
    while evaluate_condition(&condition(cx)?) {
        result = body(cx)?;
        increment(cx)?;
    }
    Ok(result)
}
