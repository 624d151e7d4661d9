//! Arithmetic over [`Value`]s.
//!
//! Operands must share a tag; there is no Int/Float promotion. Integer
//! arithmetic wraps on overflow.

use std::fmt;

use crate::{
    diagnostics::{LemonError, Result},
    value::{Value, ValueKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

pub fn apply(op: BinaryOp, left: &Value, right: &Value) -> Result<Value> {
    match op {
        BinaryOp::Add => add(left, right),
        BinaryOp::Sub => subtract(left, right),
        BinaryOp::Mul => multiply(left, right),
        BinaryOp::Div => divide(left, right),
    }
}

/// Int and Float addition, String concatenation.
pub fn add(left: &Value, right: &Value) -> Result<Value> {
    match (&*left.0, &*right.0) {
        (ValueKind::String(a), ValueKind::String(b)) => Ok(Value::string(format!("{a}{b}"))),
        _ => numeric(BinaryOp::Add, left, right, i64::wrapping_add, |a, b| a + b),
    }
}

pub fn subtract(left: &Value, right: &Value) -> Result<Value> {
    numeric(BinaryOp::Sub, left, right, i64::wrapping_sub, |a, b| a - b)
}

pub fn multiply(left: &Value, right: &Value) -> Result<Value> {
    numeric(BinaryOp::Mul, left, right, i64::wrapping_mul, |a, b| a * b)
}

/// Integer division truncates toward zero. A zero divisor (including `-0.0`)
/// is rejected before dividing.
pub fn divide(left: &Value, right: &Value) -> Result<Value> {
    match (&*left.0, &*right.0) {
        (ValueKind::Int(_), ValueKind::Int(0)) => Err(LemonError::DivisionByZero),
        (ValueKind::Float(_), ValueKind::Float(b)) if *b == 0.0 => Err(LemonError::DivisionByZero),
        _ => numeric(BinaryOp::Div, left, right, i64::wrapping_div, |a, b| a / b),
    }
}

fn numeric<I, F>(op: BinaryOp, left: &Value, right: &Value, int: I, float: F) -> Result<Value>
where
    I: Fn(i64, i64) -> i64,
    F: Fn(f64, f64) -> f64,
{
    match (&*left.0, &*right.0) {
        (ValueKind::Int(a), ValueKind::Int(b)) => Ok(Value::int(int(*a, *b))),
        (ValueKind::Float(a), ValueKind::Float(b)) => Ok(Value::float(float(*a, *b))),
        _ => Err(LemonError::InvalidOperandKind {
            op,
            left: left.type_name(),
            right: right.type_name(),
        }),
    }
}
