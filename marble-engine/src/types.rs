//! Core types for the marble engine
//!
//! This module defines the payload carried by every marble, the node identifier
//! used for consumer back-references, and the engine error type. Evaluation is
//! pure, so every error here is a contract violation by the caller rather than
//! a recoverable runtime condition.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur while binding, editing or evaluating sequences
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("{operator}: required input sequence is empty or missing")]
    EmptyInput { operator: &'static str },

    #[error("zip: input 0 has {available} event(s) but the pairing bound needs {needed}")]
    PrimaryExhausted { needed: usize, available: usize },

    #[error("Input index {index} out of range ({count} input(s))")]
    InputOutOfRange { index: usize, count: usize },

    #[error("Event index {index} out of range ({count} event(s))")]
    EventOutOfRange { index: usize, count: usize },

    #[error("Sequence is not a source and cannot be edited")]
    NotSource,

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Operator {0} requires a function")]
    MissingFunction(String),
}

/// Identifier of an operator node, used as a non-owning back-reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Payload of a marble
///
/// The engine never looks inside a value except to hand it to a combinator,
/// predicate or transform, and to take the numeric mean in `average`.
/// Deserialization is untagged so `value = 20` and `value = "a"` both work
/// in scenario files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean value
    Boolean(bool),
    /// Signed integer value
    Integer(i64),
    /// Floating-point value
    Float(f64),
    /// Text value
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(v) => write!(f, "{}", v),
            Value::Boolean(v) => write!(f, "{}", if *v { "true" } else { "false" }),
        }
    }
}

impl Value {
    /// Convert to f64 for numeric aggregation
    ///
    /// Text has no numeric reading and yields NaN, which then propagates
    /// through sums and means.
    pub fn as_f64(&self) -> f64 {
        match self {
            Value::Integer(v) => *v as f64,
            Value::Float(v) => *v,
            Value::Boolean(v) => if *v { 1.0 } else { 0.0 },
            Value::Text(_) => f64::NAN,
        }
    }

    /// Convert to i64 if the value is integral
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            Value::Float(v) if v.fract() == 0.0 => Some(*v as i64),
            Value::Boolean(v) => Some(if *v { 1 } else { 0 }),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}
