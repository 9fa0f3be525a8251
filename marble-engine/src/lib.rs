//! Marble Engine Library
//!
//! Computes the output of reactive-stream operators over static, fully known
//! event sequences, the way a marble diagram shows them.
//!
//! # Architecture
//!
//! This library is intentionally small and synchronous:
//! - Events and sequences are plain data with an explicit retiming mutator
//! - Operators are pure evaluators from input sequences to a new sequence
//! - An operator node owns its inputs and re-evaluates on `recompute`
//!
//! The library does NOT:
//! - Run streams concurrently or against a clock
//! - Track subscriptions or backpressure
//! - Draw anything
//!
//! Rendering and gesture handling live in the application layer (marble-cli).
//!
//! # Example Usage
//!
//! ```
//! use marble_engine::{fixtures, functions, EventSequence, Operator, OperatorNode};
//!
//! let p = EventSequence::source("p", fixtures::abcd(), 1.0);
//! let q = EventSequence::source("q", fixtures::xyz(), 1.0);
//! let mut node = OperatorNode::bind("p.zip(q, f)", vec![p, q], Operator::Zip(functions::f())).unwrap();
//! assert_eq!(node.output().events[0].value.to_string(), "f(a,x)");
//!
//! // Drag "a" to the right of "c", then redraw from the new output
//! let output = node.retime(0, 0, 0.8).unwrap();
//! assert_eq!(output.events[0].value.to_string(), "f(b,x)");
//! ```

// Public modules
pub mod config;
pub mod event;
pub mod fixtures;
pub mod functions;
pub mod node;
pub mod operators;
pub mod sequence;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use config::{EvaluatorConfig, ZipBound};
pub use event::{Event, Interval};
pub use node::{BindError, OperatorNode};
pub use operators::{Combinator, Operator, Predicate, Transform};
pub use sequence::{Consumer, EventSequence};
pub use types::{EngineError, NodeId, Result, Value};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
