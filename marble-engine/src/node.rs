//! Operator node API
//!
//! An `OperatorNode` binds input sequences to an operator and owns the most
//! recently computed output. It is the only thing a renderer attaches to:
//! read `output()`, retime an input marble, call `recompute()`.

use crate::config::EvaluatorConfig;
use crate::operators::Operator;
use crate::sequence::{Consumer, EventSequence};
use crate::types::{EngineError, NodeId, Result};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

impl NodeId {
    fn fresh() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A bind whose first evaluation failed, with the inputs returned unchanged
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct BindError {
    pub error: EngineError,
    pub inputs: Vec<EventSequence>,
}

impl BindError {
    /// Take back the sequences passed to `bind`
    pub fn into_inputs(self) -> Vec<EventSequence> {
        self.inputs
    }
}

impl From<BindError> for EngineError {
    fn from(err: BindError) -> Self {
        err.error
    }
}

/// Inputs, operator and current output of one diagram
#[derive(Debug)]
pub struct OperatorNode {
    id: NodeId,
    /// Diagram label, e.g. "p.zip(q, f)"
    label: String,
    inputs: Vec<EventSequence>,
    operator: Operator,
    config: EvaluatorConfig,
    output: EventSequence,
    /// An input changed since the last recompute
    stale: bool,
}

impl OperatorNode {
    /// Bind `inputs` to `operator` with the reference configuration
    ///
    /// # Example
    /// ```
    /// use marble_engine::{fixtures, EventSequence, Operator, OperatorNode};
    ///
    /// let p = EventSequence::source("p", fixtures::abcd(), 1.0);
    /// let q = EventSequence::source("q", fixtures::xyz(), 1.0);
    /// let node = OperatorNode::bind("p.merge(q)", vec![p, q], Operator::Merge).unwrap();
    /// assert_eq!(node.output().len(), 7);
    /// ```
    pub fn bind(
        label: impl Into<String>,
        inputs: Vec<EventSequence>,
        operator: Operator,
    ) -> std::result::Result<Self, BindError> {
        Self::bind_with_config(label, inputs, operator, EvaluatorConfig::default())
    }

    /// Bind `inputs` to `operator` and evaluate once
    ///
    /// The node takes ownership of its inputs and each one records this node as
    /// its consumer; a sequence reaches another node only through `unbind`.
    /// If the first evaluation fails the inputs are handed back in the error.
    pub fn bind_with_config(
        label: impl Into<String>,
        mut inputs: Vec<EventSequence>,
        operator: Operator,
        config: EvaluatorConfig,
    ) -> std::result::Result<Self, BindError> {
        let output = match operator.evaluate(&inputs, &config) {
            Ok(output) => output,
            Err(error) => return Err(BindError { error, inputs }),
        };

        let id = NodeId::fresh();
        for (input_index, seq) in inputs.iter_mut().enumerate() {
            seq.attach(Consumer { node: id, input_index });
        }

        let label = label.into();
        log::info!("Bound node {} '{}' ({}, {} input(s))", id, label, operator, inputs.len());

        Ok(Self {
            id,
            label,
            inputs,
            operator,
            config,
            output,
            stale: false,
        })
    }

    /// Re-run the operator against the current inputs and replace the output
    ///
    /// Full re-evaluation, no diffing. Calling this twice without touching the
    /// inputs yields equal outputs. On error the previous output is kept.
    pub fn recompute(&mut self) -> Result<&EventSequence> {
        let output = self.operator.evaluate(&self.inputs, &self.config)?;
        log::debug!("Recomputed node {} '{}'", self.id, self.label);
        self.output = output;
        self.stale = false;
        Ok(&self.output)
    }

    /// Move one marble of one input to time `t`
    ///
    /// The output is not refreshed until `recompute` is called. `t` is not
    /// clamped; the caller keeps it in the drawable range.
    pub fn set_event_time(&mut self, input: usize, index: usize, t: f64) -> Result<()> {
        let count = self.inputs.len();
        let seq = self
            .inputs
            .get_mut(input)
            .ok_or(EngineError::InputOutOfRange { index: input, count })?;
        seq.set_event_time(index, t)?;

        log::trace!("Node {} input {} event {} moved to t={}", self.id, input, index, t);
        self.stale = true;
        Ok(())
    }

    /// `set_event_time` followed by `recompute`
    pub fn retime(&mut self, input: usize, index: usize, t: f64) -> Result<&EventSequence> {
        self.set_event_time(input, index, t)?;
        self.recompute()
    }

    /// Release the inputs, clearing their consumer back-references
    pub fn unbind(self) -> Vec<EventSequence> {
        let mut inputs = self.inputs;
        for seq in &mut inputs {
            seq.detach();
        }
        log::debug!("Unbound node {} '{}'", self.id, self.label);
        inputs
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    pub fn inputs(&self) -> &[EventSequence] {
        &self.inputs
    }

    /// Most recently computed output
    pub fn output(&self) -> &EventSequence {
        &self.output
    }

    /// True if an input was edited after the last recompute
    pub fn is_stale(&self) -> bool {
        self.stale
    }
}
