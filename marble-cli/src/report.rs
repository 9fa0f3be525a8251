//! JSON report generation

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use marble_engine::{EventSequence, OperatorNode};
use serde::Serialize;

/// All rendered diagrams plus provenance
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub generated_at: DateTime<Utc>,
    pub engine_version: &'static str,
    pub diagrams: Vec<DiagramReport<'a>>,
}

/// One diagram: inputs as currently timed and the recomputed output
#[derive(Debug, Serialize)]
pub struct DiagramReport<'a> {
    pub label: &'a str,
    pub operator: &'static str,
    /// False when the evaluator deviates from the illustrated quirks
    pub reference_semantics: bool,
    pub stale: bool,
    pub inputs: &'a [EventSequence],
    pub output: &'a EventSequence,
}

impl<'a> DiagramReport<'a> {
    pub fn from_node(node: &'a OperatorNode) -> Self {
        Self {
            label: node.label(),
            operator: node.operator().name(),
            reference_semantics: node.config().is_reference(),
            stale: node.is_stale(),
            inputs: node.inputs(),
            output: node.output(),
        }
    }
}

pub fn build(nodes: &[OperatorNode]) -> Report<'_> {
    Report {
        generated_at: Utc::now(),
        engine_version: marble_engine::VERSION,
        diagrams: nodes.iter().map(DiagramReport::from_node).collect(),
    }
}

pub fn to_json(report: &Report<'_>) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report")
}
