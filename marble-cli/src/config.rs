//! Scenario loading and retiming edits

use anyhow::{Context, Result};
use marble_engine::{Event, EvaluatorConfig, EventSequence, Operator, OperatorNode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// A diagram described in a TOML file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Scenario {
    pub operator: OperatorConfig,
    #[serde(default)]
    pub evaluator: EvaluatorConfig,
    pub inputs: Vec<InputConfig>,
    #[serde(default)]
    pub edits: Vec<Edit>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OperatorConfig {
    pub name: String,
    pub function: Option<String>,
    /// Diagram label; derived from the operator and input names when absent
    pub label: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    pub name: String,
    #[serde(default = "default_completion")]
    pub completion: f64,
    #[serde(default)]
    pub events: Vec<Event>,
}

fn default_completion() -> f64 {
    1.0
}

/// Move marble `index` of input `input` to time `t`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Edit {
    pub input: usize,
    pub index: usize,
    pub t: f64,
}

/// Errors from parsing `--retime INPUT:INDEX:T`
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EditParseError {
    #[error("expected INPUT:INDEX:T, got {0:?}")]
    Shape(String),

    #[error("invalid number {0:?}")]
    Number(String),
}

impl FromStr for Edit {
    type Err = EditParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        let [input, index, t] = parts.as_slice() else {
            return Err(EditParseError::Shape(s.to_string()));
        };

        let time: f64 = t
            .parse()
            .ok()
            .filter(|v: &f64| v.is_finite())
            .ok_or_else(|| EditParseError::Number(t.to_string()))?;

        Ok(Edit {
            input: input.parse().map_err(|_| EditParseError::Number(input.to_string()))?,
            index: index.parse().map_err(|_| EditParseError::Number(index.to_string()))?,
            t: time,
        })
    }
}

impl Edit {
    /// Clamp `t` onto the input's drawable range, retime, and recompute
    ///
    /// Like dragging: a marble cannot leave `[0, completion]` of its own line.
    pub fn apply(&self, node: &mut OperatorNode) -> Result<()> {
        if !self.t.is_finite() {
            anyhow::bail!("Edit {}:{} has non-finite time {}", self.input, self.index, self.t);
        }

        let completion = node
            .inputs()
            .get(self.input)
            .map(|seq| seq.completion)
            .unwrap_or(1.0);
        let t = self.t.clamp(0.0, completion.max(0.0));
        if t != self.t {
            log::debug!("Clamped t={} to {} for input {}", self.t, t, self.input);
        }

        node.retime(self.input, self.index, t)
            .with_context(|| format!("Failed to apply edit {}:{}:{}", self.input, self.index, self.t))?;
        Ok(())
    }
}

impl Scenario {
    /// Bind the scenario's inputs and apply its edits
    pub fn into_node(self) -> Result<OperatorNode> {
        let operator = Operator::from_name(&self.operator.name, self.operator.function.as_deref())
            .with_context(|| format!("Invalid operator {:?}", self.operator.name))?;

        self.validate_times()?;

        let label = self
            .operator
            .label
            .clone()
            .unwrap_or_else(|| default_label(&self.operator, &self.inputs));

        let inputs: Vec<EventSequence> = self
            .inputs
            .into_iter()
            .map(|input| EventSequence::source(input.name, input.events, input.completion))
            .collect();

        let mut node = OperatorNode::bind_with_config(label, inputs, operator, self.evaluator)
            .context("Failed to bind scenario inputs")?;

        for edit in &self.edits {
            edit.apply(&mut node)?;
        }
        Ok(node)
    }

    /// Every completion and marble time must be a finite number
    fn validate_times(&self) -> Result<()> {
        for input in &self.inputs {
            if !input.completion.is_finite() {
                anyhow::bail!("Input {:?} has non-finite completion {}", input.name, input.completion);
            }
            if let Some((index, event)) = input.events.iter().enumerate().find(|(_, e)| !e.t.is_finite()) {
                anyhow::bail!("Input {:?} event {} has non-finite time {}", input.name, index, event.t);
            }
        }
        Ok(())
    }
}

/// `p.zip(q, f)` style label
fn default_label(operator: &OperatorConfig, inputs: &[InputConfig]) -> String {
    let head = inputs.first().map(|i| i.name.as_str()).unwrap_or("?");
    let mut args: Vec<&str> = inputs.iter().skip(1).map(|i| i.name.as_str()).collect();
    if let Some(function) = operator.function.as_deref() {
        args.push(function);
    }
    format!("{}.{}({})", head, operator.name, args.join(", "))
}

/// Load a scenario from a TOML file
pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file: {:?}", path))?;

    let scenario: Scenario = toml::from_str(&content)
        .with_context(|| format!("Failed to parse scenario file: {:?}", path))?;

    if scenario.inputs.is_empty() {
        anyhow::bail!("Scenario {:?} has no inputs", path);
    }

    Ok(scenario)
}
