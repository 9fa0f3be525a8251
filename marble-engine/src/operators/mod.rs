//! Operator evaluators
//!
//! Each evaluator is a pure function from a slice of input sequences to a new
//! output sequence. Inputs are only read. Operators that combine values carry
//! their combinator; unary operators (filter, map, average) read only input 0
//! and ignore the rest.

mod average;
mod combine;
mod filter;
mod map;
mod merge;
mod zip;

pub use average::average;
pub use combine::{combine_latest, with_latest_from};
pub use filter::filter;
pub use map::map;
pub use merge::merge;
pub use zip::zip;

use crate::config::EvaluatorConfig;
use crate::functions;
use crate::sequence::EventSequence;
use crate::types::{EngineError, Result, Value};
use std::fmt;
use std::sync::Arc;

/// Combines one value per input into an output value
pub type Combinator = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// Decides whether a value passes a filter
pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Maps one value to another
pub type Transform = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// An evaluator together with the function it needs
#[derive(Clone)]
pub enum Operator {
    Merge,
    Filter(Predicate),
    Map(Transform),
    Average,
    Zip(Combinator),
    CombineLatest(Combinator),
    WithLatestFrom(Combinator),
}

impl Operator {
    /// Operator name as drawn in diagram labels
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Merge => "merge",
            Operator::Filter(_) => "filter",
            Operator::Map(_) => "map",
            Operator::Average => "average",
            Operator::Zip(_) => "zip",
            Operator::CombineLatest(_) => "combineLatest",
            Operator::WithLatestFrom(_) => "withLatestFrom",
        }
    }

    /// True for operators that only read input 0
    pub fn is_unary(&self) -> bool {
        matches!(self, Operator::Filter(_) | Operator::Map(_) | Operator::Average)
    }

    /// Compute the output sequence for `inputs`
    ///
    /// Every operator needs at least one input sequence.
    pub fn evaluate(&self, inputs: &[EventSequence], config: &EvaluatorConfig) -> Result<EventSequence> {
        if inputs.is_empty() {
            return Err(EngineError::EmptyInput { operator: self.name() });
        }
        if self.is_unary() && inputs.len() > 1 {
            log::trace!("{} ignores {} extra input(s)", self.name(), inputs.len() - 1);
        }

        let output = match self {
            Operator::Merge => merge(inputs, config)?,
            Operator::Filter(predicate) => filter(inputs, predicate.as_ref())?,
            Operator::Map(transform) => map(inputs, transform.as_ref())?,
            Operator::Average => average(inputs)?,
            Operator::Zip(combinator) => zip(inputs, combinator.as_ref(), config)?,
            Operator::CombineLatest(combinator) => combine_latest(inputs, combinator.as_ref())?,
            Operator::WithLatestFrom(combinator) => {
                with_latest_from(inputs, combinator.as_ref(), config)?
            }
        };

        log::debug!(
            "{} over {} input(s) produced {} event(s)",
            self.name(),
            inputs.len(),
            output.len()
        );
        Ok(output)
    }

    /// Resolve an operator and its function from their names
    ///
    /// Operator names are matched case-insensitively with underscores ignored,
    /// so `combineLatest` and `combine_latest` are the same. Function names go
    /// through the `functions` registry.
    pub fn from_name(name: &str, function: Option<&str>) -> Result<Self> {
        let key: String = name
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        let require = || function.ok_or_else(|| EngineError::MissingFunction(name.to_string()));

        let operator = match key.as_str() {
            "merge" => Operator::Merge,
            "average" => Operator::Average,
            "filter" => Operator::Filter(functions::predicate(require()?)?),
            "map" => Operator::Map(functions::transform(require()?)?),
            "zip" => Operator::Zip(functions::combinator(require()?)?),
            "combinelatest" => Operator::CombineLatest(functions::combinator(require()?)?),
            "withlatestfrom" => Operator::WithLatestFrom(functions::combinator(require()?)?),
            _ => return Err(EngineError::UnknownOperator(name.to_string())),
        };

        if let (Some(function), Operator::Merge | Operator::Average) = (function, &operator) {
            log::warn!("{} takes no function, ignoring {:?}", operator.name(), function);
        }
        Ok(operator)
    }
}

/// Input 0, or `EmptyInput` if there are no inputs
fn primary<'a>(inputs: &'a [EventSequence], operator: &'static str) -> Result<&'a EventSequence> {
    inputs.first().ok_or(EngineError::EmptyInput { operator })
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Operator::{}", self.name())
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;

    #[test]
    fn test_from_name() {
        assert_eq!(Operator::from_name("merge", None).unwrap().name(), "merge");
        assert_eq!(
            Operator::from_name("combine_latest", Some("f")).unwrap().name(),
            "combineLatest"
        );
        assert_eq!(
            Operator::from_name("withLatestFrom", Some("concat")).unwrap().name(),
            "withLatestFrom"
        );
        assert_eq!(Operator::from_name("MAP", Some("times:2")).unwrap().name(), "map");
    }

    #[test]
    fn test_from_name_errors() {
        assert_eq!(
            Operator::from_name("scan", None).err(),
            Some(EngineError::UnknownOperator("scan".to_string()))
        );
        assert_eq!(
            Operator::from_name("zip", None).err(),
            Some(EngineError::MissingFunction("zip".to_string()))
        );
        assert_eq!(
            Operator::from_name("filter", Some("prime")).err(),
            Some(EngineError::UnknownFunction("prime".to_string()))
        );
    }

    #[test]
    fn test_no_inputs_is_empty_input() {
        let config = EvaluatorConfig::default();
        for op in [Operator::Merge, Operator::Average, Operator::Zip(functions::f())] {
            let err = op.evaluate(&[], &config).unwrap_err();
            assert_eq!(err, EngineError::EmptyInput { operator: op.name() });
        }
    }

    #[test]
    fn test_unary_ignores_extra_inputs() {
        let p = EventSequence::source("p", vec![Event::new(0.1, 1), Event::new(0.2, 2)], 1.0);
        let q = EventSequence::source("q", vec![Event::new(0.3, 3)], 1.0);

        let op = Operator::Map(Arc::new(functions::identity));
        let output = op.evaluate(&[p.clone(), q], &EvaluatorConfig::default()).unwrap();
        assert_eq!(output.events, p.events);
    }
}
