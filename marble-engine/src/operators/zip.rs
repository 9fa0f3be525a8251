use super::primary;
use crate::config::{EvaluatorConfig, ZipBound};
use crate::event::Event;
use crate::sequence::EventSequence;
use crate::types::{EngineError, Result, Value};
use crate::utils::sorted_inputs;

/// Pair up the j-th events (in time order) of every input
///
/// Each group emits `combinator(values)` at the latest time in the group, with
/// the color of input 0's event. The number of groups is the shortest length
/// among inputs 1..n under the reference bound; input 0 is not considered, so
/// a primary shorter than that bound is rejected with `PrimaryExhausted`.
/// `ZipBound::AllInputs` takes the shortest of all inputs instead.
/// Completes at 1.0.
pub fn zip<C>(inputs: &[EventSequence], combinator: C, config: &EvaluatorConfig) -> Result<EventSequence>
where
    C: Fn(&[Value]) -> Value,
{
    primary(inputs, "zip")?;
    let sorted = sorted_inputs(inputs);

    let limit = match config.zip_bound {
        ZipBound::NonPrimary => sorted[1..].iter().map(Vec::len).min().unwrap_or(0),
        ZipBound::AllInputs => sorted.iter().map(Vec::len).min().unwrap_or(0),
    };
    let available = sorted[0].len();
    if available < limit {
        return Err(EngineError::PrimaryExhausted { needed: limit, available });
    }

    let mut events = Vec::with_capacity(limit);
    for j in 0..limit {
        let group: Vec<&Event> = sorted.iter().map(|row| &row[j]).collect();
        let t = group.iter().map(|e| e.t).fold(f64::NEG_INFINITY, f64::max);
        let args: Vec<Value> = group.iter().map(|e| e.value.clone()).collect();

        let mut event = Event::new(t, combinator(&args));
        event.color = sorted[0][j].color.clone();
        events.push(event);
    }

    Ok(EventSequence::new(events, 1.0))
}
