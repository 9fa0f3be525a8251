use super::primary;
use crate::event::Event;
use crate::functions;
use crate::sequence::EventSequence;
use crate::types::{EngineError, Result, Value};

/// Mean of input 0's values, emitted once at its completion point
///
/// The output completes where input 0 completes. An input without events has
/// no mean and is rejected; non-numeric values give NaN.
pub fn average(inputs: &[EventSequence]) -> Result<EventSequence> {
    let source = primary(inputs, "average")?;
    if source.is_empty() {
        return Err(EngineError::EmptyInput { operator: "average" });
    }

    let values: Vec<Value> = source.values().cloned().collect();
    let mean = Event::new(source.completion, functions::average(&values));
    Ok(EventSequence::new(vec![mean], source.completion))
}
