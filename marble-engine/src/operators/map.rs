use super::primary;
use crate::sequence::EventSequence;
use crate::types::{Result, Value};

/// Apply `transform` to every value of input 0
///
/// One output event per input event, same time and color. Completes at 1.0.
pub fn map<F>(inputs: &[EventSequence], transform: F) -> Result<EventSequence>
where
    F: Fn(&Value) -> Value,
{
    let source = primary(inputs, "map")?;
    let events = source
        .events
        .iter()
        .map(|event| event.clone().with_value(transform(&event.value)))
        .collect();
    Ok(EventSequence::new(events, 1.0))
}
