use super::primary;
use crate::config::EvaluatorConfig;
use crate::event::Event;
use crate::sequence::EventSequence;
use crate::types::{Result, Value};
use crate::utils::{combined_args, sorted_inputs};

/// Combine every event of every input with the latest value of each other input
///
/// Inputs are visited in index order and each input's events in authored order,
/// so the output is not necessarily chronological. A trigger for which some
/// other input has no value at or before its time is dropped. Emitted events
/// keep the trigger's time and color. Completes at 1.0.
pub fn combine_latest<C>(inputs: &[EventSequence], combinator: C) -> Result<EventSequence>
where
    C: Fn(&[Value]) -> Value,
{
    primary(inputs, "combineLatest")?;
    let sorted = sorted_inputs(inputs);

    let mut events = Vec::new();
    for (k, input) in inputs.iter().enumerate() {
        for trigger in &input.events {
            if let Some(event) = combined_event(k, trigger, &sorted, &combinator) {
                events.push(event);
            }
        }
    }

    Ok(EventSequence::new(events, 1.0))
}

/// Combine each event of input 0 with the latest value of every other input
///
/// Same combination and drop rules as `combine_latest`, but only input 0
/// triggers. Under the reference configuration the first authored event of
/// input 0 never triggers. Completes at 1.0.
pub fn with_latest_from<C>(
    inputs: &[EventSequence],
    combinator: C,
    config: &EvaluatorConfig,
) -> Result<EventSequence>
where
    C: Fn(&[Value]) -> Value,
{
    let source = primary(inputs, "withLatestFrom")?;
    let sorted = sorted_inputs(inputs);
    let start = if config.with_latest_from_skip_first { 1 } else { 0 };

    let events = source
        .events
        .iter()
        .skip(start)
        .filter_map(|trigger| combined_event(0, trigger, &sorted, &combinator))
        .collect();

    Ok(EventSequence::new(events, 1.0))
}

fn combined_event<C>(k: usize, trigger: &Event, sorted: &[Vec<Event>], combinator: &C) -> Option<Event>
where
    C: Fn(&[Value]) -> Value,
{
    let Some(args) = combined_args(k, trigger, sorted) else {
        log::trace!("Dropping trigger at t={} on input {}: missing co-input value", trigger.t, k);
        return None;
    };

    Some(Event {
        t: trigger.t,
        value: combinator(&args),
        color: trigger.color.clone(),
        interval: None,
    })
}
