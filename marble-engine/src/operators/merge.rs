use super::primary;
use crate::config::EvaluatorConfig;
use crate::sequence::EventSequence;
use crate::types::Result;
use crate::utils::time_order;

/// Concatenate every input's events, input 0 first
///
/// Events keep their time, value and color. The output is in input order, not
/// time order, unless `config.merge_sorted` is set. Completes at 1.0.
pub fn merge(inputs: &[EventSequence], config: &EvaluatorConfig) -> Result<EventSequence> {
    primary(inputs, "merge")?;

    let mut events: Vec<_> = inputs.iter().flat_map(|seq| seq.events.iter().cloned()).collect();
    if config.merge_sorted {
        events.sort_by(|a, b| time_order(a.t, b.t));
    }
    Ok(EventSequence::new(events, 1.0))
}
