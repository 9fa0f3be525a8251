use super::primary;
use crate::sequence::EventSequence;
use crate::types::{Result, Value};

/// Keep the events of input 0 whose value satisfies `predicate`
///
/// Order, time and color are preserved. Completes at 1.0.
pub fn filter<P>(inputs: &[EventSequence], predicate: P) -> Result<EventSequence>
where
    P: Fn(&Value) -> bool,
{
    let source = primary(inputs, "filter")?;
    let events = source
        .events
        .iter()
        .filter(|event| predicate(&event.value))
        .cloned()
        .collect();
    Ok(EventSequence::new(events, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fixtures, functions};

    fn numbers() -> Vec<EventSequence> {
        vec![EventSequence::source("p", fixtures::one_to_five(), 1.0)]
    }

    #[test]
    fn test_filter_even() {
        let output = filter(&numbers(), functions::even).unwrap();
        let values: Vec<_> = output.values().cloned().collect();
        assert_eq!(values, vec![Value::from(2), Value::from(4)]);
        assert_eq!(output.events[0].t, 0.29);
        assert_eq!(output.events[1].t, 0.78);
    }

    #[test]
    fn test_filter_true_is_identity() {
        let inputs = numbers();
        let output = filter(&inputs, |_| true).unwrap();
        assert_eq!(output.events, inputs[0].events);
        assert_eq!(output.completion, 1.0);
    }

    #[test]
    fn test_filter_false_is_empty() {
        let output = filter(&numbers(), |_| false).unwrap();
        assert!(output.is_empty());
    }
}
