//! Sequence utilities shared by the operators
//!
//! Time-ordering and "latest value at time t" lookup.

use crate::event::Event;
use crate::sequence::EventSequence;
use crate::types::Value;
use std::cmp::Ordering;

/// Ordering of marble times
///
/// Numeric order with `-0.0 == 0.0`, so equal-looking times keep their
/// authored order. NaN has no numeric order and falls back to `total_cmp`,
/// which keeps the ordering total.
pub fn time_order(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

/// Copy of the sequence's events sorted by `t` ascending
///
/// The sort is stable, so events with equal `t` keep their authored order.
/// The source sequence is left untouched.
pub fn sorted_ascending(seq: &EventSequence) -> Vec<Event> {
    let mut events = seq.events.clone();
    events.sort_by(|a, b| time_order(a.t, b.t));
    events
}

/// Sorted copies of every input, in input order
pub fn sorted_inputs(inputs: &[EventSequence]) -> Vec<Vec<Event>> {
    inputs.iter().map(sorted_ascending).collect()
}

/// Last event with `event.t <= t`, or `None` if there is none
///
/// `sorted` must already be ascending by `t` under `time_order`. On unsorted
/// input the result is unspecified; debug builds assert the precondition.
pub fn most_recent_at_or_before(t: f64, sorted: &[Event]) -> Option<&Event> {
    debug_assert!(
        sorted.windows(2).all(|w| time_order(w[0].t, w[1].t).is_le()),
        "most_recent_at_or_before requires a time-sorted slice"
    );

    let mut current = None;
    for event in sorted {
        if event.t <= t {
            current = Some(event);
        } else {
            break;
        }
    }
    current
}

/// Argument list for a combined event triggered by `trigger` on input `trigger_index`
///
/// Position `trigger_index` takes the trigger's own value; every other position
/// takes the most recent value of that input at or before the trigger's time.
/// Returns `None` when some other input has not produced a value yet, which
/// means the combined event is dropped.
pub fn combined_args(trigger_index: usize, trigger: &Event, sorted: &[Vec<Event>]) -> Option<Vec<Value>> {
    let mut args = Vec::with_capacity(sorted.len());
    for (i, events) in sorted.iter().enumerate() {
        if i == trigger_index {
            args.push(trigger.value.clone());
        } else {
            let latest = most_recent_at_or_before(trigger.t, events)?;
            args.push(latest.value.clone());
        }
    }
    Some(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(points: &[(f64, &str)]) -> EventSequence {
        EventSequence::source("s", points.iter().map(|(t, v)| Event::new(*t, *v)).collect(), 1.0)
    }

    #[test]
    fn test_sorted_ascending_is_stable() {
        let s = seq(&[(0.5, "a"), (0.1, "b"), (0.5, "c"), (0.1, "d")]);
        let sorted = sorted_ascending(&s);
        let values: Vec<String> = sorted.iter().map(|e| e.value.to_string()).collect();
        assert_eq!(values, vec!["b", "d", "a", "c"]);

        // Source untouched
        assert_eq!(s.events[0].value, Value::from("a"));
    }

    #[test]
    fn test_signed_zero_keeps_authored_order() {
        let s = seq(&[(0.0, "a"), (-0.0, "b"), (0.0, "c")]);
        let values: Vec<String> = sorted_ascending(&s).iter().map(|e| e.value.to_string()).collect();
        assert_eq!(values, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_time_order() {
        assert_eq!(time_order(0.1, 0.2), Ordering::Less);
        assert_eq!(time_order(-0.0, 0.0), Ordering::Equal);
        assert_eq!(time_order(f64::NAN, 1.0), Ordering::Greater);
        assert_eq!(time_order(1.0, f64::NAN), Ordering::Less);
        assert_eq!(time_order(f64::NAN, f64::NAN), Ordering::Equal);
    }

    #[test]
    fn test_lookup_accepts_sorted_output_with_nan() {
        // Whatever the sort produces must satisfy the lookup's precondition
        let sorted = sorted_ascending(&seq(&[(f64::NAN, "n"), (0.3, "y"), (0.1, "x")]));
        assert_eq!(sorted[2].value, Value::from("n"));
        assert_eq!(most_recent_at_or_before(0.5, &sorted).unwrap().value, Value::from("y"));

        let args = combined_args(0, &Event::new(0.2, "b"), &[sorted.clone(), sorted]);
        assert_eq!(args, Some(vec![Value::from("b"), Value::from("x")]));
    }

    #[test]
    fn test_most_recent_at_or_before() {
        let sorted = sorted_ascending(&seq(&[(0.1, "x"), (0.3, "y"), (0.5, "z")]));

        assert!(most_recent_at_or_before(0.05, &sorted).is_none());
        assert_eq!(most_recent_at_or_before(0.1, &sorted).unwrap().value, Value::from("x"));
        assert_eq!(most_recent_at_or_before(0.4, &sorted).unwrap().value, Value::from("y"));
        assert_eq!(most_recent_at_or_before(0.9, &sorted).unwrap().value, Value::from("z"));
        assert!(most_recent_at_or_before(0.5, &[]).is_none());
    }

    #[test]
    fn test_most_recent_prefers_last_tie() {
        let sorted = sorted_ascending(&seq(&[(0.3, "first"), (0.3, "second")]));
        assert_eq!(most_recent_at_or_before(0.3, &sorted).unwrap().value, Value::from("second"));
    }

    #[test]
    fn test_combined_args() {
        let sorted = sorted_inputs(&[
            seq(&[(0.05, "a"), (0.2, "b")]),
            seq(&[(0.1, "x")]),
        ]);

        let trigger = Event::new(0.2, "b");
        let args = combined_args(0, &trigger, &sorted).unwrap();
        assert_eq!(args, vec![Value::from("b"), Value::from("x")]);

        // q has nothing at or before 0.05
        let early = Event::new(0.05, "a");
        assert!(combined_args(0, &early, &sorted).is_none());
    }
}
