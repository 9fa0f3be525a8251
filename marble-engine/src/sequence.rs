//! Event sequences ("observables")
//!
//! A sequence is an authored list of events plus a completion point. Source
//! sequences are user-editable inputs; computed outputs are never edited, only
//! regenerated by their operator node.

use crate::event::Event;
use crate::types::{EngineError, NodeId, Result, Value};
use serde::{Deserialize, Serialize};

/// Non-owning back-reference from a sequence to the node consuming it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Consumer {
    /// The consuming node
    pub node: NodeId,
    /// Position of this sequence among the node's inputs
    pub input_index: usize,
}

/// An ordered (not necessarily time-sorted) collection of events
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct EventSequence {
    /// Label drawn next to the timeline (e.g. "p")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Events in authored order
    pub events: Vec<Event>,
    /// Normalized point at which the sequence completes
    #[serde(default = "default_completion")]
    pub completion: f64,
    /// True if this sequence is editable input
    #[serde(default)]
    pub is_source: bool,
    #[serde(skip)]
    consumer: Option<Consumer>,
}

fn default_completion() -> f64 {
    1.0
}

impl EventSequence {
    /// Create a computed (non-source) sequence
    pub fn new(events: Vec<Event>, completion: f64) -> Self {
        Self {
            name: None,
            events,
            completion,
            is_source: false,
            consumer: None,
        }
    }

    /// Create a named, editable input sequence
    pub fn source(name: impl Into<String>, events: Vec<Event>, completion: f64) -> Self {
        Self {
            name: Some(name.into()),
            events,
            completion,
            is_source: true,
            consumer: None,
        }
    }

    /// Number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if the sequence has no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Node currently consuming this sequence, if any
    pub fn consumer(&self) -> Option<Consumer> {
        self.consumer
    }

    /// Retime one event in place
    ///
    /// `t` is stored as given; clamping to the drawable range is the caller's
    /// job. Only source sequences may be edited.
    pub fn set_event_time(&mut self, index: usize, t: f64) -> Result<()> {
        if !self.is_source {
            return Err(EngineError::NotSource);
        }
        let count = self.events.len();
        let event = self
            .events
            .get_mut(index)
            .ok_or(EngineError::EventOutOfRange { index, count })?;
        event.t = t;
        Ok(())
    }

    /// Values in authored order
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.events.iter().map(|e| &e.value)
    }

    pub(crate) fn attach(&mut self, consumer: Consumer) {
        self.consumer = Some(consumer);
    }

    pub(crate) fn detach(&mut self) {
        self.consumer = None;
    }
}

/// A copy is a new sequence that no node consumes yet
impl Clone for EventSequence {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            events: self.events.clone(),
            completion: self.completion,
            is_source: self.is_source,
            consumer: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EventSequence {
        EventSequence::source(
            "p",
            vec![Event::new(0.05, "a"), Event::new(0.20, "b")],
            1.0,
        )
    }

    #[test]
    fn test_set_event_time() {
        let mut seq = sample();
        seq.set_event_time(1, 0.9).unwrap();
        assert_eq!(seq.events[1].t, 0.9);

        // Not clamped by the engine
        seq.set_event_time(0, 1.7).unwrap();
        assert_eq!(seq.events[0].t, 1.7);
    }

    #[test]
    fn test_set_event_time_errors() {
        let mut seq = sample();
        assert_eq!(
            seq.set_event_time(5, 0.5),
            Err(EngineError::EventOutOfRange { index: 5, count: 2 })
        );

        let mut output = EventSequence::new(vec![Event::new(0.1, 1)], 1.0);
        assert_eq!(output.set_event_time(0, 0.5), Err(EngineError::NotSource));
    }

    #[test]
    fn test_clone_drops_consumer() {
        let mut seq = sample();
        seq.attach(Consumer { node: NodeId(3), input_index: 0 });
        assert!(seq.consumer().is_some());

        let copy = seq.clone();
        assert!(copy.consumer().is_none());
        assert_eq!(copy.events, seq.events);
    }

    #[test]
    fn test_sequence_deserialization_defaults() {
        let seq: EventSequence =
            serde_json::from_str(r#"{"events": [{"t": 0.1, "value": "x"}]}"#).unwrap();
        assert_eq!(seq.completion, 1.0);
        assert!(!seq.is_source);
        assert!(seq.name.is_none());
        assert_eq!(seq.len(), 1);
    }
}
