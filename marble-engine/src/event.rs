//! A single marble on a timeline

use crate::types::Value;
use serde::{Deserialize, Serialize};

/// One timestamped datum belonging to a sequence
///
/// `t` is a position on a normalized timeline (by convention in `[0, 1]`).
/// Ties between events of the same sequence are allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Normalized time of the marble
    pub t: f64,
    /// Payload
    pub value: Value,
    /// Presentation hint (fill color), carried through operators
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Presentation-only interval marker, ignored by evaluators
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<Interval>,
}

/// End marker of an interval drawn under a marble
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Normalized time at which the interval ends
    pub end: f64,
}

impl Event {
    /// Create an uncolored event
    pub fn new(t: f64, value: impl Into<Value>) -> Self {
        Self {
            t,
            value: value.into(),
            color: None,
            interval: None,
        }
    }

    /// Builder method: set the color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Builder method: attach an interval ending at `end`
    pub fn with_interval(mut self, end: f64) -> Self {
        self.interval = Some(Interval { end });
        self
    }

    /// Builder method: replace the value, keeping time, color and interval
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    /// Builder method: replace the time, keeping everything else
    pub fn with_time(mut self, t: f64) -> Self {
        self.t = t;
        self
    }

    /// True if an interval marker is attached
    pub fn is_interval(&self) -> bool {
        self.interval.is_some()
    }
}
