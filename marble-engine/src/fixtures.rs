//! Example marbles and the demo diagrams built from them

use crate::event::Event;
use crate::functions;
use crate::node::OperatorNode;
use crate::operators::Operator;
use crate::sequence::EventSequence;
use crate::types::{EngineError, Result};
use std::sync::Arc;

/// Names of the demo diagrams, in page order
pub const DEMO_NAMES: [&str; 7] = [
    "map",
    "filter",
    "merge",
    "zip",
    "combineLatest",
    "withLatestFrom",
    "average",
];

pub fn abcd() -> Vec<Event> {
    vec![
        Event::new(0.05, "a").with_color("pink"),
        Event::new(0.20, "b").with_color("red"),
        Event::new(0.70, "c").with_color("orange"),
        Event::new(0.92, "d").with_color("yellow"),
    ]
}

pub fn xyz() -> Vec<Event> {
    vec![
        Event::new(0.10, "x").with_color("green"),
        Event::new(0.30, "y").with_color("cyan"),
        Event::new(0.50, "z").with_color("blue"),
    ]
}

pub fn uvw() -> Vec<Event> {
    vec![
        Event::new(0.18, "u").with_color("darkgreen"),
        Event::new(0.34, "v").with_color("cyan"),
        Event::new(0.66, "w").with_color("navy"),
    ]
}

pub fn one_to_five() -> Vec<Event> {
    vec![
        Event::new(0.15, 1),
        Event::new(0.29, 2),
        Event::new(0.60, 3),
        Event::new(0.78, 4),
        Event::new(0.95, 5),
    ]
}

pub fn twenty_thirty_seventy() -> Vec<Event> {
    vec![
        Event::new(0.16, 20),
        Event::new(0.37, 30),
        Event::new(0.68, 70),
    ]
}

/// Fresh `p`/`q` source pair over `abcd` and `xyz`
fn p_and_q() -> Vec<EventSequence> {
    vec![
        EventSequence::source("p", abcd(), 1.0),
        EventSequence::source("q", xyz(), 1.0),
    ]
}

/// Build one demo diagram by name (case-insensitive)
pub fn demo(name: &str) -> Result<OperatorNode> {
    let key = DEMO_NAMES
        .iter()
        .find(|n| n.eq_ignore_ascii_case(name))
        .ok_or_else(|| EngineError::UnknownOperator(name.to_string()))?;

    let bound = match *key {
        // map reads only p; q is drawn but ignored
        "map" => OperatorNode::bind(
            "p.map(f)",
            p_and_q(),
            Operator::Map(functions::unary(functions::f())),
        ),
        "filter" => OperatorNode::bind(
            "p.filter(lambda x: x % 2 == 0)",
            vec![EventSequence::source("p", one_to_five(), 1.0)],
            Operator::Filter(Arc::new(functions::even)),
        ),
        "merge" => OperatorNode::bind("p.merge(q)", p_and_q(), Operator::Merge),
        "zip" => OperatorNode::bind("p.zip(q, f)", p_and_q(), Operator::Zip(functions::f())),
        "combineLatest" => OperatorNode::bind(
            "p.combineLatest(q, f)",
            p_and_q(),
            Operator::CombineLatest(functions::f()),
        ),
        "withLatestFrom" => OperatorNode::bind(
            "p.withLatestFrom(q, f)",
            p_and_q(),
            Operator::WithLatestFrom(functions::f()),
        ),
        _ => OperatorNode::bind(
            "p.average()",
            vec![EventSequence::source("p", twenty_thirty_seventy(), 0.8)],
            Operator::Average,
        ),
    };
    bound.map_err(EngineError::from)
}

/// Every demo diagram, in page order
pub fn demos() -> Result<Vec<OperatorNode>> {
    DEMO_NAMES.iter().map(|name| demo(name)).collect()
}
