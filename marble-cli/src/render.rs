//! Text marble diagrams
//!
//! Draws each input timeline, the operator label, and the output timeline:
//!
//! ```text
//!      a          b                               c           d
//!   p ---o--------o-------------------------------o-----------o----|------>
//! ```
//!
//! Marbles sit at `round(t * width)`; `|` marks completion and `>` ends the
//! arrow. Later labels overwrite earlier ones when they collide.

use marble_engine::{EventSequence, OperatorNode};

const MARBLE: char = 'o';
const COMPLETION: char = '|';
const MIN_WIDTH: usize = 10;

/// Column of time `t` on a timeline `width` characters wide
pub fn column(t: f64, width: usize) -> usize {
    if !t.is_finite() {
        return 0;
    }
    (t.clamp(0.0, 1.0) * width as f64).round() as usize
}

/// Render a whole diagram: inputs, operator label, output
pub fn render_node(node: &OperatorNode, width: usize) -> String {
    let width = width.max(MIN_WIDTH);
    let gutter = node
        .inputs()
        .iter()
        .filter_map(|seq| seq.name.as_deref())
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(0)
        + 2;

    let mut lines = Vec::new();
    for seq in node.inputs() {
        lines.extend(render_sequence(seq, width, gutter));
    }

    lines.push(String::new());
    let boxed = format!("[ {} ]", node.label());
    lines.push(format!("{}{:^width$}", " ".repeat(gutter), boxed, width = width).trim_end().to_string());
    lines.push(String::new());

    lines.extend(render_sequence(node.output(), width, gutter));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Label line, timeline, and (when present) interval line for one sequence
pub fn render_sequence(seq: &EventSequence, width: usize, gutter: usize) -> Vec<String> {
    let tail = width / 10 + 1;
    let total = gutter + width + tail;

    let mut labels: Vec<char> = vec![' '; total];
    let mut line: Vec<char> = vec!['-'; total];
    let mut intervals: Option<Vec<char>> = None;

    let name = seq.name.as_deref().unwrap_or("");
    let head = format!("{:>w$} ", name, w = gutter.saturating_sub(1));
    put(&mut line, 0, &head);

    line[gutter + column(seq.completion, width)] = COMPLETION;
    line[total - 1] = '>';

    for event in &seq.events {
        let col = gutter + column(event.t, width);
        line[col] = MARBLE;

        let text = event.value.to_string();
        let start = col.saturating_sub(text.chars().count() / 2);
        put(&mut labels, start, &text);

        if let Some(interval) = event.interval {
            let row = intervals.get_or_insert_with(|| vec![' '; total]);
            let end = gutter + column(interval.end, width);
            let (a, b) = if col <= end { (col, end) } else { (end, col) };
            for cell in row.iter_mut().take(b + 1).skip(a) {
                *cell = '-';
            }
            row[a] = COMPLETION;
            row[b] = COMPLETION;
        }
    }

    let mut rows = vec![trimmed(&labels), trimmed(&line)];
    if let Some(row) = intervals {
        rows.push(trimmed(&row));
    }
    rows
}

/// Write `text` into `buf` at `start`, growing the buffer if needed
fn put(buf: &mut Vec<char>, start: usize, text: &str) {
    for (i, c) in text.chars().enumerate() {
        let pos = start + i;
        if pos >= buf.len() {
            buf.resize(pos + 1, ' ');
        }
        buf[pos] = c;
    }
}

fn trimmed(buf: &[char]) -> String {
    buf.iter().collect::<String>().trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use marble_engine::{fixtures, Event};

    #[test]
    fn test_column() {
        assert_eq!(column(0.0, 60), 0);
        assert_eq!(column(0.5, 60), 30);
        assert_eq!(column(1.0, 60), 60);
        assert_eq!(column(1.7, 60), 60);
        assert_eq!(column(-0.2, 60), 0);
        assert_eq!(column(f64::NAN, 60), 0);
    }

    #[test]
    fn test_render_sequence() {
        let seq = EventSequence::source("p", vec![Event::new(0.0, "a"), Event::new(0.5, "b")], 0.8);
        let rows = render_sequence(&seq, 10, 3);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], "   a    b");
        assert_eq!(rows[1], " p o----o--|-->");
    }

    #[test]
    fn test_render_interval() {
        let seq = EventSequence::source("p", vec![Event::new(0.2, "a").with_interval(0.5)], 1.0);
        let rows = render_sequence(&seq, 10, 2);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], "    |--|");
    }

    #[test]
    fn test_render_merge_demo() {
        let node = fixtures::demo("merge").unwrap();
        let text = render_node(&node, 60);

        assert!(text.contains("[ p.merge(q) ]"));
        let timelines: Vec<&str> = text.lines().filter(|l| l.ends_with('>')).collect();
        assert_eq!(timelines.len(), 3);
        assert!(timelines[0].starts_with(" p "));
        assert!(timelines[1].starts_with(" q "));
        assert_eq!(timelines[2].matches(MARBLE).count(), 7);
    }
}
