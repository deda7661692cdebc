//! Text Serialization
//!
//! Line oriented, pre-order encoding of a tree. Every node is written as
//!
//! ```text
//! <condition>            "-1" when the node has no incoming test, else "<index> <op> <value>"
//! <class label>
//! <distribution size>
//! <label> <count>        one line per distribution entry
//! <child count>          0 for a leaf
//! <children ...>         the records of each child, in order
//! ```
//!
//! The reader consumes exactly the lines the writer produced for each subtree.
//! Labels and discrete values containing a line break cannot be represented
//! and are rejected before anything is written.
use crate::attribute::Attribute;
use crate::condition::{Comparison, DecisionCondition};
use crate::constants::ROOT_CONDITION;
use crate::distribution::DiscreteDistribution;
use crate::errors::DecisionTreeError;
use crate::node::{DecisionNode, NodeType};
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// Cursor over the lines of a text input that tracks the current line number.
pub struct LineReader<R: BufRead> {
    lines: io::Lines<R>,
    line: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        LineReader {
            lines: reader.lines(),
            line: 0,
        }
    }

    /// Number of the last line returned, starting at 1.
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// Next line, running out of input is a malformed input error.
    pub fn next_line(&mut self) -> Result<String, DecisionTreeError> {
        match self.lines.next() {
            Some(Ok(l)) => {
                self.line += 1;
                Ok(l)
            }
            Some(Err(e)) => Err(DecisionTreeError::UnableToRead(e.to_string())),
            None => Err(DecisionTreeError::malformed(self.line + 1, "unexpected end of input")),
        }
    }

    /// Next line parsed as a non-negative count.
    pub fn next_count(&mut self, what: &str) -> Result<usize, DecisionTreeError> {
        let l = self.next_line()?;
        l.trim()
            .parse::<usize>()
            .map_err(|_| DecisionTreeError::malformed(self.line, format!("expected {}, found {:?}", what, l)))
    }

    pub fn malformed(&self, reason: impl Into<String>) -> DecisionTreeError {
        DecisionTreeError::malformed(self.line, reason)
    }
}

fn check_single_line(value: &str, what: &str) -> Result<(), DecisionTreeError> {
    if value.contains(['\n', '\r']) {
        return Err(DecisionTreeError::InvalidParameter(
            what.to_string(),
            "a value without line breaks".to_string(),
            format!("{:?}", value),
        ));
    }
    Ok(())
}

/// Check that every record reachable from `node` fits on its lines.
fn check_node(node: &DecisionNode) -> Result<(), DecisionTreeError> {
    if let Some(value) = node.condition.as_ref().and_then(|c| c.value.as_discrete()) {
        check_single_line(value, "condition value")?;
    }
    check_single_line(&node.class_label, "class label")?;
    for (label, _) in node.distribution.iter() {
        check_single_line(label, "distribution label")?;
    }
    if node.is_leaf() {
        return Ok(());
    }
    node.children.iter().try_for_each(check_node)
}

fn write_distribution<W: Write>(w: &mut W, distribution: &DiscreteDistribution) -> io::Result<()> {
    writeln!(w, "{}", distribution.size())?;
    for (label, count) in distribution.iter() {
        writeln!(w, "{} {}", label, count)?;
    }
    Ok(())
}

pub fn read_distribution<R: BufRead>(reader: &mut LineReader<R>) -> Result<DiscreteDistribution, DecisionTreeError> {
    let size = reader.next_count("distribution size")?;
    let mut distribution = DiscreteDistribution::new();
    for _ in 0..size {
        let l = reader.next_line()?;
        let (label, count) = l
            .rsplit_once(' ')
            .ok_or_else(|| reader.malformed(format!("expected \"<label> <count>\", found {:?}", l)))?;
        let count = count
            .parse::<usize>()
            .map_err(|_| reader.malformed(format!("invalid count {:?}", count)))?;
        distribution.add_count(label, count);
    }
    Ok(distribution)
}

fn write_condition<W: Write>(w: &mut W, condition: Option<&DecisionCondition>) -> io::Result<()> {
    match condition {
        Some(c) => writeln!(w, "{}", c),
        None => writeln!(w, "{}", ROOT_CONDITION),
    }
}

fn read_condition<R: BufRead>(reader: &mut LineReader<R>) -> Result<Option<DecisionCondition>, DecisionTreeError> {
    let l = reader.next_line()?;
    if l.trim() == ROOT_CONDITION {
        return Ok(None);
    }
    let mut items = l.splitn(3, ' ');
    let (index, op, value) = match (items.next(), items.next(), items.next()) {
        (Some(i), Some(o), Some(v)) => (i, o, v),
        _ => return Err(reader.malformed(format!("expected \"<index> <op> <value>\", found {:?}", l))),
    };
    let attribute_index = index
        .parse::<usize>()
        .map_err(|_| reader.malformed(format!("invalid attribute index {:?}", index)))?;
    let comparison = Comparison::from_str(op).map_err(|e| reader.malformed(e.to_string()))?;
    let value = match comparison {
        Comparison::Equal => Attribute::Discrete(value.to_string()),
        Comparison::LessOrEqual | Comparison::Greater => value
            .trim()
            .parse::<f64>()
            .map(Attribute::Continuous)
            .map_err(|_| reader.malformed(format!("invalid threshold {:?}", value)))?,
    };
    Ok(Some(DecisionCondition {
        attribute_index,
        comparison,
        value,
    }))
}

/// Write `node` and, unless it is tagged as a leaf, its children.
///
/// The whole subtree is checked first, so nothing is written for a tree that
/// could not be read back.
pub fn write_node<W: Write>(w: &mut W, node: &DecisionNode) -> Result<(), DecisionTreeError> {
    check_node(node)?;
    write_record(w, node).map_err(|e| DecisionTreeError::UnableToWrite(e.to_string()))
}

fn write_record<W: Write>(w: &mut W, node: &DecisionNode) -> io::Result<()> {
    write_condition(w, node.condition.as_ref())?;
    writeln!(w, "{}", node.class_label)?;
    write_distribution(w, &node.distribution)?;
    if node.is_leaf() {
        writeln!(w, "0")
    } else {
        writeln!(w, "{}", node.children.len())?;
        for child in &node.children {
            write_record(w, child)?;
        }
        Ok(())
    }
}

/// Read one node record and, recursively, the records of its children.
pub fn read_node<R: BufRead>(reader: &mut LineReader<R>) -> Result<DecisionNode, DecisionTreeError> {
    let condition = read_condition(reader)?;
    let class_label = reader.next_line()?;
    let distribution = read_distribution(reader)?;
    let n_children = reader.next_count("child count")?;
    let mut children = Vec::with_capacity(n_children);
    for _ in 0..n_children {
        children.push(read_node(reader)?);
    }
    let node_type = if children.is_empty() {
        NodeType::Leaf
    } else {
        NodeType::Internal
    };
    Ok(DecisionNode {
        condition,
        node_type,
        class_label,
        distribution,
        children,
    })
}
