//! Parse tree visitor.
//!
//! # Usage
//!
//! Implement `Visitor` for your struct. Override `visit_*` methods to add logic.
//! Call `walk_*` within your override to continue recursion (or omit it to stop).
//!
//! ```
//! use prattle_core::{ParseNode, Visitor, walk_node};
//!
//! struct CountValues(usize);
//!
//! impl Visitor for CountValues {
//!     fn visit_value(&mut self, _offset: usize, _text: &str) {
//!         self.0 += 1;
//!     }
//! }
//!
//! let tree = ParseNode::Sequence {
//!     offset: 0,
//!     children: vec![ParseNode::value(0, "a"), ParseNode::value(2, "b")],
//! };
//! let mut counter = CountValues(0);
//! walk_node(&mut counter, &tree);
//! assert_eq!(counter.0, 2);
//! ```

use crate::ParseNode;

/// Borrowed view of an `Expression` node's fields.
#[derive(Clone, Copy, Debug)]
pub struct ExpressionView<'a> {
    pub offset: usize,
    pub op_name: &'a str,
    pub left: Option<&'a ParseNode>,
    pub mid: &'a ParseNode,
    pub right: Option<&'a ParseNode>,
}

impl<'a> ExpressionView<'a> {
    pub fn of(node: &'a ParseNode) -> Option<Self> {
        match node {
            ParseNode::Expression {
                offset,
                op_name,
                left,
                mid,
                right,
            } => Some(Self {
                offset: *offset,
                op_name,
                left: left.as_deref(),
                mid,
                right: right.as_deref(),
            }),
            _ => None,
        }
    }

    /// Nullary: neither operand present.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

pub trait Visitor: Sized {
    fn visit_node(&mut self, node: &ParseNode) {
        walk_node(self, node);
    }

    fn visit_value(&mut self, _offset: usize, _text: &str) {
        // Leaf node
    }

    fn visit_sequence(&mut self, _offset: usize, children: &[ParseNode]) {
        walk_nodes(self, children);
    }

    fn visit_choice(&mut self, _offset: usize, _chosen_index: usize, child: &ParseNode) {
        self.visit_node(child);
    }

    fn visit_quantifier(&mut self, _offset: usize, children: &[ParseNode]) {
        walk_nodes(self, children);
    }

    fn visit_label(&mut self, _offset: usize, _name: &str, child: &ParseNode) {
        self.visit_node(child);
    }

    fn visit_lookup(&mut self, _offset: usize, _key: &str, child: &ParseNode) {
        self.visit_node(child);
    }

    fn visit_lookahead(&mut self, _offset: usize, _child: Option<&ParseNode>) {
        // Zero-width probe, not part of the consumed structure
    }

    fn visit_expression(&mut self, expr: ExpressionView<'_>) {
        walk_expression(self, expr);
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, node: &ParseNode) {
    match node {
        ParseNode::Value { offset, text } => visitor.visit_value(*offset, text),
        ParseNode::Sequence { offset, children } => visitor.visit_sequence(*offset, children),
        ParseNode::Choice {
            offset,
            chosen_index,
            child,
        } => visitor.visit_choice(*offset, *chosen_index, child),
        ParseNode::Quantifier { offset, children } => visitor.visit_quantifier(*offset, children),
        ParseNode::Label {
            offset,
            name,
            child,
        } => visitor.visit_label(*offset, name, child),
        ParseNode::Lookup { offset, key, child } => visitor.visit_lookup(*offset, key, child),
        ParseNode::Lookahead { offset, child } => visitor.visit_lookahead(*offset, child.as_deref()),
        ParseNode::Expression {
            offset,
            op_name,
            left,
            mid,
            right,
        } => visitor.visit_expression(ExpressionView {
            offset: *offset,
            op_name,
            left: left.as_deref(),
            mid,
            right: right.as_deref(),
        }),
    }
}

pub fn walk_nodes<V: Visitor>(visitor: &mut V, nodes: &[ParseNode]) {
    for node in nodes {
        visitor.visit_node(node);
    }
}

pub fn walk_expression<V: Visitor>(visitor: &mut V, expr: ExpressionView<'_>) {
    if let Some(left) = expr.left {
        visitor.visit_node(left);
    }
    visitor.visit_node(expr.mid);
    if let Some(right) = expr.right {
        visitor.visit_node(right);
    }
}
