//! Indented textual dump of a parse tree.
//!
//! One line per node: `Kind@offset` followed by the variant's payload.
//! Expression children are prefixed with their role (`left:`, `mid:`,
//! `right:`).

use crate::{Colors, ParseNode};

impl ParseNode {
    /// Plain dump, used by snapshot tests.
    pub fn dump(&self) -> String {
        self.dump_with(Colors::OFF)
    }

    pub fn dump_with(&self, colors: Colors) -> String {
        let mut out = String::new();
        dump_node(&mut out, self, 0, None, colors);
        out
    }
}

fn dump_node(out: &mut String, node: &ParseNode, depth: usize, role: Option<&str>, c: Colors) {
    let indent = "  ".repeat(depth);
    let role = role.map(|r| format!("{r}: ")).unwrap_or_default();
    let head = format!("{}@{}", node.kind_name(), node.offset());
    out.push_str(&format!("{indent}{role}{}", c.meta(&head)));

    match node {
        ParseNode::Value { text, .. } => {
            out.push_str(&format!(" {}\n", c.text(&format!("{text:?}"))));
        }
        ParseNode::Sequence { children, .. } | ParseNode::Quantifier { children, .. } => {
            out.push('\n');
            for child in children {
                dump_node(out, child, depth + 1, None, c);
            }
        }
        ParseNode::Choice {
            chosen_index,
            child,
            ..
        } => {
            out.push_str(&format!(" #{chosen_index}\n"));
            dump_node(out, child, depth + 1, None, c);
        }
        ParseNode::Label { name, child, .. } | ParseNode::Lookup { key: name, child, .. } => {
            out.push_str(&format!(" {}\n", c.name(name)));
            dump_node(out, child, depth + 1, None, c);
        }
        ParseNode::Lookahead { child, .. } => {
            out.push('\n');
            if let Some(child) = child {
                dump_node(out, child, depth + 1, None, c);
            }
        }
        ParseNode::Expression {
            op_name,
            left,
            mid,
            right,
            ..
        } => {
            out.push_str(&format!(" {}\n", c.name(op_name)));
            if let Some(left) = left {
                dump_node(out, left, depth + 1, Some("left"), c);
            }
            dump_node(out, mid, depth + 1, Some("mid"), c);
            if let Some(right) = right {
                dump_node(out, right, depth + 1, Some("right"), c);
            }
        }
    }
}
