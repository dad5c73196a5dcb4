//! S-expression rendering of expression trees.

use crate::ParseNode;

impl ParseNode {
    /// Render as an s-expression, e.g. `(+ 2 (* 3 4))`.
    ///
    /// An expression with sub-expressions prints `(op left mid... right)`,
    /// where the middle part is every expression reachable inside `mid`
    /// without crossing another expression. A leaf expression prints its text
    /// when `mid` is a single value, and its operator name otherwise.
    pub fn sexpr(&self) -> String {
        match self {
            ParseNode::Expression {
                op_name,
                left,
                mid,
                right,
                ..
            } => {
                let mut parts = Vec::new();
                if let Some(left) = left {
                    parts.push(left.sexpr());
                }
                let mut inner = Vec::new();
                collect_expressions(mid, &mut inner);
                parts.extend(inner.into_iter().map(ParseNode::sexpr));
                if let Some(right) = right {
                    parts.push(right.sexpr());
                }

                if parts.is_empty() {
                    return match mid.as_ref() {
                        ParseNode::Value { text, .. } => text.clone(),
                        _ => op_name.clone(),
                    };
                }
                format!("({op_name} {})", parts.join(" "))
            }
            node => {
                let mut inner = Vec::new();
                collect_expressions(node, &mut inner);
                if inner.is_empty() {
                    return node.values().join(" ");
                }
                inner
                    .into_iter()
                    .map(ParseNode::sexpr)
                    .collect::<Vec<_>>()
                    .join(" ")
            }
        }
    }
}

/// Outermost expressions below `node` (or `node` itself).
fn collect_expressions<'a>(node: &'a ParseNode, out: &mut Vec<&'a ParseNode>) {
    match node {
        ParseNode::Expression { .. } => {
            out.push(node);
            return;
        }
        ParseNode::Lookahead { .. } => return,
        _ => {}
    }
    for child in node.children() {
        collect_expressions(child, out);
    }
}
