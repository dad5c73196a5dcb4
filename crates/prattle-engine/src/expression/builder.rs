use prattle_core::ParseNode;

use super::OperatorInfo;

/// An operator whose own syntax matched, waiting for its right operand.
pub(super) struct ExpressionNodeBuilder<'p> {
    pub op: &'p OperatorInfo,
    pub mid: ParseNode,
    pub left: Option<ParseNode>,
}

impl<'p> ExpressionNodeBuilder<'p> {
    pub fn new(op: &'p OperatorInfo, mid: ParseNode, left: Option<ParseNode>) -> Self {
        Self { op, mid, left }
    }

    /// Whether the operator takes an operand on its right.
    pub fn needs_right(&self) -> bool {
        self.op.fixity().takes_right()
    }

    pub fn complete(self, right: Option<ParseNode>) -> ParseNode {
        let offset = self
            .left
            .as_ref()
            .map_or(self.mid.offset(), ParseNode::offset);
        ParseNode::Expression {
            offset,
            op_name: self.op.name.clone(),
            left: self.left.map(Box::new),
            mid: Box::new(self.mid),
            right: right.map(Box::new),
        }
    }
}
