use crate::Pattern;

/// How an operator combines with its neighbours, derived from which
/// precedences it declares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fixity {
    /// No operands: literals, identifiers, parenthesized groups.
    Nullary,
    /// Operand on the right only.
    Prefix,
    /// Operand on the left only.
    Postfix,
    Infix,
}

impl Fixity {
    pub fn takes_left(self) -> bool {
        matches!(self, Self::Postfix | Self::Infix)
    }

    pub fn takes_right(self) -> bool {
        matches!(self, Self::Prefix | Self::Infix)
    }
}

/// One row of an operator table.
///
/// `pattern` matches the operator's own syntax (the part between its
/// operands) and may contain nested expressions through `Lookup`. Lower
/// precedence numbers bind tighter.
#[derive(Debug, Clone)]
pub struct OperatorInfo {
    pub name: String,
    pub pattern: Pattern,
    pub left_precedence: Option<u32>,
    pub right_precedence: Option<u32>,
}

impl OperatorInfo {
    pub fn new(
        name: impl Into<String>,
        left_precedence: Option<u32>,
        right_precedence: Option<u32>,
        pattern: Pattern,
    ) -> Self {
        Self {
            name: name.into(),
            pattern,
            left_precedence,
            right_precedence,
        }
    }

    pub fn nullary(name: impl Into<String>, pattern: Pattern) -> Self {
        Self::new(name, None, None, pattern)
    }

    pub fn prefix(name: impl Into<String>, right: u32, pattern: Pattern) -> Self {
        Self::new(name, None, Some(right), pattern)
    }

    pub fn postfix(name: impl Into<String>, left: u32, pattern: Pattern) -> Self {
        Self::new(name, Some(left), None, pattern)
    }

    pub fn infix(name: impl Into<String>, left: u32, right: u32, pattern: Pattern) -> Self {
        Self::new(name, Some(left), Some(right), pattern)
    }

    pub fn fixity(&self) -> Fixity {
        match (self.left_precedence, self.right_precedence) {
            (None, None) => Fixity::Nullary,
            (None, Some(_)) => Fixity::Prefix,
            (Some(_), None) => Fixity::Postfix,
            (Some(_), Some(_)) => Fixity::Infix,
        }
    }

    /// Whether `self`, waiting for its right operand, must be completed
    /// before `next` takes the current operand as its left.
    ///
    /// `next` is always infix or postfix, since only those follow an operand.
    /// Equal precedences reduce, which makes them left-associative.
    pub fn is_evaluated_before(&self, next: &OperatorInfo) -> bool {
        debug_assert!(next.fixity().takes_left(), "`{}` takes no left operand", next.name);
        match (self.right_precedence, next.left_precedence) {
            (Some(right), Some(left)) => right <= left,
            _ => true,
        }
    }
}
