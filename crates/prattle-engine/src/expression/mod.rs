//! Operator-precedence expression engine.
//!
//! An [`ExpressionPattern`] is a pattern like any other: it parses one
//! maximal expression from an operator table by precedence climbing over an
//! explicit stack of partially built operator applications.

mod builder;
mod engine;
mod operator;


pub use operator::{Fixity, OperatorInfo};

use crate::error::PatternError;

/// A compiled operator table.
#[derive(Debug, Clone)]
pub struct ExpressionPattern {
    operators: Vec<OperatorInfo>,
}

impl ExpressionPattern {
    pub fn new(operators: Vec<OperatorInfo>) -> Result<Self, PatternError> {
        if operators.is_empty() {
            return Err(PatternError::EmptyOperatorTable);
        }
        Ok(Self { operators })
    }

    /// Operators in table order, which is also the order they are tried in.
    pub fn operators(&self) -> &[OperatorInfo] {
        &self.operators
    }

    pub fn operator(&self, name: &str) -> Option<&OperatorInfo> {
        self.operators.iter().find(|op| op.name == name)
    }
}
