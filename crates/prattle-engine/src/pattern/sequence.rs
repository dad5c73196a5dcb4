use prattle_core::ParseNode;

use super::Pattern;
use crate::context::ParserContext;
use crate::error::PatternError;
use crate::trace::Tracer;

/// One element of a sequence. Discarded steps must match but leave no child.
#[derive(Debug, Clone)]
pub struct Step {
    pub pattern: Pattern,
    pub keep: bool,
}

impl Step {
    pub fn keep(pattern: Pattern) -> Self {
        Self {
            pattern,
            keep: true,
        }
    }

    pub fn skip(pattern: Pattern) -> Self {
        Self {
            pattern,
            keep: false,
        }
    }
}

impl From<Pattern> for Step {
    fn from(pattern: Pattern) -> Self {
        Self::keep(pattern)
    }
}

/// All steps in order, or nothing.
#[derive(Debug, Clone)]
pub struct Sequence {
    steps: Vec<Step>,
}

impl Sequence {
    pub fn new(steps: Vec<Step>) -> Result<Self, PatternError> {
        if !steps.iter().any(|step| step.keep) {
            return Err(PatternError::AllStepsDiscarded);
        }
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub(crate) fn try_match<T: Tracer>(&self, ctx: &mut ParserContext<'_, T>) -> Option<ParseNode> {
        let offset = ctx.offset();
        let mut children = Vec::new();
        for step in &self.steps {
            let node = step.pattern.try_match(ctx)?;
            if step.keep {
                children.push(node);
            }
        }
        Some(ParseNode::Sequence { offset, children })
    }
}
