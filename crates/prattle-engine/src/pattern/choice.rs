use prattle_core::ParseNode;

use super::Pattern;
use crate::context::ParserContext;
use crate::error::PatternError;
use crate::trace::Tracer;

/// Ordered choice: the first alternative that matches wins.
#[derive(Debug, Clone)]
pub struct Choice {
    alternatives: Vec<Pattern>,
}

impl Choice {
    pub fn new(alternatives: Vec<Pattern>) -> Result<Self, PatternError> {
        if alternatives.is_empty() {
            return Err(PatternError::EmptyChoice);
        }
        Ok(Self { alternatives })
    }

    pub fn alternatives(&self) -> &[Pattern] {
        &self.alternatives
    }

    pub(crate) fn try_match<T: Tracer>(&self, ctx: &mut ParserContext<'_, T>) -> Option<ParseNode> {
        let offset = ctx.offset();
        for (chosen_index, alternative) in self.alternatives.iter().enumerate() {
            if let Some(child) = alternative.try_match(ctx) {
                return Some(ParseNode::Choice {
                    offset,
                    chosen_index,
                    child: Box::new(child),
                });
            }
            if ctx.is_aborted() {
                return None;
            }
            ctx.tracer().trace_backtrack(chosen_index, offset);
        }
        None
    }
}
