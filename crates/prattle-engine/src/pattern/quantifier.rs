use prattle_core::ParseNode;

use super::Pattern;
use crate::context::ParserContext;
use crate::error::{ParseError, PatternError};
use crate::trace::Tracer;

/// Greedy repetition, `min..=max` times. Never gives back matches.
#[derive(Debug, Clone)]
pub struct Quantifier {
    inner: Box<Pattern>,
    min: u32,
    max: Option<u32>,
}

impl Quantifier {
    pub fn new(inner: Pattern, min: u32, max: Option<u32>) -> Result<Self, PatternError> {
        if let Some(max) = max
            && min > max
        {
            return Err(PatternError::InvalidRepetition { min, max });
        }
        Ok(Self::unchecked(inner, min, max))
    }

    pub(crate) fn unchecked(inner: Pattern, min: u32, max: Option<u32>) -> Self {
        Self {
            inner: Box::new(inner),
            min,
            max,
        }
    }

    pub fn inner(&self) -> &Pattern {
        &self.inner
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> Option<u32> {
        self.max
    }

    pub(crate) fn try_match<T: Tracer>(&self, ctx: &mut ParserContext<'_, T>) -> Option<ParseNode> {
        let offset = ctx.offset();
        let mut children = Vec::new();

        while self.max.is_none_or(|max| children.len() < max as usize) {
            let before = ctx.offset();
            let Some(node) = self.inner.try_match(ctx) else {
                break;
            };
            // An unbounded loop that stops consuming would never end.
            if self.max.is_none() && ctx.offset() == before {
                ctx.abort(ParseError::ZeroLengthMatch { offset: before });
                return None;
            }
            children.push(node);
        }

        if ctx.is_aborted() || children.len() < self.min as usize {
            return None;
        }
        Some(ParseNode::Quantifier { offset, children })
    }
}
