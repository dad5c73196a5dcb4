use prattle_core::ParseNode;

use super::Pattern;
use crate::context::ParserContext;
use crate::trace::Tracer;

/// Names the result of its inner pattern.
#[derive(Debug, Clone)]
pub struct Label {
    name: String,
    inner: Box<Pattern>,
}

impl Label {
    pub fn new(name: impl Into<String>, inner: Pattern) -> Self {
        Self {
            name: name.into(),
            inner: Box::new(inner),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inner(&self) -> &Pattern {
        &self.inner
    }

    pub(crate) fn try_match<T: Tracer>(&self, ctx: &mut ParserContext<'_, T>) -> Option<ParseNode> {
        let offset = ctx.offset();
        let child = self.inner.try_match(ctx)?;
        Some(ParseNode::Label {
            offset,
            name: self.name.clone(),
            child: Box::new(child),
        })
    }
}
