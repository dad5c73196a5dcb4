use prattle_core::ParseNode;

use super::Pattern;
use crate::context::ParserContext;
use crate::trace::Tracer;

/// Zero-width assertion on what follows the cursor.
///
/// Failures inside the probe are not recorded.
#[derive(Debug, Clone)]
pub struct Lookahead {
    inner: Box<Pattern>,
    want_success: bool,
}

impl Lookahead {
    pub fn new(inner: Pattern, want_success: bool) -> Self {
        Self {
            inner: Box::new(inner),
            want_success,
        }
    }

    pub fn inner(&self) -> &Pattern {
        &self.inner
    }

    /// `true` for `&`, `false` for `!`.
    pub fn want_success(&self) -> bool {
        self.want_success
    }

    pub(crate) fn try_match<T: Tracer>(&self, ctx: &mut ParserContext<'_, T>) -> Option<ParseNode> {
        let offset = ctx.offset();
        let probe = ctx.quietly(|ctx| self.inner.try_match(ctx));
        ctx.set_offset(offset);

        if ctx.is_aborted() || probe.is_some() != self.want_success {
            return None;
        }
        Some(ParseNode::Lookahead {
            offset,
            child: probe.map(Box::new),
        })
    }
}
