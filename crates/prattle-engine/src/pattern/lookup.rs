use prattle_core::ParseNode;

use crate::context::ParserContext;
use crate::error::ParseError;
use crate::trace::Tracer;

/// Reference to a named rule, resolved when matched.
#[derive(Debug, Clone)]
pub struct Lookup {
    key: String,
}

impl Lookup {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn try_match<T: Tracer>(&self, ctx: &mut ParserContext<'_, T>) -> Option<ParseNode> {
        let offset = ctx.offset();
        let Some(pattern) = ctx.rules().get(&self.key) else {
            ctx.abort(ParseError::UndefinedRule {
                offset,
                name: self.key.clone(),
            });
            return None;
        };
        if !ctx.enter_rule() {
            return None;
        }

        ctx.tracer().trace_enter_rule(&self.key, offset);
        let child = pattern.try_match(ctx);
        ctx.exit_rule();
        let end = child.as_ref().map(|_| ctx.offset());
        ctx.tracer().trace_exit_rule(&self.key, end);

        Some(ParseNode::Lookup {
            offset,
            key: self.key.clone(),
            child: Box::new(child?),
        })
    }
}
