use prattle_core::ParseNode;

use super::builder::ExpressionNodeBuilder;
use super::{ExpressionPattern, Fixity, OperatorInfo};
use crate::context::ParserContext;
use crate::error::ParseError;
use crate::trace::Tracer;

impl ExpressionPattern {
    pub(crate) fn try_match<T: Tracer>(&self, ctx: &mut ParserContext<'_, T>) -> Option<ParseNode> {
        // A nested expression has its own continuation point.
        let outer_probe = ctx.set_probe(None);
        let result = self.climb(ctx);
        ctx.set_probe(outer_probe);
        result
    }

    fn climb<'p, T: Tracer>(&'p self, ctx: &mut ParserContext<'_, T>) -> Option<ParseNode> {
        let mut stack: Vec<ExpressionNodeBuilder<'p>> = Vec::new();
        let mut operand: Option<ParseNode> = None;
        let mut last_empty: Option<usize> = None;

        loop {
            let want_operand = operand.is_none();
            let probe_at = if want_operand {
                None
            } else {
                Some(ctx.peek_past_trivia())
            };
            ctx.set_probe(probe_at);

            let before = ctx.offset();
            let matched = self.match_operator(ctx, want_operand);
            ctx.set_probe(None);
            if ctx.is_aborted() {
                return None;
            }
            let Some((op, mid)) = matched else {
                return Self::reduce_all(ctx, stack, operand);
            };

            // An empty prefix or postfix match leaves the loop in the same
            // state, as do two empty matches in a row.
            let empty = ctx.offset() == before;
            let repeats = matches!(op.fixity(), Fixity::Prefix | Fixity::Postfix)
                || last_empty == Some(before);
            if empty && repeats {
                ctx.abort(ParseError::ZeroLengthMatch { offset: before });
                return None;
            }
            last_empty = empty.then_some(before);
            ctx.tracer().trace_operator(&op.name, mid.offset());

            let mut left = operand.take();
            if let Some(mut current) = left.take() {
                while let Some(top) = stack.pop_if(|top| top.op.is_evaluated_before(op)) {
                    ctx.tracer().trace_reduce(&top.op.name);
                    current = top.complete(Some(current));
                }
                left = Some(current);
            }

            let builder = ExpressionNodeBuilder::new(op, mid, left);
            if builder.needs_right() {
                stack.push(builder);
            } else {
                ctx.tracer().trace_reduce(&op.name);
                operand = Some(builder.complete(None));
            }
        }
    }

    /// First operator of the wanted kind whose pattern matches, in table order.
    fn match_operator<'p, T: Tracer>(
        &'p self,
        ctx: &mut ParserContext<'_, T>,
        want_operand: bool,
    ) -> Option<(&'p OperatorInfo, ParseNode)> {
        self.operators
            .iter()
            .filter(|op| op.fixity().takes_left() != want_operand)
            .find_map(|op| op.pattern.try_match(ctx).map(|mid| (op, mid)))
    }

    /// No operator continues the expression: complete everything pending.
    fn reduce_all<T: Tracer>(
        ctx: &mut ParserContext<'_, T>,
        mut stack: Vec<ExpressionNodeBuilder<'_>>,
        mut operand: Option<ParseNode>,
    ) -> Option<ParseNode> {
        while let Some(top) = stack.pop() {
            let Some(right) = operand.take() else {
                let offset = ctx.peek_past_trivia();
                ctx.expect_term(offset);
                return None;
            };
            ctx.tracer().trace_reduce(&top.op.name);
            operand = Some(top.complete(Some(right)));
        }

        if operand.is_none() {
            let offset = ctx.peek_past_trivia();
            ctx.expect_term(offset);
        }
        operand
    }
}
