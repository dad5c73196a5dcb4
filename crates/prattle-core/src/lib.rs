#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for Prattle parse results.
//!
//! Every pattern match produces exactly one [`ParseNode`]. The tree is the
//! only contract between the matching engine and downstream consumers (AST
//! builders, printers), so it is kept small and closed:
//! - [`ParseNode`]: the tagged parse tree
//! - [`Visitor`]: pre-order traversal with overridable `visit_*` hooks
//! - [`Span`]: byte range into the parsed source
//! - [`Colors`]: ANSI palette shared by dumps and tracers

mod colors;
mod dump;
mod sexpr;
mod span;
mod tree;
mod visitor;


pub use colors::Colors;
pub use span::Span;
pub use tree::ParseNode;
pub use visitor::{ExpressionView, Visitor, walk_expression, walk_node, walk_nodes};
