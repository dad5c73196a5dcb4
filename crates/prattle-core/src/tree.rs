//! The parse tree produced by pattern matching.

use crate::Span;

/// Result of a successful pattern match.
///
/// Every variant carries the byte offset where its match started. A parent
/// exclusively owns its children; the tree never shares or cycles, even when
/// the grammar that produced it is recursive.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseNode {
    /// A matched terminal (regex or literal).
    Value { offset: usize, text: String },
    /// Kept results of a sequence, in order.
    Sequence {
        offset: usize,
        children: Vec<ParseNode>,
    },
    /// The first alternative of a choice that matched.
    Choice {
        offset: usize,
        chosen_index: usize,
        child: Box<ParseNode>,
    },
    /// Zero or more repetition results.
    Quantifier {
        offset: usize,
        children: Vec<ParseNode>,
    },
    /// A named capture.
    Label {
        offset: usize,
        name: String,
        child: Box<ParseNode>,
    },
    /// A named grammar rule was entered.
    Lookup {
        offset: usize,
        key: String,
        child: Box<ParseNode>,
    },
    /// Zero-width assertion. `child` is the probe result, if it matched.
    Lookahead {
        offset: usize,
        child: Option<Box<ParseNode>>,
    },
    /// Operator application built by the expression engine.
    ///
    /// `mid` is whatever the operator's own pattern matched.
    Expression {
        offset: usize,
        op_name: String,
        left: Option<Box<ParseNode>>,
        mid: Box<ParseNode>,
        right: Option<Box<ParseNode>>,
    },
}

impl ParseNode {
    pub fn value(offset: usize, text: impl Into<String>) -> Self {
        Self::Value {
            offset,
            text: text.into(),
        }
    }

    /// Byte offset where this match started.
    pub fn offset(&self) -> usize {
        match self {
            Self::Value { offset, .. }
            | Self::Sequence { offset, .. }
            | Self::Choice { offset, .. }
            | Self::Quantifier { offset, .. }
            | Self::Label { offset, .. }
            | Self::Lookup { offset, .. }
            | Self::Lookahead { offset, .. }
            | Self::Expression { offset, .. } => *offset,
        }
    }

    /// Variant name, as used in dumps.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Value { .. } => "Value",
            Self::Sequence { .. } => "Sequence",
            Self::Choice { .. } => "Choice",
            Self::Quantifier { .. } => "Quantifier",
            Self::Label { .. } => "Label",
            Self::Lookup { .. } => "Lookup",
            Self::Lookahead { .. } => "Lookahead",
            Self::Expression { .. } => "Expression",
        }
    }

    /// Direct children in source order.
    ///
    /// For expressions the order is left, mid, right.
    pub fn children(&self) -> impl Iterator<Item = &ParseNode> {
        let (list, single): (&[ParseNode], [Option<&ParseNode>; 3]) = match self {
            Self::Value { .. } => (&[], [None, None, None]),
            Self::Sequence { children, .. } | Self::Quantifier { children, .. } => {
                (children.as_slice(), [None, None, None])
            }
            Self::Choice { child, .. } | Self::Label { child, .. } | Self::Lookup { child, .. } => {
                (&[], [Some(child.as_ref()), None, None])
            }
            Self::Lookahead { child, .. } => (&[], [child.as_deref(), None, None]),
            Self::Expression {
                left, mid, right, ..
            } => (&[], [left.as_deref(), Some(mid.as_ref()), right.as_deref()]),
        };
        list.iter().chain(single.into_iter().flatten())
    }

    /// Matched text of a `Value`.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Value { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Strip any number of `Lookup` wrappers.
    pub fn unwrap_lookup(&self) -> &ParseNode {
        let mut node = self;
        while let Self::Lookup { child, .. } = node {
            node = child;
        }
        node
    }

    /// Child of the first `Label` named `name`, looking through sequences.
    ///
    /// Labels nested under choices, repetitions or rule lookups belong to a
    /// different structural level and are not searched.
    pub fn find_label(&self, name: &str) -> Option<&ParseNode> {
        match self {
            Self::Label {
                name: label, child, ..
            } if label == name => Some(child),
            Self::Sequence { children, .. } => {
                children.iter().find_map(|child| child.find_label(name))
            }
            _ => None,
        }
    }

    /// Texts of all consumed `Value` descendants, in source order.
    ///
    /// Lookahead probes consume nothing, so their contents are skipped.
    pub fn values(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_values(&mut out);
        out
    }

    fn collect_values<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Value { text, .. } => {
                out.push(text);
                return;
            }
            Self::Lookahead { .. } => return,
            _ => {}
        }
        for child in self.children() {
            child.collect_values(out);
        }
    }

    /// Span from this node's offset to the end of its last matched value.
    ///
    /// Zero-width matches at the end of a node are not visible in the tree,
    /// so this is a lower bound of the consumed span.
    pub fn extent(&self) -> Span {
        let start = self.offset();
        let end = self.last_value_end().unwrap_or(start).max(start);
        Span::new(start, end)
    }

    fn last_value_end(&self) -> Option<usize> {
        match self {
            Self::Value { offset, text } => Some(offset + text.len()),
            Self::Lookahead { .. } => None,
            _ => self.children().filter_map(Self::last_value_end).max(),
        }
    }
}
