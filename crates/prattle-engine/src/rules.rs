use std::fmt;

use indexmap::IndexMap;

use crate::Pattern;

/// Name of the rule whose matches are skipped before every terminal.
pub const TRIVIA_RULE: &str = "_";

/// Named patterns of a grammar, in declaration order.
///
/// `Lookup` patterns resolve their keys here at match time, which is how
/// rules refer to each other (and to themselves) without cycles in memory.
#[derive(Debug, Clone, Default)]
pub struct Rules {
    rules: IndexMap<String, Pattern>,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a rule, returning the pattern it replaced.
    pub fn insert(&mut self, name: impl Into<String>, pattern: Pattern) -> Option<Pattern> {
        self.rules.insert(name.into(), pattern)
    }

    pub fn get(&self, name: &str) -> Option<&Pattern> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn trivia(&self) -> Option<&Pattern> {
        self.get(TRIVIA_RULE)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Pattern)> {
        self.rules.iter().map(|(name, pattern)| (name.as_str(), pattern))
    }
}

impl FromIterator<(String, Pattern)> for Rules {
    fn from_iter<I: IntoIterator<Item = (String, Pattern)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

/// One `name -> pattern` line per rule, in grammar-text form.
impl fmt::Display for Rules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, pattern) in self.iter() {
            writeln!(f, "{name} -> {pattern}")?;
        }
        Ok(())
    }
}
