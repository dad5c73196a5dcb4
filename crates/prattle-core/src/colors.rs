//! ANSI styling for dumps and traces.

/// Escape codes per role of the painted text. [`Colors::OFF`] paints nothing.
///
/// Only the 16-color codes are used, so output reads on light and dark
/// terminals alike.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colors {
    /// Rule, label and operator names.
    name: &'static str,
    /// Matched source text and terminal descriptions.
    text: &'static str,
    /// Offsets and structural markers.
    meta: &'static str,
    reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        name: "\x1b[34m",
        text: "\x1b[32m",
        meta: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        name: "",
        text: "",
        meta: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        *self != Self::OFF
    }

    pub fn name(&self, s: &str) -> String {
        self.paint(self.name, s)
    }

    pub fn text(&self, s: &str) -> String {
        self.paint(self.text, s)
    }

    pub fn meta(&self, s: &str) -> String {
        self.paint(self.meta, s)
    }

    fn paint(&self, code: &str, s: &str) -> String {
        if code.is_empty() {
            return s.to_string();
        }
        format!("{code}{s}{}", self.reset)
    }
}

#[cfg(test)]
mod tests {
    use super::Colors;

    #[test]
    fn off_leaves_text_alone() {
        let colors = Colors::new(false);
        assert!(!colors.is_enabled());
        assert_eq!(colors.name("expr"), "expr");
        assert_eq!(colors.meta("@3"), "@3");
    }

    #[test]
    fn on_wraps_each_role() {
        let colors = Colors::new(true);
        assert!(colors.is_enabled());
        assert_eq!(colors.name("expr"), "\x1b[34mexpr\x1b[0m");
        assert_eq!(colors.text("'+'"), "\x1b[32m'+'\x1b[0m");
        assert_eq!(colors.meta("@3"), "\x1b[2m@3\x1b[0m");
    }
}
