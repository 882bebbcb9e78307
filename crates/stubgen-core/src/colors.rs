//! Terminal highlighting for rendered stubs.
//!
//! Each field is a role in the C# output rather than a hue:
//! - `declared`: names introduced by a type declaration
//! - `literal`: enum values, constants, parameter defaults
//! - `keyword`: the `namespace` keyword opening a block
//! - `comment`: the provenance header
//! - `sentinel`: the throwing expression inside stub bodies

/// ANSI escape codes per output role.
///
/// Files on disk are always rendered with [`Colors::OFF`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colors {
    pub declared: &'static str,
    pub literal: &'static str,
    pub keyword: &'static str,
    pub comment: &'static str,
    pub sentinel: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        declared: "\x1b[1;34m",
        literal: "\x1b[32m",
        keyword: "\x1b[35m",
        comment: "\x1b[2m",
        sentinel: "\x1b[31m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        declared: "",
        literal: "",
        keyword: "",
        comment: "",
        sentinel: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }

    /// `text` wrapped in `role` and a reset; unchanged when colors are off.
    pub fn paint(&self, role: &str, text: &str) -> String {
        if role.is_empty() {
            return text.to_string();
        }
        format!("{role}{text}{}", self.reset)
    }
}
