/// Things the reader skips while still producing a unit.
///
/// Warnings leave a usable unit behind. Errors mean the unit no longer
/// covers what the descriptor set declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    /// Declaration with no source-level spelling; omitted from output.
    UnsupportedConstruct,
    /// Two members with the same signature key; later one dropped.
    DuplicateMember,
    /// Two types with the same name and arity in one scope; later one dropped.
    DuplicateType,
    /// Name that cannot be spelled as an identifier; declaration omitted.
    InvalidName,
}

impl DiagnosticKind {
    /// Default severity for this kind.
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::InvalidName => Severity::Error,
            _ => Severity::Warning,
        }
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnsupportedConstruct => "unsupported construct",
            Self::DuplicateMember => "duplicate member signature",
            Self::DuplicateType => "duplicate type declaration",
            Self::InvalidName => "invalid identifier",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::DuplicateMember => "duplicate member signature `{}`".to_string(),
            Self::DuplicateType => "`{}` is declared more than once".to_string(),
            Self::InvalidName => "`{}` is not a valid identifier".to_string(),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub kind: DiagnosticKind,
    /// Dotted path of the declaration the message is about.
    pub location: String,
    pub message: String,
}

impl DiagnosticMessage {
    pub(crate) fn new(
        kind: DiagnosticKind,
        location: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            location: location.into(),
            message: message.into(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, location: impl Into<String>) -> Self {
        Self::new(kind, location, kind.fallback_message())
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}: {}", self.severity(), self.location, self.message)
    }
}
