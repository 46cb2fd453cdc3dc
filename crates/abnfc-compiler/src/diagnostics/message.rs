use std::ops::Range;

/// Diagnostic kinds ordered by category.
///
/// Parse errors come first, then the structural, name, reference and
/// range/repetition findings of the validator, then the resolver's cycle
/// report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Source text that is not ABNF
    UnexpectedToken,
    IndentedRule,
    ExpectedRuleName,
    ExpectedDefinedAs,
    ExpectedElement,
    ExpectedToken,
    UnclosedGroup,
    UnclosedOption,
    UnclosedLiteral,
    InvalidNumber,
    NumberTooLarge,
    InvalidEscape,
    ProseUnsupported,
    IncrementalWithoutBase,

    // Structural
    EmptyAlternation,
    EmptyConcatenation,
    EmptyElement,
    EmptyGroup,
    EmptyString,
    EmptyToken,

    // Names
    EmptyRuleName,
    InvalidRuleName,
    DuplicateRule,

    // References
    EmptyReference,
    UndefinedRule,

    // Ranges and repetitions
    InvalidRange,
    InvalidRepetition,
    ZeroRepetition,

    // Dependency order
    CircularDependency,
}

impl DiagnosticKind {
    /// Parse errors point into source text; everything else names a rule.
    pub fn is_parse_error(&self) -> bool {
        *self <= Self::IncrementalWithoutBase
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnexpectedToken => "unexpected token",
            Self::IndentedRule => "rule must start in the first column",
            Self::ExpectedRuleName => "expected rule name",
            Self::ExpectedDefinedAs => "expected `=` or `=/`",
            Self::ExpectedElement => "expected an element",
            Self::ExpectedToken => "unexpected input",
            Self::UnclosedGroup => "missing closing `)`",
            Self::UnclosedOption => "missing closing `]`",
            Self::UnclosedLiteral => "missing closing `\"`",
            Self::InvalidNumber => "invalid numeric value",
            Self::NumberTooLarge => "numeric value does not fit in a byte",
            Self::InvalidEscape => "invalid escape sequence",
            Self::ProseUnsupported => "prose values are not supported",
            Self::IncrementalWithoutBase => "`=/` extends an undefined rule",

            Self::EmptyAlternation => "alternation is empty",
            Self::EmptyConcatenation => "concatenation is empty",
            Self::EmptyElement => "element type is NONE",
            Self::EmptyGroup => "group is empty",
            Self::EmptyString => "string is empty",
            Self::EmptyToken => "token is empty",

            Self::EmptyRuleName => "rule name is empty",
            Self::InvalidRuleName => "bad characters in rule name",
            Self::DuplicateRule => "duplicate name",

            Self::EmptyReference => "rule reference is empty",
            Self::UndefinedRule => "rule not found",

            Self::InvalidRange => "bad range",
            Self::InvalidRepetition => "bad repetition",
            Self::ZeroRepetition => "repetition is zero",

            Self::CircularDependency => "has circular dependency",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::ExpectedToken => "expected {}".to_string(),
            Self::InvalidNumber => "invalid numeric value `{}`".to_string(),
            Self::NumberTooLarge => "`{}` does not fit in a byte".to_string(),
            Self::IncrementalWithoutBase => "`=/` extends undefined rule '{}'".to_string(),
            Self::UndefinedRule => "rule '{}' not found".to_string(),
            Self::CircularDependency => "has circular dependency with '{}'".to_string(),

            // 'lo' > 'hi'
            Self::InvalidRange | Self::InvalidRepetition => {
                format!("{} {{}}", self.fallback_message())
            }

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

/// One finding. `Display` renders the plain single-line form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// Rule the finding is attributed to.
    pub(crate) rule: Option<String>,
    /// Byte range in the source text, for parse errors.
    pub(crate) range: Option<Range<usize>>,
    pub(crate) message: String,
}

impl DiagnosticMessage {
    pub(crate) fn with_default_message(kind: DiagnosticKind) -> Self {
        Self {
            kind,
            rule: None,
            range: None,
            message: kind.fallback_message().to_string(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn rule(&self) -> Option<&str> {
        self.rule.as_deref()
    }

    pub fn range(&self) -> Option<Range<usize>> {
        self.range.clone()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.rule, &self.range) {
            // rule 'a' has circular dependency with 'b'
            (Some(rule), _) if self.kind == DiagnosticKind::CircularDependency => {
                write!(f, "rule '{}' {}", rule, self.message)
            }
            (Some(rule), _) => write!(f, "rule '{}': {}", rule, self.message),
            (None, Some(range)) => {
                write!(f, "error at {}..{}: {}", range.start, range.end, self.message)
            }
            (None, None) => write!(f, "error: {}", self.message),
        }
    }
}
