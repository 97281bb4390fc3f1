//! Parse errors.
//!
//! Parsing aborts at the first malformed construct; the error names what
//! went wrong and where.

use thiserror::Error;

use crate::tokenizer::SourcePosition;

/// A stylesheet could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at {position}")]
pub struct ParseError {
    /// What went wrong.
    pub kind: ParseErrorKind,
    /// Where the offending token starts.
    pub position: SourcePosition,
}

impl ParseError {
    /// Create a parse error at `position`.
    #[must_use]
    pub const fn new(kind: ParseErrorKind, position: SourcePosition) -> Self {
        Self { kind, position }
    }
}

/// The kinds of syntax error the parser reports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// A token that cannot appear here.
    #[error("unexpected {found} in {context}")]
    UnexpectedToken {
        /// The offending token, as displayed by the tokenizer.
        found: String,
        /// The construct being parsed.
        context: &'static str,
    },

    /// Input ended inside a rule, e.g. a `{` that is never closed.
    #[error("unexpected end of input in {context}")]
    UnexpectedEof {
        /// The construct being parsed.
        context: &'static str,
    },

    /// A `}` with no matching `{`.
    #[error("unmatched '}}'")]
    UnmatchedBrace,

    /// A property name not followed by `:`.
    #[error("expected ':' after property '{property}'")]
    MissingColon {
        /// The property being declared.
        property: String,
    },

    /// A selector list with a missing entry, e.g. `h1, { }` or `{ }`.
    #[error("empty selector")]
    EmptySelector,

    /// A declaration with nothing after the colon.
    #[error("empty value for property '{property}'")]
    EmptyValue {
        /// The property being declared.
        property: String,
    },

    /// Valid CSS selector syntax that the engine does not handle.
    #[error("unsupported selector syntax: {0}")]
    UnsupportedSelector(&'static str),

    /// An at-rule such as `@media`.
    #[error("unsupported at-rule '@{0}'")]
    UnsupportedAtRule(String),

    /// A `!important` annotation.
    #[error("'!important' is not supported")]
    ImportantNotSupported,

    /// A `#` value that is not a hex color.
    #[error("invalid color '#{0}'")]
    InvalidColor(String),

    /// An id selector whose name is not an identifier, e.g. `#1a`.
    #[error("invalid id selector '#{0}'")]
    InvalidIdSelector(String),

    /// A property name containing characters outside `[A-Za-z0-9_-]`.
    #[error("invalid property name '{0}'")]
    InvalidPropertyName(String),
}
