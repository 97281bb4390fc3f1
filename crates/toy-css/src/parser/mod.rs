//! CSS parser module.

/// CSS parser implementation per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
pub mod css_parser;
/// Parse errors with source positions.
pub mod error;

pub use css_parser::{CSSParser, Declaration, Rule, Stylesheet};
pub use error::{ParseError, ParseErrorKind};
