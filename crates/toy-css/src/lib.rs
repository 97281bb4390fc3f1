//! CSS tokenizer, parser, selector matching and cascade for the toy style engine.
//!
//! # Scope
//!
//! This crate implements:
//! - **CSS Tokenizer** ([§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization))
//!   - Ident, at-keyword, hash, string, number, percentage and dimension tokens
//!   - Comment handling
//!   - Source positions on every token
//!
//! - **CSS Parser** ([§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing))
//!   - Style rules with comma-separated selector lists
//!   - Declarations with keyword, dimension, number, color and string values
//!   - Positioned errors; the first error aborts the parse
//!
//! - **CSS Selectors** ([Selectors Level 4](https://www.w3.org/TR/selectors-4/))
//!   - Type, class, ID, and universal selectors
//!   - Specificity ordering
//!
//! - **CSS Cascade** ([CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/))
//!   - Specificity-based rule ordering
//!   - A styled tree mirroring the document tree
//!   - `display` resolution with per-tag defaults
//!
//! # Not Yet Implemented
//!
//! - Compound selectors and combinators
//! - Pseudo-classes, pseudo-elements and attribute selectors
//! - At-rules and `!important`
//! - Function values such as `rgb()`
//! - Inheritance and computed values

/// CSS cascade per [CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/).
pub mod cascade;
/// CSS parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
pub mod parser;
/// CSS selector matching per [Selectors Level 4](https://www.w3.org/TR/selectors-4/).
pub mod selector;
/// The `display` property per [CSS Display Level 3](https://www.w3.org/TR/css-display-3/).
pub mod style;
/// CSS tokenizer per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
pub mod tokenizer;
/// Declared values per [CSS Values Level 4](https://www.w3.org/TR/css-values-4/).
pub mod values;

// Re-exports for convenience
pub use cascade::{StyledNode, build_styled_tree, sort_by_specificity};
pub use parser::{CSSParser, Declaration, ParseError, ParseErrorKind, Rule, Stylesheet};
pub use selector::{Selector, Specificity};
pub use style::DisplayType;
pub use tokenizer::{CSSToken, CSSTokenizer, SourcePosition, Token};
pub use values::{ColorValue, PropertyMap, PropertyName, Value};

use toy_dom::{ToyNode, ToyNodeType};

/// [§ 5.3.3 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
///
/// Tokenize and parse CSS source text.
///
/// # Errors
///
/// Returns the first syntax error in `source`, positioned at the offending
/// token.
pub fn parse(source: &str) -> Result<Stylesheet, ParseError> {
    let mut tokenizer = CSSTokenizer::new(source);
    tokenizer.run();
    CSSParser::new(tokenizer.into_tokens()).parse_stylesheet()
}

/// [HTML Standard § 4.2.6 The style element](https://html.spec.whatwg.org/multipage/semantics.html#the-style-element)
///
/// Extract CSS text from all `<style>` elements in the tree, in document
/// order, one block per line.
#[must_use]
pub fn extract_style_content(root: &ToyNode) -> String {
    let mut css = String::new();
    collect_style_content(root, &mut css);
    css
}

/// Recursively collect CSS text from style elements.
fn collect_style_content(node: &ToyNode, css: &mut String) {
    match &node.node_type {
        ToyNodeType::Element(data) if data.tag_name.eq_ignore_ascii_case("style") => {
            for child in &node.children {
                if let Some(text) = child.node_type.as_text() {
                    css.push_str(text);
                    css.push('\n');
                }
            }
        }
        _ => {
            for child in &node.children {
                collect_style_content(child, css);
            }
        }
    }
}
