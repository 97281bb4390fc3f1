//! CSS Selector matching and specificity
//!
//! Only the four simple selectors of
//! [Selectors Level 4 § 5-6](https://www.w3.org/TR/selectors-4/#elemental-selectors)
//! are supported. There are no compound selectors, combinators,
//! pseudo-classes or attribute selectors.

use core::fmt;

use serde::Serialize;
use toy_dom::ToyNodeType;

/// [§ 5 Elemental selectors](https://www.w3.org/TR/selectors-4/#elemental-selectors)
///
/// A simple selector is a single condition on an element.
///
/// Serializes as `{"type": "tag", "name": "h1"}`; the universal selector
/// has no name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "name", rename_all = "lowercase")]
pub enum Selector {
    /// [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
    /// "The universal selector is a single asterisk (*) and represents the
    /// qualified name of any element type."
    Universal,

    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    /// "A type selector is the name of a document language element type,
    /// and represents an instance of that element type in the document tree."
    ///
    /// Examples: `div`, `p`, `span`, `body`, `h1`
    Tag(String),

    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    /// "The class selector is given as a full stop (. U+002E) immediately
    /// followed by an identifier."
    ///
    /// Examples: `.highlight`, `.btn`, `.nav-item`
    Class(String),

    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    /// "An ID selector is a hash (#, U+0023) immediately followed by the
    /// ID value, which is an identifier."
    ///
    /// Examples: `#main`, `#header`, `#nav-bar`
    Id(String),
}

/// [§ 17 Calculating Specificity](https://www.w3.org/TR/selectors-4/#specificity-rules)
///
/// With one simple selector per rule, specificity collapses to the
/// selector's kind. Variants are declared in ascending precedence so the
/// derived ordering is the cascade ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Specificity {
    /// `*` - (0, 0, 0)
    Universal,
    /// `h1` - (0, 0, 1)
    Tag,
    /// `.foo` - (0, 1, 0)
    Class,
    /// `#aaa` - (1, 0, 0)
    Id,
}

impl Selector {
    /// The selector's precedence in the cascade.
    #[must_use]
    pub const fn specificity(&self) -> Specificity {
        match self {
            Self::Universal => Specificity::Universal,
            Self::Tag(_) => Specificity::Tag,
            Self::Class(_) => Specificity::Class,
            Self::Id(_) => Specificity::Id,
        }
    }

    /// [§ 4.1 Selector Matching](https://www.w3.org/TR/selectors-4/#match-a-selector-against-an-element)
    ///
    /// Text nodes match no selector.
    #[must_use]
    pub fn matches(&self, node: &ToyNodeType) -> bool {
        let Some(element) = node.as_element() else {
            return false;
        };

        match self {
            Self::Universal => true,
            Self::Tag(name) => element.tag_name == *name,
            // "An ID selector represents an element instance that has an
            // identifier that matches the identifier in the ID selector."
            Self::Id(name) => element.id() == Some(name.as_str()),
            // [§ 6.6](https://www.w3.org/TR/selectors-4/#class-html)
            // "...the class selector represents an element belonging to the
            // class identified by the identifier."
            Self::Class(name) => element.has_class(name),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Universal => write!(f, "*"),
            Self::Tag(name) => write!(f, "{name}"),
            Self::Class(name) => write!(f, ".{name}"),
            Self::Id(name) => write!(f, "#{name}"),
        }
    }
}
