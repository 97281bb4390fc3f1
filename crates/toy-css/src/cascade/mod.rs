//! CSS Cascading and Style Computation
//!
//! This module implements a reduced form of
//! [CSS Cascading and Inheritance Level 4](https://www.w3.org/TR/css-cascade-4/):
//! rules are ordered by the kind of their single simple selector, then
//! folded into a per-node property map. There is no inheritance, no
//! `!important` and no origin or layer ordering.

#[cfg(feature = "cascade-trace")]
use std::cell::Cell;

use serde::Serialize;

use crate::parser::{Rule, Stylesheet};
use crate::style::{DisplayType, default_display_for_tag, parse_display_value};
use crate::values::{PropertyMap, Value};
use toy_dom::{ToyNode, ToyNodeType};

#[cfg(feature = "cascade-trace")]
thread_local! {
    static CASCADE_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// [§ 6.4.3 Specificity](https://www.w3.org/TR/css-cascade-4/#cascade-specificity)
///
/// Returns a new stylesheet in which every rule has exactly one selector,
/// ordered by ascending specificity: universal, then tag, then class, then
/// id. A rule with several selectors becomes one rule per selector, each
/// carrying the full declaration list.
///
/// The sort is stable, so rules of equal specificity keep their source
/// order and the later one wins when declarations are folded.
#[must_use]
pub fn sort_by_specificity(stylesheet: &Stylesheet) -> Stylesheet {
    let mut split: Vec<_> = stylesheet
        .rules
        .iter()
        .flat_map(|rule| {
            rule.selectors.iter().map(|selector| {
                (
                    selector.specificity(),
                    Rule {
                        selectors: vec![selector.clone()],
                        declarations: rule.declarations.clone(),
                    },
                )
            })
        })
        .collect();

    split.sort_by_key(|(specificity, _)| *specificity);

    Stylesheet {
        rules: split.into_iter().map(|(_, rule)| rule).collect(),
    }
}

/// [§ 6 Cascading](https://www.w3.org/TR/css-cascade-4/#cascading)
/// "The cascade takes an unordered list of declared values for a given property
/// on a given element, sorts them by their declaration's precedence..."
///
/// Build the styled tree for `root`. The stylesheet is sorted once here and
/// the sorted copy is shared by every node.
#[must_use]
pub fn build_styled_tree<'a>(root: &'a ToyNode, stylesheet: &Stylesheet) -> StyledNode<'a> {
    let sorted = sort_by_specificity(stylesheet);
    StyledNode::new(root, &sorted)
}

/// A document node paired with the declarations that apply to it.
///
/// The styled tree mirrors the node tree exactly: same shape, same child
/// order, one styled node per document node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyledNode<'a> {
    node: &'a ToyNodeType,
    specific_values: PropertyMap,
    children: Vec<StyledNode<'a>>,
}

impl<'a> StyledNode<'a> {
    /// Match every rule of an already-sorted stylesheet against `node`, then
    /// recurse into the children in document order.
    fn new(node: &'a ToyNode, sorted: &Stylesheet) -> Self {
        #[cfg(feature = "cascade-trace")]
        let depth = CASCADE_DEPTH.with(Cell::get);

        let mut specific_values = PropertyMap::new();
        for rule in &sorted.rules {
            if !rule
                .selectors
                .iter()
                .any(|selector| selector.matches(&node.node_type))
            {
                continue;
            }

            #[cfg(feature = "cascade-trace")]
            trace_match(depth, &node.node_type, rule);

            // Later rules overwrite earlier ones property by property.
            for declaration in &rule.declarations {
                let _ = specific_values.insert(declaration.name.clone(), declaration.value.clone());
            }
        }

        #[cfg(feature = "cascade-trace")]
        CASCADE_DEPTH.with(|d| d.set(depth + 1));

        let children = node
            .children
            .iter()
            .map(|child| Self::new(child, sorted))
            .collect();

        #[cfg(feature = "cascade-trace")]
        CASCADE_DEPTH.with(|d| d.set(depth));

        Self {
            node: &node.node_type,
            specific_values,
            children,
        }
    }

    /// The document node this styled node was built from.
    #[must_use]
    pub const fn node(&self) -> &'a ToyNodeType {
        self.node
    }

    /// Styled children, in document order.
    #[must_use]
    pub fn children(&self) -> &[StyledNode<'a>] {
        &self.children
    }

    /// Every property that a matching rule declared for this node.
    #[must_use]
    pub const fn specific_values(&self) -> &PropertyMap {
        &self.specific_values
    }

    /// The element's tag name, or `None` for a text node.
    #[must_use]
    pub fn tag_name(&self) -> Option<&'a str> {
        self.node.as_element().map(|element| element.tag_name.as_str())
    }

    /// The value declared for `name`, if any.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.specific_values.get(name)
    }

    /// The value of `name`, else the value of `fallback`, else `default`.
    ///
    /// Used for shorthand/longhand pairs such as `margin-left` / `margin`.
    #[must_use]
    pub fn lookup(&self, name: &str, fallback: &str, default: &Value) -> Value {
        self.value(name)
            .or_else(|| self.value(fallback))
            .cloned()
            .unwrap_or_else(|| default.clone())
    }

    /// [§ 2 Box Layout Modes](https://www.w3.org/TR/css-display-3/#the-display-properties)
    ///
    /// The declared `display` when it is a recognized keyword, else the
    /// tag's default, else `inline`.
    #[must_use]
    pub fn display(&self) -> DisplayType {
        if let Some(display) = self.value("display").and_then(parse_display_value) {
            return display;
        }
        self.tag_name()
            .and_then(default_display_for_tag)
            .unwrap_or(DisplayType::Inline)
    }
}

#[cfg(feature = "cascade-trace")]
fn trace_match(depth: usize, node: &ToyNodeType, rule: &Rule) {
    let selectors = rule
        .selectors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let target = match node {
        ToyNodeType::Element(element) => element.tag_name.as_str(),
        ToyNodeType::Text(_) => "#text",
    };
    eprintln!(
        "[CASCADE] {:indent$}<{target}> matched '{selectors}' ({} declarations)",
        "",
        rule.declarations.len(),
        indent = depth * 2
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use crate::selector::Selector;
    use toy_dom::{AttributesMap, attrs, elem, text};

    fn parse_css(css: &str) -> Stylesheet {
        parse(css).expect("test stylesheet should parse")
    }

    #[test]
    fn test_sort_splits_multi_selector_rules() {
        let sorted = sort_by_specificity(&parse_css("#a, p, .b { color: red }"));
        let selectors: Vec<_> = sorted
            .rules
            .iter()
            .map(|rule| rule.selectors.clone())
            .collect();
        assert_eq!(
            selectors,
            vec![
                vec![Selector::Tag("p".to_string())],
                vec![Selector::Class("b".to_string())],
                vec![Selector::Id("a".to_string())],
            ]
        );
        assert!(sorted.rules.iter().all(|rule| rule.declarations.len() == 1));
    }

    #[test]
    fn test_sort_is_stable_within_specificity() {
        let sorted = sort_by_specificity(&parse_css(".x { a: 1 } p { b: 2 } .y { c: 3 }"));
        let names: Vec<_> = sorted
            .rules
            .iter()
            .map(|rule| rule.selectors[0].to_string())
            .collect();
        assert_eq!(names, vec!["p", ".x", ".y"]);
    }

    #[test]
    fn test_id_beats_class_regardless_of_order() {
        let sheet = parse_css("#main { color: blue } .note { color: red }");
        let root = elem("div", attrs([("id", "main"), ("class", "note")]), vec![]);
        let styled = build_styled_tree(&root, &sheet);
        assert_eq!(styled.value("color"), Some(&Value::keyword("blue")));
    }

    #[test]
    fn test_children_mirror_tree() {
        let root = elem(
            "div",
            AttributesMap::new(),
            vec![text("a"), elem("span", AttributesMap::new(), vec![]), text("b")],
        );
        let styled = build_styled_tree(&root, &Stylesheet::default());
        assert_eq!(styled.children().len(), 3);
        assert_eq!(styled.children()[1].tag_name(), Some("span"));
        assert_eq!(styled.children()[0].tag_name(), None);
    }

    #[test]
    fn test_lookup_falls_back() {
        let sheet = parse_css("p { margin: 4px; margin-left: 8px }");
        let root = elem("p", AttributesMap::new(), vec![]);
        let styled = build_styled_tree(&root, &sheet);
        let zero = Value::Number(0.0);

        assert_eq!(
            styled.lookup("margin-left", "margin", &zero),
            Value::dimension(8.0, "px")
        );
        assert_eq!(
            styled.lookup("margin-top", "margin", &zero),
            Value::dimension(4.0, "px")
        );
        assert_eq!(styled.lookup("padding-top", "padding", &zero), zero);
    }

    #[test]
    fn test_display_resolution() {
        let sheet = parse_css(".shown { display: inline-block } div { display: none }");
        let root = elem(
            "body",
            AttributesMap::new(),
            vec![
                elem("span", AttributesMap::new(), vec![]),
                elem("span", attrs([("class", "shown")]), vec![]),
                elem("div", AttributesMap::new(), vec![]),
                text("hi"),
            ],
        );
        let styled = build_styled_tree(&root, &sheet);
        assert_eq!(styled.display(), DisplayType::Block);
        assert_eq!(styled.children()[0].display(), DisplayType::Inline);
        assert_eq!(styled.children()[1].display(), DisplayType::InlineBlock);
        assert_eq!(styled.children()[2].display(), DisplayType::None);
        assert_eq!(styled.children()[3].display(), DisplayType::Inline);
    }

    #[test]
    fn test_invalid_display_falls_through_to_tag_default() {
        let sheet = parse_css(".weird { display: 12px } .odd { display: sideways }");
        let root = elem(
            "div",
            AttributesMap::new(),
            vec![
                elem("div", attrs([("class", "weird")]), vec![]),
                elem("em", attrs([("class", "odd")]), vec![]),
            ],
        );
        let styled = build_styled_tree(&root, &sheet);
        assert_eq!(styled.children()[0].display(), DisplayType::Block);
        assert_eq!(styled.children()[1].display(), DisplayType::Inline);
    }
}
