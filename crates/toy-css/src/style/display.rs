//! CSS Display property types and parsing
//!
//! [§ 2 Box Layout Modes: the display property](https://www.w3.org/TR/css-display-3/#the-display-properties)

use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::values::Value;
use toy_common::warning::warn_once;

/// [§ 2 Box Layout Modes](https://www.w3.org/TR/css-display-3/#the-display-properties)
///
/// The display types the layout stage distinguishes. Parses from and prints
/// as the CSS keyword, e.g. `"list-item"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayType {
    /// "The element generates an inline-level box when placed in flow layout."
    Inline,
    /// "The element generates a block-level box when placed in flow layout."
    Block,
    /// `inline-block`: inline outside, flow-root inside.
    InlineBlock,
    /// [§ 2.5 Generating Marker Boxes](https://www.w3.org/TR/css-display-3/#list-items)
    ListItem,
    /// "The element generates a block container box, and lays out its
    /// contents using flow layout. It always establishes a new block
    /// formatting context for its contents."
    FlowRoot,
    /// "The element lays out its contents using flex layout."
    Flex,
    /// `inline-flex`: inline outside, flex inside.
    InlineFlex,
    /// "The element lays out its contents using grid layout."
    Grid,
    /// `inline-grid`: inline outside, grid inside.
    InlineGrid,
    /// "The element lays out its contents using table layout."
    Table,
    /// [§ 2.7 Box Generation](https://www.w3.org/TR/css-display-3/#box-generation)
    /// "The element and its descendants generate no boxes or text runs."
    None,
}

/// Parse a declared `display` value.
///
/// Returns `None` for anything other than a recognized keyword; a warning
/// naming the value is printed once.
#[must_use]
pub fn parse_display_value(value: &Value) -> Option<DisplayType> {
    let parsed = value
        .as_keyword()
        .and_then(|keyword| keyword.parse::<DisplayType>().ok());
    if parsed.is_none() {
        warn_once("CSS", &format!("unsupported display value '{value}'"));
    }
    parsed
}

/// [§ 15.3.1 Hidden elements](https://html.spec.whatwg.org/multipage/rendering.html#hidden-elements)
/// and [§ 15.3.3 Flow content](https://html.spec.whatwg.org/multipage/rendering.html#flow-content-3)
///
/// The user-agent default display for an element with this tag name, or
/// `None` when the tag has no entry (the caller falls back to `inline`).
#[must_use]
pub fn default_display_for_tag(tag_name: &str) -> Option<DisplayType> {
    match tag_name.to_ascii_lowercase().as_str() {
        "html" | "body" | "div" | "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "ul" | "ol"
        | "dl" | "dt" | "dd" | "header" | "footer" | "main" | "nav" | "section" | "article"
        | "aside" | "blockquote" | "pre" | "form" | "hr" | "table" | "address" | "figure"
        | "figcaption" => Some(DisplayType::Block),
        // "li { display: list-item; }"
        "li" => Some(DisplayType::ListItem),
        // "The following elements must have their 'display' property set to 'none'."
        "head" | "script" | "style" | "title" | "meta" | "link" | "template" => {
            Some(DisplayType::None)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_type_keywords() {
        assert_eq!(DisplayType::ListItem.to_string(), "list-item");
        assert_eq!(DisplayType::InlineBlock.to_string(), "inline-block");
        assert_eq!("BLOCK".parse::<DisplayType>(), Ok(DisplayType::Block));
        assert_eq!("flex".parse::<DisplayType>(), Ok(DisplayType::Flex));
        assert_eq!(DisplayType::FlowRoot.to_string(), "flow-root");
        assert_eq!(DisplayType::InlineGrid.to_string(), "inline-grid");
        assert!("flexbox".parse::<DisplayType>().is_err());
    }

    #[test]
    fn test_parse_display_value() {
        assert_eq!(
            parse_display_value(&Value::keyword("none")),
            Some(DisplayType::None)
        );
        assert_eq!(parse_display_value(&Value::Number(1.0)), None);
        assert_eq!(
            parse_display_value(&Value::keyword("grid")),
            Some(DisplayType::Grid)
        );
        assert_eq!(parse_display_value(&Value::keyword("sideways")), None);
    }

    #[test]
    fn test_tag_defaults() {
        assert_eq!(default_display_for_tag("div"), Some(DisplayType::Block));
        assert_eq!(default_display_for_tag("H1"), Some(DisplayType::Block));
        assert_eq!(default_display_for_tag("li"), Some(DisplayType::ListItem));
        assert_eq!(default_display_for_tag("script"), Some(DisplayType::None));
        assert_eq!(default_display_for_tag("span"), None);
        assert_eq!(default_display_for_tag("custom-widget"), None);
    }
}
