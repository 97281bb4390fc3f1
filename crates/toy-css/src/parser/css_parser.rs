//! CSS Parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
//!
//! "The input to the parsing stage is a stream of tokens from the tokenization stage."
//!
//! The grammar is the flat subset the style engine understands: a sequence
//! of style rules, each a comma-separated list of simple selectors followed
//! by a block of `name: value` declarations. Parsing stops at the first
//! error; no partial stylesheet is returned.

use serde::Serialize;

use super::error::{ParseError, ParseErrorKind};
use crate::selector::Selector;
use crate::tokenizer::{CSSToken, HashType, SourcePosition, Token};
use crate::values::{ColorValue, PropertyName, Value};

/// [§ 5.4.4 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-a-declaration)
///
/// A CSS declaration (e.g., `color: red`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration {
    /// The property name, lowercased.
    pub name: PropertyName,
    /// The declared value.
    pub value: Value,
}

/// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-a-qualified-rule)
///
/// A CSS style rule (selectors + declarations).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    /// The selectors, in source order. Never empty.
    pub selectors: Vec<Selector>,
    /// The declarations, in source order. May be empty.
    pub declarations: Vec<Declaration>,
}

/// [§ 5.3.2 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
///
/// A parsed CSS stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stylesheet {
    /// The list of rules in the stylesheet, in source order.
    pub rules: Vec<Rule>,
}

impl Stylesheet {
    /// Total number of declarations across all rules.
    #[must_use]
    pub fn declaration_count(&self) -> usize {
        self.rules.iter().map(|rule| rule.declarations.len()).sum()
    }
}

/// CSS parser
pub struct CSSParser {
    tokens: Vec<Token>,
    position: usize,
    end: SourcePosition,
}

impl CSSParser {
    /// Create a new parser from a list of tokens.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        let end = tokens
            .last()
            .map_or_else(SourcePosition::default, |token| token.position);
        Self {
            tokens,
            position: 0,
            end,
        }
    }

    /// [§ 5.3.3 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
    ///
    /// # Errors
    ///
    /// Returns the first syntax error encountered, positioned at the
    /// offending token.
    pub fn parse_stylesheet(&mut self) -> Result<Stylesheet, ParseError> {
        let mut rules = Vec::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                None | Some(CSSToken::EOF) => return Ok(Stylesheet { rules }),
                Some(CSSToken::AtKeyword(name)) => {
                    return Err(self.error(ParseErrorKind::UnsupportedAtRule(name.clone())));
                }
                Some(CSSToken::RightBrace) => {
                    return Err(self.error(ParseErrorKind::UnmatchedBrace));
                }
                Some(_) => rules.push(self.consume_rule()?),
            }
        }
    }

    /// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-a-qualified-rule)
    fn consume_rule(&mut self) -> Result<Rule, ParseError> {
        let selectors = self.consume_selector_list()?;
        let declarations = self.consume_declaration_block()?;
        Ok(Rule {
            selectors,
            declarations,
        })
    }

    /// [§ 5.1 Selector Lists](https://www.w3.org/TR/selectors-4/#selector-list)
    ///
    /// "A selector list is a comma-separated list of selectors."
    ///
    /// Consumes through the `{` that opens the declaration block.
    fn consume_selector_list(&mut self) -> Result<Vec<Selector>, ParseError> {
        let mut selectors = Vec::new();

        loop {
            self.skip_whitespace();
            selectors.push(self.consume_selector()?);

            // Anything glued to the selector makes it compound.
            match self.peek() {
                Some(CSSToken::Colon) => {
                    return Err(self.error(ParseErrorKind::UnsupportedSelector("pseudo-classes")));
                }
                Some(CSSToken::LeftBracket) => {
                    return Err(
                        self.error(ParseErrorKind::UnsupportedSelector("attribute selectors"))
                    );
                }
                Some(token) if starts_selector(token) => {
                    return Err(
                        self.error(ParseErrorKind::UnsupportedSelector("compound selectors"))
                    );
                }
                _ => {}
            }

            self.skip_whitespace();
            match self.peek() {
                Some(CSSToken::Comma) => {
                    let _ = self.consume();
                }
                Some(CSSToken::LeftBrace) => {
                    let _ = self.consume();
                    return Ok(selectors);
                }
                // Two selectors separated only by whitespace form a
                // descendant combinator.
                Some(token)
                    if matches!(token, CSSToken::Delim('>' | '+' | '~'))
                        || starts_selector(token) =>
                {
                    return Err(self.error(ParseErrorKind::UnsupportedSelector("combinators")));
                }
                None | Some(CSSToken::EOF) => {
                    return Err(self.error(ParseErrorKind::UnexpectedEof {
                        context: "selector list",
                    }));
                }
                Some(token) => {
                    return Err(self.error(ParseErrorKind::UnexpectedToken {
                        found: token.to_string(),
                        context: "selector list",
                    }));
                }
            }
        }
    }

    /// [§ 5 Elemental selectors](https://www.w3.org/TR/selectors-4/#elemental-selectors)
    fn consume_selector(&mut self) -> Result<Selector, ParseError> {
        let position = self.current_position();
        let fail = |kind| Err(ParseError::new(kind, position));

        match self.consume().cloned() {
            Some(CSSToken::Ident(name)) => Ok(Selector::Tag(name)),
            Some(CSSToken::Delim('*')) => Ok(Selector::Universal),
            // "The class selector is given as a full stop (. U+002E) immediately
            // followed by an identifier."
            Some(CSSToken::Delim('.')) => match self.peek() {
                Some(CSSToken::Ident(name)) => {
                    let name = name.clone();
                    let _ = self.consume();
                    Ok(Selector::Class(name))
                }
                Some(token) => Err(self.error(ParseErrorKind::UnexpectedToken {
                    found: token.to_string(),
                    context: "class selector",
                })),
                None => Err(self.error(ParseErrorKind::UnexpectedEof {
                    context: "class selector",
                })),
            },
            // "An ID selector is a hash (#, U+0023) immediately followed by the
            // ID value, which is an identifier."
            Some(CSSToken::Hash {
                value,
                hash_type: HashType::Id,
            }) => Ok(Selector::Id(value)),
            Some(CSSToken::Hash {
                value,
                hash_type: HashType::Unrestricted,
            }) => fail(ParseErrorKind::InvalidIdSelector(value)),
            Some(CSSToken::Comma | CSSToken::LeftBrace) => fail(ParseErrorKind::EmptySelector),
            Some(CSSToken::Colon) => fail(ParseErrorKind::UnsupportedSelector("pseudo-classes")),
            Some(CSSToken::LeftBracket) => {
                fail(ParseErrorKind::UnsupportedSelector("attribute selectors"))
            }
            Some(CSSToken::Delim('>' | '+' | '~')) => {
                fail(ParseErrorKind::UnsupportedSelector("combinators"))
            }
            None | Some(CSSToken::EOF) => fail(ParseErrorKind::UnexpectedEof {
                context: "selector",
            }),
            Some(token) => fail(ParseErrorKind::UnexpectedToken {
                found: token.to_string(),
                context: "selector",
            }),
        }
    }

    /// [§ 5.4.5 Consume a list of declarations](https://www.w3.org/TR/css-syntax-3/#consume-list-of-declarations)
    ///
    /// Consumes through the closing `}`.
    fn consume_declaration_block(&mut self) -> Result<Vec<Declaration>, ParseError> {
        let mut declarations = Vec::new();

        loop {
            self.skip_whitespace();
            let position = self.current_position();
            match self.peek() {
                Some(CSSToken::RightBrace) => {
                    let _ = self.consume();
                    return Ok(declarations);
                }
                // "<semicolon-token>: Do nothing."
                Some(CSSToken::Semicolon) => {
                    let _ = self.consume();
                }
                Some(CSSToken::Ident(name)) => {
                    let name = name.clone();
                    let _ = self.consume();
                    declarations.push(self.consume_declaration(&name, position)?);
                }
                Some(CSSToken::AtKeyword(name)) => {
                    return Err(self.error(ParseErrorKind::UnsupportedAtRule(name.clone())));
                }
                None | Some(CSSToken::EOF) => {
                    return Err(self.error(ParseErrorKind::UnexpectedEof {
                        context: "declaration block",
                    }));
                }
                Some(token) => {
                    return Err(self.error(ParseErrorKind::UnexpectedToken {
                        found: token.to_string(),
                        context: "declaration block",
                    }));
                }
            }
        }
    }

    /// [§ 5.4.6 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
    ///
    /// The property name has already been consumed.
    fn consume_declaration(
        &mut self,
        name: &str,
        position: SourcePosition,
    ) -> Result<Declaration, ParseError> {
        let name = PropertyName::new(name).ok_or_else(|| {
            ParseError::new(ParseErrorKind::InvalidPropertyName(name.to_string()), position)
        })?;

        // "While the next input token is a <whitespace-token>, consume the next input token."
        self.skip_whitespace();

        // "If the next input token is anything other than a <colon-token>,
        // this is a parse error."
        if self.peek() != Some(&CSSToken::Colon) {
            return Err(self.error(ParseErrorKind::MissingColon {
                property: name.to_string(),
            }));
        }
        let _ = self.consume();

        let value = self.consume_value(&name)?;
        Ok(Declaration { name, value })
    }

    /// Consume value components up to, but not including, the `;` or `}`
    /// that ends the declaration.
    fn consume_value(&mut self, property: &PropertyName) -> Result<Value, ParseError> {
        let mut components = Vec::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(CSSToken::Semicolon | CSSToken::RightBrace) => break,
                None | Some(CSSToken::EOF) => {
                    return Err(self.error(ParseErrorKind::UnexpectedEof {
                        context: "declaration value",
                    }));
                }
                Some(_) => components.push(self.consume_component()?),
            }
        }

        if components.len() > 1 {
            return Ok(Value::List(components));
        }
        components.pop().ok_or_else(|| {
            self.error(ParseErrorKind::EmptyValue {
                property: property.to_string(),
            })
        })
    }

    /// [§ 5.4.7 Consume a component value](https://www.w3.org/TR/css-syntax-3/#consume-component-value)
    fn consume_component(&mut self) -> Result<Value, ParseError> {
        let position = self.current_position();
        let fail = |kind| Err(ParseError::new(kind, position));

        match self.consume().cloned() {
            Some(CSSToken::Ident(keyword)) => Ok(Value::Keyword(keyword)),
            Some(CSSToken::Dimension { value, unit }) => Ok(Value::dimension(value, &unit)),
            Some(CSSToken::Percentage(value)) => Ok(Value::dimension(value, "%")),
            Some(CSSToken::Number(value)) => Ok(Value::Number(value)),
            Some(CSSToken::String(value)) => Ok(Value::String(value)),
            Some(CSSToken::Hash { value, .. }) => match ColorValue::from_hex(&value) {
                Some(color) => Ok(Value::Color(color)),
                None => fail(ParseErrorKind::InvalidColor(value)),
            },
            Some(CSSToken::Delim('!')) => fail(ParseErrorKind::ImportantNotSupported),
            Some(CSSToken::BadString) => fail(ParseErrorKind::UnexpectedToken {
                found: "unterminated string".to_string(),
                context: "declaration value",
            }),
            None | Some(CSSToken::EOF) => fail(ParseErrorKind::UnexpectedEof {
                context: "declaration value",
            }),
            Some(token) => fail(ParseErrorKind::UnexpectedToken {
                found: token.to_string(),
                context: "declaration value",
            }),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(CSSToken::is_whitespace) {
            let _ = self.consume();
        }
    }

    fn current_position(&self) -> SourcePosition {
        self.tokens
            .get(self.position)
            .map_or(self.end, |token| token.position)
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.current_position())
    }

    fn consume(&mut self) -> Option<&CSSToken> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(&token.token)
    }

    fn peek(&self) -> Option<&CSSToken> {
        self.tokens.get(self.position).map(|token| &token.token)
    }
}

/// Whether `token` can begin a simple selector.
const fn starts_selector(token: &CSSToken) -> bool {
    matches!(
        token,
        CSSToken::Ident(_) | CSSToken::Hash { .. } | CSSToken::Delim('*' | '.')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::CSSTokenizer;

    fn parse(css: &str) -> Result<Stylesheet, ParseError> {
        let mut tokenizer = CSSTokenizer::new(css);
        tokenizer.run();
        CSSParser::new(tokenizer.into_tokens()).parse_stylesheet()
    }

    #[test]
    fn test_parse_empty_input() {
        assert_eq!(parse("").unwrap(), Stylesheet::default());
        assert_eq!(parse("  /* nothing */ \n").unwrap(), Stylesheet::default());
    }

    #[test]
    fn test_parse_single_rule() {
        let sheet = parse("td{display:block}").unwrap();
        assert_eq!(sheet.rules.len(), 1);
        assert_eq!(sheet.rules[0].selectors, vec![Selector::Tag("td".to_string())]);
        assert_eq!(sheet.rules[0].declarations[0].name.as_str(), "display");
        assert_eq!(sheet.rules[0].declarations[0].value, Value::keyword("block"));
    }

    #[test]
    fn test_declaration_count() {
        let sheet = parse("a { color: red; margin: 0 } b {}").unwrap();
        assert_eq!(sheet.declaration_count(), 2);
    }

    #[test]
    fn test_error_position_points_at_token() {
        let err = parse("h1 {\n  color red;\n}").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::MissingColon {
                property: "color".to_string()
            }
        );
        assert_eq!(err.position.line, 2);
        assert_eq!(err.position.column, 9);
    }

    #[test]
    fn test_starts_selector() {
        assert!(starts_selector(&CSSToken::ident("div")));
        assert!(starts_selector(&CSSToken::Delim('.')));
        assert!(!starts_selector(&CSSToken::Comma));
    }
}
