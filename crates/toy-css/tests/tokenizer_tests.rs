//! Integration tests for the CSS tokenizer.

use toy_css::tokenizer::{CSSToken, CSSTokenizer, HashType, SourcePosition, Token};

fn tokenize(css: &str) -> Vec<Token> {
    let mut tokenizer = CSSTokenizer::new(css);
    tokenizer.run();
    tokenizer.into_tokens()
}

/// Token kinds only, without whitespace or positions.
fn kinds(css: &str) -> Vec<CSSToken> {
    tokenize(css)
        .into_iter()
        .map(|t| t.token)
        .filter(|t| !t.is_whitespace())
        .collect()
}

#[test]
fn test_simple_rule() {
    assert_eq!(
        kinds("td{display:block}"),
        vec![
            CSSToken::ident("td"),
            CSSToken::LeftBrace,
            CSSToken::ident("display"),
            CSSToken::Colon,
            CSSToken::ident("block"),
            CSSToken::RightBrace,
            CSSToken::EOF,
        ]
    );
}

#[test]
fn test_empty_input_is_just_eof() {
    let tokens = tokenize("");
    assert_eq!(tokens.len(), 1);
    assert!(tokens[0].token.is_eof());
    assert_eq!(
        tokens[0].position,
        SourcePosition {
            offset: 0,
            line: 1,
            column: 1
        }
    );
}

#[test]
fn test_hash_types() {
    assert_eq!(kinds("#main")[0], CSSToken::hash_id("main"));
    assert_eq!(kinds("#1a2b3c")[0], CSSToken::hash_unrestricted("1a2b3c"));
    assert!(matches!(
        kinds("#-x")[0],
        CSSToken::Hash {
            hash_type: HashType::Id,
            ..
        }
    ));
}

#[test]
fn test_numbers_and_dimensions() {
    assert_eq!(
        kinds("1em 1.5px 50% 0 -2 .5"),
        vec![
            CSSToken::dimension(1.0, "em"),
            CSSToken::dimension(1.5, "px"),
            CSSToken::Percentage(50.0),
            CSSToken::Number(0.0),
            CSSToken::Number(-2.0),
            CSSToken::Number(0.5),
            CSSToken::EOF,
        ]
    );
}

#[test]
fn test_no_exponent() {
    assert_eq!(kinds("1e3")[0], CSSToken::dimension(1.0, "e3"));
}

#[test]
fn test_class_selector_is_delim_then_ident() {
    assert_eq!(
        kinds(".foo"),
        vec![CSSToken::Delim('.'), CSSToken::ident("foo"), CSSToken::EOF]
    );
}

#[test]
fn test_comments_are_skipped() {
    assert_eq!(
        kinds("/* a */h1/* b */{}/* unterminated"),
        vec![
            CSSToken::ident("h1"),
            CSSToken::LeftBrace,
            CSSToken::RightBrace,
            CSSToken::EOF,
        ]
    );
}

#[test]
fn test_strings() {
    assert_eq!(kinds("\"a b\"")[0], CSSToken::String("a b".to_string()));
    assert_eq!(kinds("'say \"hi\"'")[0], CSSToken::String("say \"hi\"".to_string()));
    assert_eq!(kinds("\"unterminated")[0], CSSToken::String("unterminated".to_string()));
    assert_eq!(kinds("\"broken\nx")[0], CSSToken::BadString);
}

#[test]
fn test_at_keyword_and_delims() {
    assert_eq!(
        kinds("@media > !"),
        vec![
            CSSToken::AtKeyword("media".to_string()),
            CSSToken::Delim('>'),
            CSSToken::Delim('!'),
            CSSToken::EOF,
        ]
    );
}

#[test]
fn test_backslash_is_a_plain_delim() {
    assert_eq!(
        kinds("a\\b"),
        vec![
            CSSToken::ident("a"),
            CSSToken::Delim('\\'),
            CSSToken::ident("b"),
            CSSToken::EOF,
        ]
    );
}

#[test]
fn test_positions_track_lines_and_columns() {
    let tokens = tokenize("a {\n  b: c;\n}");
    let b = tokens
        .iter()
        .find(|t| t.token == CSSToken::ident("b"))
        .unwrap();
    assert_eq!(b.position.line, 2);
    assert_eq!(b.position.column, 3);
    assert_eq!(b.position.offset, 6);

    let close = tokens
        .iter()
        .find(|t| t.token == CSSToken::RightBrace)
        .unwrap();
    assert_eq!(close.position.line, 3);
    assert_eq!(close.position.column, 1);
}
