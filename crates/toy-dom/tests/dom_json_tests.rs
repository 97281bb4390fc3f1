//! Integration tests for loading node trees from JSON.

use toy_dom::{AttributesMap, DomError, ToyNode, ToyNodeType, attrs, elem, text};

#[test]
fn test_from_json_element_and_text() {
    let json = r#"{
        "nodeType": { "tagName": "div", "attributes": { "id": "main", "class": "a b" } },
        "children": [
            { "nodeType": "hello" },
            { "nodeType": { "tagName": "span" } }
        ]
    }"#;

    let tree = ToyNode::from_json(json).unwrap();
    let expected = elem(
        "div",
        attrs([("id", "main"), ("class", "a b")]),
        vec![text("hello"), elem("span", AttributesMap::new(), vec![])],
    );
    assert_eq!(tree, expected);
}

#[test]
fn test_from_json_text_root() {
    let tree = ToyNode::from_json(r#"{ "nodeType": "just text" }"#).unwrap();
    assert!(matches!(tree.node_type, ToyNodeType::Text(ref s) if s == "just text"));
    assert!(tree.children.is_empty());
}

#[test]
fn test_from_json_rejects_malformed_input() {
    let err = ToyNode::from_json(r#"{ "children": [] }"#).unwrap_err();
    assert!(matches!(err, DomError::Json(_)));
}

#[test]
fn test_from_json_rejects_empty_tag_name() {
    let json = r#"{
        "nodeType": { "tagName": "body" },
        "children": [ { "nodeType": { "tagName": "" } } ]
    }"#;
    let err = ToyNode::from_json(json).unwrap_err();
    match err {
        DomError::EmptyTagName { path } => assert_eq!(path, "root/0"),
        other => panic!("Expected EmptyTagName, got {other:?}"),
    }
}

#[test]
fn test_from_json_rejects_text_with_children() {
    let json = r#"{
        "nodeType": "text",
        "children": [ { "nodeType": "nested" } ]
    }"#;
    let err = ToyNode::from_json(json).unwrap_err();
    assert!(matches!(err, DomError::TextWithChildren { .. }));
}

#[test]
fn test_round_trip_through_serde() {
    let tree = elem("ul", AttributesMap::new(), vec![elem("li", attrs([("class", "x")]), vec![text("1")])]);
    let json = serde_json::to_string(&tree).unwrap();
    assert_eq!(ToyNode::from_json(&json).unwrap(), tree);
}
