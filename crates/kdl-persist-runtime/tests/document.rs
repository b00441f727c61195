use kdl_persist_runtime::{parse_document, render_document, Entry, Node};
use proptest::prelude::*;

#[test]
fn arguments_become_values_and_blocks_become_fragments() {
    let root = parse_document(
        r#"
        label "hello"
        int_value 5
        ports 80 443
        audio {
            volume 0.5
        }
        marker
        "#,
    )
    .unwrap();

    assert_eq!(root.value("label"), Some("hello"));
    assert_eq!(root.value("int_value"), Some("5"));
    assert_eq!(root.joined_values("ports", ';').as_deref(), Some("80;443"));
    assert_eq!(root.child("audio").and_then(|a| a.value("volume")), Some("0.5"));
    assert!(root.child("marker").is_some_and(Node::is_empty));
}

#[test]
fn properties_are_ignored() {
    let root = parse_document("window width=3 \"main\"").unwrap();
    assert_eq!(root.entries().len(), 1);
    assert_eq!(root.value("window"), Some("main"));
}

#[test]
fn booleans_and_null_become_text() {
    let root = parse_document("enabled #true\nnothing #null").unwrap();
    assert_eq!(root.value("enabled"), Some("true"));
    assert_eq!(root.value("nothing"), Some(""));
}

#[test]
fn invalid_documents_are_reported() {
    let err = parse_document("broken {").unwrap_err();
    assert!(err.to_string().starts_with("invalid KDL document"));
}

#[test]
fn rendered_documents_parse_back() {
    let node = Node::new()
        .with_value("true", "yes")
        .with_value("path", "C:\\temp\n")
        .with_child(Node::named("nested").with_value("a", "1").with_child(Node::named("empty")));

    let text = render_document(&node);
    assert_eq!(parse_document(&text).unwrap(), node);
}

#[test]
fn unicode_line_breaks_and_marks_survive_rendering() {
    for text in [
        "a\u{2028}b",
        "a\u{2029}b",
        "\u{feff}x",
        "a\u{200e}b\u{200f}",
        "a\u{202e}b",
        "\u{2066}x\u{2069}",
        "a\u{85}b",
        "é✓ 日本",
    ] {
        let node = Node::new().with_value("label", text);
        let parsed = parse_document(&render_document(&node)).unwrap();
        assert_eq!(parsed.value("label"), Some(text));
    }
}

const MIXED_TEXT: &str = "[ -~é✓日\u{85}\u{2028}\u{2029}\u{feff}\u{200e}\u{200f}\u{202a}-\u{202e}\u{2066}-\u{2069}]{0,12}";

fn entries() -> impl Strategy<Value = Vec<(String, String)>> {
    proptest::collection::vec(("[a-z][a-z0-9_-]{0,6}", "[ -~]{0,12}"), 0..8)
}

proptest! {
    #[test]
    fn value_entries_round_trip(pairs in entries()) {
        let mut node = Node::new();
        for (name, text) in &pairs {
            node.push_value(name.as_str(), text.as_str());
        }
        let parsed = parse_document(&render_document(&node)).unwrap();
        let values: Vec<(String, String)> = parsed
            .entries()
            .iter()
            .map(|entry| match entry {
                Entry::Value { name, text } => (name.clone(), text.clone()),
                Entry::Child(child) => (child.name.clone(), String::from("<fragment>")),
            })
            .collect();
        prop_assert_eq!(values, pairs);
    }

    #[test]
    fn non_ascii_text_round_trips(text in MIXED_TEXT) {
        let node = Node::new().with_value("label", text.as_str());
        let parsed = parse_document(&render_document(&node)).unwrap();
        prop_assert_eq!(parsed.value("label"), Some(text.as_str()));
    }
}
