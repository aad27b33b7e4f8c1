//! Tests for key path navigation

use appsettings_tree::path::{combine, split_key};
use appsettings_tree::{ConfigurationBuilder, Node, Setting};
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
#[case("a", "a", Some("1"))]
#[case("A", "a", Some("1"))]
#[case("b:c", "B:C", Some("2"))]
#[case("list:0", "LIST:0", Some("x"))]
#[case("b", "b", None)]
#[case("missing", "missing", None)]
#[case("b:c:d", "b:c:d", None)]
fn test_lookup(#[case] _label: &str, #[case] key: &str, #[case] expected: Option<&str>) {
    let config = ConfigurationBuilder::new()
        .add_json_str(r#"{"a": 1, "b": {"c": 2}, "list": ["x", "y"]}"#)
        .build()
        .unwrap();

    assert_eq!(config.get(key), expected);
}

#[test]
fn test_dictionary_and_json_agree() {
    let from_json = ConfigurationBuilder::new()
        .add_json_str(r#"{"SectionC": {"ArraySetting1": ["Value0", "Value1"]}}"#)
        .build()
        .unwrap();
    let from_memory = ConfigurationBuilder::new()
        .add_in_memory([
            ("SectionC:ArraySetting1:0", Some("Value0")),
            ("SectionC:ArraySetting1:1", Some("Value1")),
        ])
        .build()
        .unwrap();

    assert_eq!(from_json.root(), from_memory.root());
}

#[test]
fn test_section_keeps_first_casing() {
    let config = ConfigurationBuilder::new()
        .add_in_memory([("Logging:Level", Some("info"))])
        .add_in_memory([("LOGGING:level", Some("debug"))])
        .build()
        .unwrap();

    let logging = config.node("logging").unwrap();
    assert_eq!(logging.key(), "Logging");
    assert_eq!(logging.children()[0].key(), "Level");
    assert_eq!(config.get("logging:level"), Some("debug"));
}

proptest! {
    #[test]
    fn test_split_combine_roundtrip(segments in prop::collection::vec("[^:]{1,8}", 1..6)) {
        let key = segments.iter().fold(String::new(), |acc, s| combine(&acc, s));
        let split: Vec<String> = split_key(&key).into_iter().map(String::from).collect();
        prop_assert_eq!(split, segments);
    }

    #[test]
    fn test_lookup_ignores_ascii_case(segments in prop::collection::vec("[a-zA-Z0-9]{1,8}", 1..5), value in "[a-z]{0,8}") {
        let key = segments.join(":");
        let mut root = Node::root();
        root.apply(&key, &Setting::Value(value.clone()));

        let upper = key.to_uppercase();
        let lower = key.to_lowercase();
        prop_assert_eq!(root.get(&upper).and_then(Node::value), Some(value.as_str()));
        prop_assert_eq!(root.get(&lower).and_then(Node::value), Some(value.as_str()));
    }
}
