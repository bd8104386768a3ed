use alloc::{string::String, vec, vec::Vec};

use crate::{Map, ParseOptions, Segment, Value, parse};

#[test]
fn segment_conversions() {
    assert_eq!(Segment::from("foo"), Segment::Key("foo".into()));
    assert_eq!(Segment::from(String::from("foo")), Segment::Key("foo".into()));
    assert_eq!(Segment::from(3u8), Segment::Index(3));
    assert_eq!(Segment::from(3usize), Segment::Index(3));

    let key = Segment::Key("foo".into());
    assert_eq!(key.as_key(), Some(&String::from("foo")));
    assert_eq!(key.as_index(), None);

    let index = Segment::Index(7);
    assert_eq!(index.as_index(), Some(&7));
    assert_eq!(index.as_key(), None);
}

#[test]
fn segments_serialize_untagged() {
    let path = vec![
        Segment::Key("dependencies".into()),
        Segment::Index(0),
        Segment::Key("name".into()),
    ];
    let rendered = serde_json::to_string(&path).unwrap();
    assert_eq!(rendered, "[\"dependencies\",0,\"name\"]");

    let parsed: Vec<Segment> = serde_json::from_str(&rendered).unwrap();
    assert_eq!(parsed, path);
}

#[test]
fn value_accessors() {
    assert!(Value::Null.is_null());
    assert_eq!(Value::Boolean(true).as_bool(), Some(true));
    assert_eq!(Value::Number(1.5).as_f64(), Some(1.5));
    assert_eq!(Value::String("s".into()).as_str(), Some("s"));
    assert_eq!(Value::from(false), Value::Boolean(false));
    assert_eq!(Value::from(2.0), Value::Number(2.0));
    assert_eq!(Value::from("s"), Value::String("s".into()));
    assert_eq!(
        Value::from(vec![Value::Null]).as_array().map(Vec::len),
        Some(1)
    );
    assert_eq!(Value::from(Map::new()), Value::Object(Map::new()));
    assert_eq!(Value::default(), Value::Null);
}

fn parse_clean(text: &str) -> Value {
    let mut errors = Vec::new();
    let value = parse(text, &mut errors, ParseOptions::default());
    assert!(errors.is_empty(), "{text}: {errors:?}");
    value.unwrap_or_else(|| panic!("no value parsed from {text}"))
}

#[test]
fn unicode_whitespace_separates_tokens() {
    // ogham space mark, ideographic space, NBSP and BOM are all whitespace
    let value = parse_clean("\u{feff}{\u{1680}a:\u{3000}1,\u{a0}b: 2 }");
    let object = value.as_object().unwrap();
    assert_eq!(object["a"], Value::Number(1.0));
    assert_eq!(object["b"], Value::Number(2.0));
}

#[test]
fn unicode_identifier_keys() {
    let value = parse_clean("{ caf\u{e9}: 1, \u{3b1}\u{3b2}: 2, zw\u{200d}j: 3 }");
    let object = value.as_object().unwrap();
    assert_eq!(object["caf\u{e9}"], Value::Number(1.0));
    assert_eq!(object["\u{3b1}\u{3b2}"], Value::Number(2.0));
    // the joiner stays part of the raw key
    assert_eq!(object["zw\u{200d}j"], Value::Number(3.0));
}

#[test]
fn paragraph_separators_are_line_breaks_not_string_enders() {
    // U+2028 terminates lines but may appear raw inside a string
    let value = parse_clean("[\u{2028}'a\u{2028}b'\u{2029}]");
    assert_eq!(
        value,
        Value::Array(vec![Value::String("a\u{2028}b".into())])
    );
}

#[test]
fn options_compose() {
    let options = ParseOptions {
        disallow_comments: true,
        allow_empty_content: true,
    };
    let mut errors = Vec::new();
    // the comment is an error under these options, and the document is empty
    let value = parse("// nothing\n", &mut errors, options);
    assert_eq!(value, None);
    assert_eq!(errors.len(), 1);
}
