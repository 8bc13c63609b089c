use fluent_json::{EncodeErrorKind, Encoder, Flags, Map, Value, encoder_for};
use serde::Serialize;

fn object(pairs: Vec<(&str, Value)>) -> Map<String, Value> {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

#[test]
fn test_serialize_encodes_map_compactly() {
    let encoder = encoder_for(object(vec![("foo", Value::from("bar"))]));

    assert_eq!(encoder.serialize().unwrap(), r#"{"foo":"bar"}"#);
}

#[test]
fn test_serialize_has_no_extraneous_whitespace() {
    let map = object(vec![
        ("a", Value::from(vec![Value::from(1), Value::from(2)])),
        ("b", Value::from(object(vec![("c", Value::Null)]))),
    ]);

    assert_eq!(
        encoder_for(map).serialize().unwrap(),
        r#"{"a":[1,2],"b":{"c":null}}"#
    );
}

#[test]
fn test_prettify_returns_pretty_printed_json() {
    let encoder = encoder_for(object(vec![("foo", Value::from("bar"))]));

    assert_eq!(encoder.prettify().unwrap(), "{\n    \"foo\": \"bar\"\n}");
}

#[test]
fn test_prettify_indents_nested_containers() {
    let map = object(vec![
        ("a", Value::from(object(vec![("b", Value::from(1))]))),
        ("c", Value::from(vec![Value::from(1), Value::from(2)])),
    ]);

    let expected = "{\n    \"a\": {\n        \"b\": 1\n    },\n    \"c\": [\n        1,\n        2\n    ]\n}";
    assert_eq!(encoder_for(map).prettify().unwrap(), expected);
}

#[test]
fn test_prettify_keeps_empty_containers_inline() {
    let map = object(vec![
        ("a", Value::Object(Map::new())),
        ("b", Value::Array(Vec::new())),
    ]);

    assert_eq!(
        encoder_for(map).prettify().unwrap(),
        "{\n    \"a\": {},\n    \"b\": []\n}"
    );
}

#[test]
fn test_prettify_does_not_mutate_the_encoder() {
    let encoder = encoder_for(object(vec![("foo", Value::from("bar"))]));

    let _ = encoder.prettify().unwrap();
    assert_eq!(encoder.serialize().unwrap(), r#"{"foo":"bar"}"#);
}

#[test]
fn test_with_depth_returns_new_instance() {
    let nested = object(vec![(
        "a",
        Value::from(object(vec![("b", Value::from(object(vec![(
            "c",
            Value::from(1),
        )])))])),
    )]);
    let encoder = encoder_for(nested);
    let shallow = encoder.with_depth(1);

    let err = shallow.serialize().unwrap_err();
    assert_eq!(*err.kind(), EncodeErrorKind::DepthLimitExceeded);
    assert!(encoder.serialize().is_ok());
}

#[test]
fn test_with_flags_overrides_existing_flags() {
    let encoder =
        encoder_for(object(vec![("foo", Value::from("bar"))])).add_flags(Flags::PRETTY_PRINT);
    let plain = encoder.with_flags(Flags::empty());

    assert_eq!(plain.serialize().unwrap(), r#"{"foo":"bar"}"#);
    assert_eq!(encoder.serialize().unwrap(), "{\n    \"foo\": \"bar\"\n}");
}

#[test]
fn test_add_flags_merges_flags() {
    let encoder = encoder_for(object(vec![("foo", Value::from("bar"))]))
        .add_flags(Flags::PRETTY_PRINT)
        .add_flags(Flags::ESCAPE_UNICODE);

    assert!(encoder.options().flags.contains(Flags::PRETTY_PRINT));
    assert!(encoder.options().flags.contains(Flags::ESCAPE_UNICODE));
}

#[test]
fn test_non_finite_number_fails() {
    let err = encoder_for(f64::NAN).serialize().unwrap_err();
    assert_eq!(*err.kind(), EncodeErrorKind::NonFiniteNumber);

    let err = encoder_for(f64::INFINITY).serialize().unwrap_err();
    assert_eq!(*err.kind(), EncodeErrorKind::NonFiniteNumber);
}

#[test]
fn test_zero_depth_is_rejected() {
    let err = encoder_for(1).with_depth(0).serialize().unwrap_err();
    assert_eq!(*err.kind(), EncodeErrorKind::InvalidDepth);
}

#[test]
fn test_string_escapes() {
    let encoder = encoder_for("a\"b\\c\nd\te");

    assert_eq!(encoder.serialize().unwrap(), "\"a\\\"b\\\\c\\nd\\te\"");
}

#[test]
fn test_control_characters_are_escaped() {
    assert_eq!(encoder_for("\u{01}").serialize().unwrap(), "\"\\u0001\"");
}

#[test]
fn test_unicode_passes_through_by_default() {
    assert_eq!(encoder_for("café").serialize().unwrap(), "\"café\"");
}

#[test]
fn test_escape_unicode_flag_produces_ascii() {
    let encoder = encoder_for("café 😀").add_flags(Flags::ESCAPE_UNICODE);
    let output = encoder.serialize().unwrap();

    assert!(output.is_ascii());
    assert_eq!(output, "\"caf\\u00e9 \\ud83d\\ude00\"");
}

#[test]
fn test_whole_floats_keep_a_decimal_point() {
    assert_eq!(encoder_for(1.0).serialize().unwrap(), "1.0");
    assert_eq!(encoder_for(23.45).serialize().unwrap(), "23.45");
}

#[derive(Serialize)]
struct User {
    id: u64,
    name: String,
    tags: Vec<String>,
}

#[test]
fn test_from_serialize_encodes_struct() {
    let user = User {
        id: 42,
        name: "Ada".to_string(),
        tags: vec!["admin".to_string()],
    };
    let encoder = Encoder::from_serialize(&user).unwrap();

    assert_eq!(
        encoder.serialize().unwrap(),
        r#"{"id":42,"name":"Ada","tags":["admin"]}"#
    );
}

#[test]
fn test_from_serialize_rejects_non_string_keys() {
    let mut map = std::collections::BTreeMap::new();
    map.insert(1, "one");

    let err = Encoder::from_serialize(&map).unwrap_err();
    assert_eq!(*err.kind(), EncodeErrorKind::KeyMustBeString);
}
