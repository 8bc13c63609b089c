use fluent_json::{DecodeErrorKind, Flags, decoder_for};
use serde::Deserialize;

#[test]
fn test_parse_returns_document_value() {
    let decoder = decoder_for(r#"{"foo":"bar"}"#);
    let value = decoder.parse().unwrap();

    let obj = value.as_object().unwrap();
    assert_eq!(obj.get("foo").unwrap().as_str().unwrap(), "bar");
}

#[test]
fn test_parse_scalar_documents() {
    assert_eq!(decoder_for("42").parse().unwrap().as_i64().unwrap(), 42);
    assert_eq!(
        decoder_for("\"hi\"").parse().unwrap().as_str().unwrap(),
        "hi"
    );
    assert!(decoder_for("true").parse().unwrap().as_bool().unwrap());
    assert!(decoder_for("null").parse().unwrap().is_null());
    assert_eq!(
        decoder_for("-23.45").parse().unwrap().as_f64().unwrap(),
        -23.45
    );
}

#[test]
fn test_to_map_returns_ordered_map() {
    let map = decoder_for(r#"{"foo":"bar"}"#).to_map().unwrap();

    assert_eq!(map.len(), 1);
    assert_eq!(map.get("foo").unwrap().as_str().unwrap(), "bar");
}

#[test]
fn test_key_order_is_preserved() {
    let map = decoder_for(r#"{"b":1,"a":2,"c":3}"#).to_map().unwrap();
    let keys: Vec<&str> = map.keys().map(String::as_str).collect();

    assert_eq!(keys, vec!["b", "a", "c"]);
}

#[test]
fn test_duplicate_keys_last_value_wins() {
    let map = decoder_for(r#"{"a":1,"a":2}"#).to_map().unwrap();

    assert_eq!(map.len(), 1);
    assert_eq!(map.get("a").unwrap().as_i64().unwrap(), 2);
}

#[test]
fn test_to_map_rejects_non_object_root() {
    let err = decoder_for("[1,2]").to_map().unwrap_err();
    assert_eq!(*err.kind(), DecodeErrorKind::ExpectedObject);
}

#[derive(Debug, Deserialize, PartialEq)]
struct Person {
    id: i64,
    name: String,
    active: bool,
    nickname: Option<String>,
}

#[test]
fn test_to_object_deserializes_struct() {
    let input = r#"{"id":123,"name":"Ada","active":true,"nickname":null}"#;
    let person: Person = decoder_for(input).to_object().unwrap();

    assert_eq!(
        person,
        Person {
            id: 123,
            name: "Ada".to_string(),
            active: true,
            nickname: None,
        }
    );
}

#[test]
fn test_parse_fails_for_invalid_json() {
    let err = decoder_for("{invalid json}").parse().unwrap_err();
    assert_eq!(*err.kind(), DecodeErrorKind::InvalidSyntax);
}

#[test]
fn test_to_map_fails_for_invalid_json() {
    assert!(decoder_for("{invalid json}").to_map().is_err());
}

#[test]
fn test_empty_input_fails() {
    assert_eq!(
        *decoder_for("").parse().unwrap_err().kind(),
        DecodeErrorKind::UnexpectedEof
    );
    assert_eq!(
        *decoder_for("   \n ").parse().unwrap_err().kind(),
        DecodeErrorKind::UnexpectedEof
    );
}

#[test]
fn test_trailing_characters_fail() {
    let err = decoder_for("{} x").parse().unwrap_err();
    assert_eq!(*err.kind(), DecodeErrorKind::TrailingCharacters);
}

#[test]
fn test_error_carries_location() {
    let err = decoder_for("{\n  bad").parse().unwrap_err();

    assert_eq!(err.line(), Some(2));
    assert_eq!(err.column(), Some(3));
}

#[test]
fn test_is_valid_returns_true_for_valid_json() {
    assert!(decoder_for(r#"{"foo":"bar"}"#).is_valid());
}

#[test]
fn test_is_valid_returns_false_for_invalid_json() {
    assert!(!decoder_for("{invalid json}").is_valid());
}

#[test]
fn test_depth_limit_is_respected() {
    let json = r#"{"a":{"b":{"c":{"d":"e"}}}}"#;

    let err = decoder_for(json).with_depth(2).parse().unwrap_err();
    assert_eq!(*err.kind(), DecodeErrorKind::DepthLimitExceeded);
}

#[test]
fn test_parse_succeeds_at_exact_depth() {
    let json = r#"{"a":{"b":{"c":{"d":"e"}}}}"#;

    assert!(decoder_for(json).with_depth(4).parse().is_ok());
}

#[test]
fn test_is_valid_respects_depth_limit() {
    let json = r#"{"a":{"b":{"c":{"d":"e"}}}}"#;

    assert!(decoder_for(json).is_valid());
    assert!(!decoder_for(json).with_depth(2).is_valid());
}

#[test]
fn test_zero_depth_is_rejected() {
    let err = decoder_for("1").with_depth(0).parse().unwrap_err();
    assert_eq!(*err.kind(), DecodeErrorKind::InvalidDepth);
}

#[test]
fn test_with_depth_returns_new_instance() {
    let json = r#"{"a":{"b":{"c":{"d":"e"}}}}"#;
    let decoder = decoder_for(json);
    let shallow = decoder.with_depth(1);

    assert!(!shallow.is_valid());
    // The receiver keeps its own configuration and behavior.
    assert_eq!(decoder.options().max_depth, 512);
    assert!(decoder.is_valid());
}

#[test]
fn test_with_flags_overrides_flags() {
    let decoder = decoder_for(r#"{"foo":"bar"}"#).add_flags(Flags::OBJECT_AS_MAP);
    let plain = decoder.with_flags(Flags::empty());

    assert_eq!(plain.options().flags, Flags::empty());
    assert!(decoder.options().flags.contains(Flags::OBJECT_AS_MAP));
}

#[test]
fn test_add_flags_merges_flags() {
    let decoder = decoder_for("{}")
        .add_flags(Flags::OBJECT_AS_MAP)
        .add_flags(Flags::PRETTY_PRINT);

    assert!(decoder.options().flags.contains(Flags::OBJECT_AS_MAP));
    assert!(decoder.options().flags.contains(Flags::PRETTY_PRINT));
}

#[test]
fn test_unicode_escapes() {
    let value = decoder_for("\"caf\\u00e9\"").parse().unwrap();
    assert_eq!(value.as_str().unwrap(), "café");

    // Surrogate pairs decode to a single character above the BMP.
    let value = decoder_for("\"\\ud83d\\ude00\"").parse().unwrap();
    assert_eq!(value.as_str().unwrap(), "😀");
}

#[test]
fn test_invalid_escape_fails() {
    let err = decoder_for(r#""\q""#).parse().unwrap_err();
    assert_eq!(*err.kind(), DecodeErrorKind::InvalidEscape);
}

#[test]
fn test_unpaired_surrogate_fails() {
    let err = decoder_for(r#""\ud83d""#).parse().unwrap_err();
    assert_eq!(*err.kind(), DecodeErrorKind::InvalidEscape);
}

#[test]
fn test_control_character_in_string_fails() {
    let err = decoder_for("\"a\nb\"").parse().unwrap_err();
    assert_eq!(*err.kind(), DecodeErrorKind::InvalidSyntax);
}

#[test]
fn test_unterminated_string_fails() {
    let err = decoder_for("\"open").parse().unwrap_err();
    assert_eq!(*err.kind(), DecodeErrorKind::UnterminatedString);
}

#[test]
fn test_leading_zeros_fail() {
    let err = decoder_for("01").parse().unwrap_err();
    assert_eq!(*err.kind(), DecodeErrorKind::InvalidNumber);
}

#[test]
fn test_huge_integer_degrades_to_float() {
    let value = decoder_for("18446744073709551616").parse().unwrap();
    assert!(value.as_f64().unwrap() > 1.8e19);
}
