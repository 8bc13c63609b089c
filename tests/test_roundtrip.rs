use fluent_json::{Flags, Map, Value, decoder_for, encoder_for};

fn sample_document() -> Map<String, Value> {
    let mut meta = Map::new();
    meta.insert("age".to_string(), Value::from(67));
    meta.insert("score".to_string(), Value::from(23.45));

    let mut map = Map::new();
    map.insert("id".to_string(), Value::from(1));
    map.insert("name".to_string(), Value::from("Ada"));
    map.insert("active".to_string(), Value::from(true));
    map.insert("nickname".to_string(), Value::Null);
    map.insert("meta".to_string(), Value::from(meta));
    map.insert(
        "roles".to_string(),
        Value::from(vec![Value::from("admin"), Value::from("editor")]),
    );
    map
}

#[test]
fn test_encode_then_decode_preserves_structure() {
    let map = sample_document();
    let text = encoder_for(map.clone()).serialize().unwrap();

    let decoded = decoder_for(text).to_map().unwrap();
    assert_eq!(decoded, map);
}

#[test]
fn test_round_trip_preserves_key_order() {
    let text = r#"{"z":1,"a":2,"m":3}"#;
    let map = decoder_for(text).to_map().unwrap();

    assert_eq!(encoder_for(map).serialize().unwrap(), text);
}

#[test]
fn test_pretty_output_decodes_to_the_same_document() {
    let map = sample_document();
    let pretty = encoder_for(map.clone()).prettify().unwrap();

    assert_eq!(decoder_for(pretty).to_map().unwrap(), map);
}

#[test]
fn test_escape_unicode_output_decodes_to_the_same_document() {
    let mut map = Map::new();
    map.insert("name".to_string(), Value::from("café 😀"));

    let text = encoder_for(map.clone())
        .add_flags(Flags::ESCAPE_UNICODE)
        .serialize()
        .unwrap();

    assert!(text.is_ascii());
    assert_eq!(decoder_for(text).to_map().unwrap(), map);
}

#[test]
fn test_compact_output_agrees_with_serde_json() {
    let text = r#"{"id":1,"name":"Ada","active":true,"nickname":null,"roles":["admin","editor"],"meta":{"age":67}}"#;

    let value: serde_json::Value = serde_json::from_str(text).unwrap();
    assert_eq!(fluent_json::to_string(&value).unwrap(), text);
    assert_eq!(serde_json::to_string(&value).unwrap(), text);
}

#[test]
fn test_decoded_document_agrees_with_serde_json() {
    let text = r#"{"a":[1,-2,3.5,"x"],"b":{"c":false,"d":null}}"#;

    let ours: serde_json::Value = fluent_json::from_str(text).unwrap();
    let theirs: serde_json::Value = serde_json::from_str(text).unwrap();
    assert_eq!(ours, theirs);
}
