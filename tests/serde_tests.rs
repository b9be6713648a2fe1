#![cfg(all(feature = "serde", feature = "value"))]
//! Serialization tests with serde_json.

use ordered_mapping::persistent::OrderedMap;
use ordered_mapping::value::{Key, Record, Value};
use ordered_mapping::{list, mapping};
use rstest::rstest;

#[rstest]
fn test_typed_mapping_keeps_insertion_order() {
    let mapping: OrderedMap<String, i32> = [("z", 1), ("a", 2), ("m", 3)]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect();
    let json = serde_json::to_string(&mapping).unwrap();
    assert_eq!(json, r#"{"z":1,"a":2,"m":3}"#);

    let restored: OrderedMap<String, i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, mapping);
}

#[rstest]
fn test_duplicate_keys_overwrite_in_place() {
    let restored: OrderedMap<String, i32> =
        serde_json::from_str(r#"{"a":1,"b":2,"a":3}"#).unwrap();
    assert_eq!(
        restored.entries(),
        vec![("a".to_string(), 3), ("b".to_string(), 2)]
    );
}

#[rstest]
fn test_dynamic_rows_round_trip() {
    let rows = list![
        mapping! { "id" => 1, "tags" => list!["x", "y"] },
        mapping! { "id" => 2, "tags" => list![] },
    ];
    let json = serde_json::to_string(&Value::from(rows.clone())).unwrap();
    assert_eq!(json, r#"[{"id":1,"tags":["x","y"]},{"id":2,"tags":[]}]"#);

    let restored: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, Value::from(rows));
}

#[rstest]
fn test_integral_json_keys_become_integer_keys() {
    let restored: OrderedMap<Key, Value> = serde_json::from_str(r#"{"3":"c","x":null}"#).unwrap();
    assert_eq!(restored.get(&Key::Int(3)), Some(&Value::from("c")));
    assert_eq!(restored.push(Value::Bool(true)).last_key(), Some(&Key::Int(4)));
}

#[rstest]
fn test_records_inside_values() {
    let value = Value::from(list![Record::new("Point", [("x", Value::Int(1))])]);
    let json = serde_json::to_string(&value).unwrap();
    assert_eq!(json, r#"[{"name":"Point","fields":{"x":1}}]"#);

    let restored: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        restored,
        Value::from(list![mapping! { "name" => "Point", "fields" => mapping! { "x" => 1 } }])
    );
}
