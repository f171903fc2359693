//! Construction of dynamic values with the `toon!` macro.

use toon_codec::{encode, toon, Map, Value};

#[test]
fn test_macro_builds_primitives() {
    assert_eq!(toon!(null), Value::Null);
    assert_eq!(toon!(true), Value::Bool(true));
    assert_eq!(toon!(42), Value::Int(42));
    assert_eq!(toon!(-1.5), Value::Float(-1.5));
    assert_eq!(toon!("text"), Value::Str("text".to_string()));
}

#[test]
fn test_macro_builds_collections() {
    assert_eq!(toon!([]), Value::List(vec![]));
    assert_eq!(toon!({}), Value::Object(Map::new()));

    let value = toon!({
        "items": [1, 2, 3],
        "nested": {"flag": false}
    });
    let object = value.as_object().unwrap();
    assert_eq!(object.get("items").unwrap().as_list().unwrap().len(), 3);
    assert_eq!(
        object
            .get("nested")
            .unwrap()
            .as_object()
            .unwrap()
            .get("flag"),
        Some(&Value::Bool(false))
    );
}

#[test]
fn test_macro_interpolates_expressions() {
    let name = "Alice".to_string();
    let count = 3u32;
    let value = toon!({
        "name": name,
        "count": count
    });
    assert_eq!(value, toon!({"name": "Alice", "count": 3}));
}

#[test]
fn test_macro_output_encodes() {
    let value = toon!({
        "rows": [
            {"a": 1, "b": 2},
            {"a": 3, "b": 4}
        ]
    });
    assert_eq!(
        encode(&value),
        "{\n  rows:\n  [2]{a,b}:\n    1,2\n    3,4\n}"
    );
}

#[test]
fn test_macro_accepts_trailing_commas() {
    let value = toon!({
        "a": 1,
        "b": [1, 2,],
    });
    assert_eq!(value, toon!({"a": 1, "b": [1, 2]}));
}
