//! Recovery behaviour of the lenient decoder.

use toon_codec::{decode_lenient, toon, Value};

#[test]
fn test_well_formed_input_matches_strict() {
    let text = "{\n  company: Acme\n  items:\n  [2]{id,qty}:\n    1,2\n    3,4\n}";
    let strict = toon_codec::decode(text).unwrap();
    let (lenient, diagnostics) = decode_lenient(text);
    assert_eq!(lenient, Some(strict));
    assert!(diagnostics.is_empty());
}

#[test]
fn test_missing_close_bracket_recovers() {
    let (value, diagnostics) = decode_lenient("{\n  a: 1\n  b: 2\n");
    assert_eq!(value, Some(toon!({"a": 1, "b": 2})));
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("missing '}'"));
}

#[test]
fn test_partial_value_survives_multiple_errors() {
    let text = "{\n  flag: true\n  name: \"broken\n  count:\n  [2]:\n    1\n}";
    let (value, diagnostics) = decode_lenient(text);
    let value = value.unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.get("flag"), Some(&Value::Bool(true)));
    assert_eq!(object.get("name"), Some(&Value::Str("broken".to_string())));
    assert_eq!(object.get("count"), Some(&toon!([1])));
    // unterminated string + list length mismatch
    assert_eq!(diagnostics.len(), 2);
}

#[test]
fn test_length_mismatch_accepts_actual_count() {
    let (value, diagnostics) = decode_lenient("[5]:\n  1\n  2");
    assert_eq!(value, Some(toon!([1, 2])));
    assert!(diagnostics[0].message.contains("declared 5, actual 2"));

    let (value, diagnostics) = decode_lenient("[4]{a}:\n  1\n  2");
    assert_eq!(value, Some(toon!([{"a": 1}, {"a": 2}])));
    assert!(diagnostics
        .iter()
        .any(|d| d.message.contains("declared 4, actual 2")));
}

#[test]
fn test_row_arity_fills_and_discards() {
    let (value, diagnostics) = decode_lenient("[2]{x,y}:\n  1\n  1,2,3");
    assert_eq!(
        value,
        Some(toon!([{"x": 1, "y": null}, {"x": 1, "y": 2}]))
    );
    assert_eq!(diagnostics.len(), 2);
}

#[test]
fn test_diagnostic_positions_match_input_order() {
    let text = "{\n  a: \"x\n  b: \"y\n";
    let (_, diagnostics) = decode_lenient(text);
    assert!(diagnostics.len() >= 2);
    for pair in diagnostics.windows(2) {
        assert!((pair[0].line, pair[0].column) <= (pair[1].line, pair[1].column));
    }
}

#[test]
fn test_diagnostic_display_includes_position() {
    let (_, diagnostics) = decode_lenient("[3]:\n  1");
    let rendered = diagnostics[0].to_string();
    assert!(rendered.contains("line"));
    assert!(rendered.contains("column"));
}

#[test]
fn test_totality_on_structured_garbage() {
    let inputs = [
        "",
        "   ",
        "{",
        "}",
        "[",
        "]",
        "[]",
        "[1]",
        "[1]:",
        "{a:{b:{c:",
        "[9]{,,}:\n ,,\n",
        "\"\\u12",
        ":::",
        "{\"}\": 1}",
        "[2]{a,b}\n1,2",
        "[18446744073709551616]:",
    ];
    for input in inputs {
        // must terminate and never panic
        let (_, _) = decode_lenient(input);
    }
}

#[test]
fn test_lenient_accepts_streaming_header() {
    let (value, diagnostics) = decode_lenient("[-]{id}:\n  1\n  2");
    assert_eq!(value, Some(toon!([{"id": 1}, {"id": 2}])));
    assert!(diagnostics.is_empty());
}
