//! Streaming encoder and row-decoder behaviour.

use toon_codec::{
    decode, stream_decode_rows, stream_encode, toon, Delimiter, EncodeOptions, Error, Value,
};

#[test]
fn test_chunks_concatenate_into_a_document() {
    let items = vec![
        toon!({"id": 1, "name": "Alice"}),
        toon!({"id": 2, "name": "Bob"}),
    ];
    let chunks: Vec<String> = stream_encode(items, EncodeOptions::default()).collect();
    assert_eq!(chunks.concat(), "[-]{id,name}:\n  1,Alice\n  2,Bob\n");
}

#[test]
fn test_streaming_equivalence_regular_list() {
    let items = vec![Value::Int(1), Value::from("two"), toon!([3, 4])];
    let chunks: Vec<String> =
        stream_encode(items.clone(), EncodeOptions::default()).collect();

    // patch the unknown length to the true count, then reparse as a batch
    let patched = chunks
        .concat()
        .replacen("[-]", &format!("[{}]", items.len()), 1);
    assert_eq!(
        decode(patched.trim_end()).unwrap(),
        Value::List(items)
    );
}

#[test]
fn test_streaming_equivalence_tabular() {
    let items = vec![
        toon!({"qty": 2, "sku": "A1"}),
        toon!({"qty": 1, "sku": "B2"}),
    ];
    let chunks: Vec<String> =
        stream_encode(items.clone(), EncodeOptions::default()).collect();
    let patched = chunks.concat().replacen("[-]", "[2]", 1);
    assert_eq!(decode(patched.trim_end()).unwrap(), Value::List(items));
}

#[test]
fn test_one_chunk_per_item() {
    let items = vec![Value::Int(1), Value::Int(2), Value::Int(3)];
    let chunks: Vec<String> = stream_encode(items, EncodeOptions::default()).collect();
    // header + one chunk per item
    assert_eq!(chunks.len(), 4);
    for chunk in &chunks {
        assert!(chunk.ends_with('\n'));
    }
}

#[test]
fn test_consumer_can_stop_early() {
    // an unbounded source: taking finitely many chunks must terminate
    let naturals = (0..).map(Value::Int);
    let chunks: Vec<String> = stream_encode(naturals, EncodeOptions::default())
        .take(5)
        .collect();
    assert_eq!(chunks, vec!["[-]:\n", "  0\n", "  1\n", "  2\n", "  3\n"]);
}

#[test]
fn test_decode_rows_from_streamed_output() {
    let items = vec![
        toon!({"id": 1, "name": "Alice"}),
        toon!({"id": 2, "name": "Bob"}),
    ];
    let document: String = stream_encode(items.clone(), EncodeOptions::default()).collect();
    let rows: Vec<Value> = stream_decode_rows(document.as_bytes())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(rows, items);
}

#[test]
fn test_decode_rows_with_declared_length_stops_at_n() {
    let source = "[2]{id}:\n  1\n  2\n  3\n";
    let rows: Vec<Value> = stream_decode_rows(source.as_bytes())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(rows, vec![toon!({"id": 1}), toon!({"id": 2})]);
}

#[test]
fn test_decode_rows_unknown_length_runs_to_eof() {
    let source = "[-]{id}:\n  1\n  2\n  3\n";
    let rows: Vec<Value> = stream_decode_rows(source.as_bytes())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(rows.len(), 3);
}

#[test]
fn test_decode_rows_blank_line_ends_unknown_stream() {
    let source = "[-]:\n  1\n\n  ignored\n";
    let rows: Vec<Value> = stream_decode_rows(source.as_bytes())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(rows, vec![Value::Int(1)]);
}

#[test]
fn test_decode_rows_quoted_cells() {
    let source = "[1]{name,desc}:\n  \"Product, A\",\"line\\nbreak\"\n";
    let rows: Vec<Value> = stream_decode_rows(source.as_bytes())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        rows,
        vec![toon!({"name": "Product, A", "desc": "line\nbreak"})]
    );
}

#[test]
fn test_decode_rows_bad_row_reports_position() {
    let source = "[2]{a,b}:\n  1,2\n  3\n";
    let mut rows = stream_decode_rows(source.as_bytes()).unwrap();
    assert!(rows.next().unwrap().is_ok());
    let err = rows.next().unwrap().unwrap_err();
    assert!(matches!(err, Error::ExpectedCharacter { expected: ',', .. }));
    let (line, _) = err.position().unwrap();
    assert_eq!(line, 3);
}

#[test]
fn test_decode_rows_truncated_declared_stream() {
    let mut rows = stream_decode_rows("[2]{a}:\n  1\n".as_bytes()).unwrap();
    assert!(rows.next().unwrap().is_ok());
    assert!(matches!(
        rows.next().unwrap(),
        Err(Error::UnexpectedEnd { .. })
    ));
}

#[test]
fn test_pipe_delimited_stream() {
    let options = EncodeOptions::new().with_delimiter(Delimiter::Pipe);
    let items = vec![toon!({"id": 1, "name": "a"}), toon!({"id": 2, "name": "b"})];
    let document: String = stream_encode(items.clone(), options).collect();
    assert!(document.starts_with("[-]{id|name}:\n"));

    let rows: Vec<Value> = stream_decode_rows(document.as_bytes())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(rows, items);
}

#[test]
fn test_large_stream_roundtrip() {
    let items: Vec<Value> = (0..10_000)
        .map(|i| toon!({"seq": i, "even": (i % 2 == 0)}))
        .collect();
    let document: String =
        stream_encode(items.clone(), EncodeOptions::default()).collect();
    let rows: Vec<Value> = stream_decode_rows(document.as_bytes())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(rows, items);
}
