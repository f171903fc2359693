//! Structural classification of composite values.
//!
//! Given a list, the classifier decides between the tabular projection
//! (header plus rows) and the regular element-per-line form. Objects and
//! empty composites are handled directly by the encoder.

use crate::Value;

/// Shape of a non-empty list, as the encoder will emit it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Shape {
    /// Uniform list of scalar-field objects; holds the sorted column keys.
    Tabular(Vec<String>),
    /// Element-per-line list.
    List,
}

/// Classifies a non-empty list for the given active delimiter.
pub(crate) fn classify_list(items: &[Value], delimiter: char) -> Shape {
    match detect_tabular(items, delimiter) {
        Some(columns) => Shape::Tabular(columns),
        None => Shape::List,
    }
}

/// Detects the tabular shape: every element is an object over one shared
/// key set (order-independent) and every field value is a scalar. Returns
/// the column keys sorted lexicographically, which is the canonical header
/// order.
///
/// A single conforming element is enough. One missing key anywhere, one
/// nested composite, or a key the header syntax cannot carry, and the list
/// falls back to the regular form.
pub(crate) fn detect_tabular(items: &[Value], delimiter: char) -> Option<Vec<String>> {
    let first = items.first()?.as_object()?;
    if first.is_empty() {
        return None;
    }
    let mut columns: Vec<&str> = first.keys().map(String::as_str).collect();
    columns.sort_unstable();

    // the decoder re-infers the delimiter from the header text, which only
    // works for the comma/tab/pipe set; other delimiters never appear in a
    // multi-column header
    if columns.len() > 1 && !matches!(delimiter, ',' | '\t' | '|') {
        return None;
    }

    if !columns.iter().all(|key| header_safe(key, delimiter)) {
        return None;
    }

    for item in items {
        let object = item.as_object()?;
        if object.len() != columns.len() {
            return None;
        }
        for key in &columns {
            if !object.get(key)?.is_scalar() {
                return None;
            }
        }
    }

    Some(columns.into_iter().map(String::from).collect())
}

/// A column key is only usable if the emitted header re-parses to the same
/// key list: no delimiter, no structural characters, no line breaks.
fn header_safe(key: &str, delimiter: char) -> bool {
    !key.is_empty()
        && key.trim() == key
        && !key.chars().any(|c| {
            c == delimiter
                || matches!(c, ',' | '\t' | '|' | ':' | '{' | '}' | '[' | ']' | '"' | '\\')
                || (c as u32) < 0x20
                || c as u32 == 0x7F
        })
}
