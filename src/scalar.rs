//! Scalar encoding, quoting and classification.
//!
//! The same syntax predicates drive the encoder's quoting decision and the
//! decoders' token classification, so a string the encoder leaves unquoted
//! can never be re-read as a number or keyword.

use crate::Value;

/// Writes the TOON textual form of a scalar value.
///
/// `delimiter` is the active field separator; strings containing it are
/// quoted. Non-finite floats are written as `null`.
pub(crate) fn write_scalar(value: &Value, delimiter: char, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Int(i) => out.push_str(&i.to_string()),
        Value::Float(f) => write_float(*f, out),
        Value::Str(s) => {
            if needs_quoting(s, delimiter) {
                write_quoted(s, out);
            } else {
                out.push_str(s);
            }
        }
        // composite in scalar position: only reachable through the streaming
        // tabular path, which degrades non-conforming cells to null
        Value::List(_) | Value::Object(_) => out.push_str("null"),
    }
}

/// Writes a float preserving its value. Whole finite floats get a `.0`
/// suffix so they re-decode as floats, not integers; NaN and ±∞ become
/// `null`.
pub(crate) fn write_float(f: f64, out: &mut String) {
    if !f.is_finite() {
        out.push_str("null");
        return;
    }
    let text = f.to_string();
    out.push_str(&text);
    if !text.contains('.') {
        out.push_str(".0");
    }
}

/// Decides whether a string must be quoted to survive a round trip.
///
/// A string stays unquoted only when the decoders would hand it back
/// verbatim: it is non-empty, carries no structural or control characters,
/// no delimiter, no edge whitespace (tokens are trimmed on read), and does
/// not read as a keyword or number.
pub(crate) fn needs_quoting(s: &str, delimiter: char) -> bool {
    if s.is_empty() || s.trim() != s {
        return true;
    }
    if matches!(s, "null" | "true" | "false") {
        return true;
    }
    if is_integer_syntax(s) || is_float_syntax(s) {
        return true;
    }
    s.chars().any(|c| {
        c == delimiter
            || matches!(c, ',' | ':' | '{' | '}' | '[' | ']' | '"' | '\\')
            || (c as u32) < 0x20
            || c as u32 == 0x7F
    })
}

/// Writes a double-quoted string with the `\"`, `\\`, `\n`, `\r`, `\t`
/// escapes applied.
pub(crate) fn write_quoted(s: &str, out: &mut String) {
    out.reserve(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}

/// Classifies an unquoted token.
///
/// Precedence: keyword (`null`, `true`, `false`), integer, float, raw
/// string. All-digit tokens too large for `i64` fall through to the float
/// branch.
pub(crate) fn parse_scalar(token: &str) -> Value {
    match token {
        "null" => return Value::Null,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if is_integer_syntax(token) {
        if let Ok(i) = token.parse::<i64>() {
            return Value::Int(i);
        }
    }
    if is_float_syntax(token) {
        if let Ok(f) = token.parse::<f64>() {
            return Value::Float(f);
        }
    }
    Value::Str(token.to_string())
}

/// Integer syntax: optional `-`, then one or more ASCII digits.
pub(crate) fn is_integer_syntax(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Decimal float syntax: optional sign, digits with at most one `.`, and an
/// optional exponent. Accepts `1.`, `.5` and `3e8`; rejects `inf`, `NaN`
/// and anything `f64::from_str` accepts beyond plain decimals.
pub(crate) fn is_float_syntax(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let mut digits = 0;
    let mut seen_dot = false;
    while i < bytes.len() {
        match bytes[i] {
            b'0'..=b'9' => digits += 1,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        i += 1;
    }
    if digits == 0 {
        return false;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let mut exp_digits = 0;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            exp_digits += 1;
            i += 1;
        }
        if exp_digits == 0 {
            return false;
        }
    }
    i == bytes.len()
}
