//! Error-recovering TOON decoding.
//!
//! The lenient decoder parses the same grammar as the strict one, but a
//! grammar violation never aborts the parse: the violation is recorded as a
//! [`Diagnostic`] and the parser resynchronises, producing a partial value.
//! It terminates on any finite input and never returns an error.
//!
//! ## Usage
//!
//! ```rust
//! use toon_codec::{decode_lenient, Value};
//!
//! let (value, diagnostics) = decode_lenient("[3]:\n  1\n  2");
//! assert_eq!(value, Some(Value::List(vec![Value::Int(1), Value::Int(2)])));
//! assert_eq!(diagnostics.len(), 1);
//! assert!(diagnostics[0].message.contains("length mismatch"));
//! ```

use crate::de::infer_delimiter;
use crate::scalar::parse_scalar;
use crate::{Map, Value};
use std::fmt;

/// A recorded grammar violation: what went wrong and where.
///
/// Diagnostics are returned in the order the violations occur in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}, column {}", self.message, self.line, self.column)
    }
}

/// Decodes a TOON document, recovering from every grammar violation.
///
/// Returns the (possibly partial) value — `None` only for input with no
/// non-whitespace bytes — and the ordered list of diagnostics.
///
/// # Examples
///
/// ```rust
/// use toon_codec::decode_lenient;
///
/// let (value, diagnostics) = decode_lenient("{\n  name: \"unterminated\n}");
/// assert!(value.is_some());
/// assert!(!diagnostics.is_empty());
/// ```
#[must_use]
pub fn decode_lenient(input: &str) -> (Option<Value>, Vec<Diagnostic>) {
    let mut parser = LenientParser::new(input);
    parser.skip_whitespace();
    if parser.at_end() {
        parser.record("empty input");
        return (None, parser.diagnostics);
    }
    let value = parser.parse_value();
    parser.skip_whitespace();
    if !parser.at_end() {
        parser.record("unexpected trailing content");
    }
    (Some(value), parser.diagnostics)
}

struct LenientParser<'de> {
    input: &'de str,
    position: usize,
    line: usize,
    column: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'de> LenientParser<'de> {
    fn new(input: &'de str) -> Self {
        LenientParser {
            input,
            position: 0,
            line: 1,
            column: 1,
            diagnostics: Vec::new(),
        }
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.input[self.position..].chars().next()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if matches!(ch, ' ' | '\t' | '\n' | '\r') {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn skip_inline_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch == ' ' || ch == '\t' {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn skip_cell_padding(&mut self, delimiter: char) {
        while let Some(ch) = self.peek_char() {
            if (ch == ' ' || ch == '\t') && ch != delimiter {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn record(&mut self, message: &str) {
        self.diagnostics.push(Diagnostic {
            message: message.to_string(),
            line: self.line,
            column: self.column,
        });
    }

    fn record_at(&mut self, mark: (usize, usize), message: &str) {
        self.diagnostics.push(Diagnostic {
            message: message.to_string(),
            line: mark.0,
            column: mark.1,
        });
    }

    /// Skips forward to the next plausible resume point: a line break, a
    /// comma, or the opening of a composite.
    fn skip_to_sync(&mut self) {
        while let Some(ch) = self.peek_char() {
            if matches!(ch, '\n' | ',' | '{' | '[') {
                break;
            }
            self.next_char();
        }
    }

    fn parse_value(&mut self) -> Value {
        match self.peek_char() {
            None => {
                self.record("unexpected end of input");
                Value::Null
            }
            Some('{') => self.parse_object(),
            Some('[') => self.parse_list(),
            Some('"') => Value::Str(self.parse_quoted_string()),
            Some(_) => {
                let start = self.position;
                while let Some(ch) = self.peek_char() {
                    if matches!(ch, '\n' | '\r' | ',' | ':' | '}' | ']') {
                        break;
                    }
                    self.next_char();
                }
                let token = self.input[start..self.position].trim();
                if token.is_empty() {
                    self.record("expected a value");
                    self.next_char();
                    self.skip_to_sync();
                    Value::Null
                } else {
                    parse_scalar(token)
                }
            }
        }
    }

    fn parse_object(&mut self) -> Value {
        self.next_char(); // '{'
        self.skip_whitespace();
        let mut map = Map::new();
        loop {
            match self.peek_char() {
                None => {
                    self.record("missing '}' to close object");
                    break;
                }
                Some('}') => {
                    self.next_char();
                    break;
                }
                Some(_) => {
                    let before = self.position;
                    let key = self.parse_key();
                    self.skip_whitespace();
                    let value = self.parse_value();
                    map.insert(key, value);
                    self.skip_whitespace();
                    if self.position == before {
                        self.next_char();
                    }
                }
            }
        }
        Value::Object(map)
    }

    /// Reads a key up to `:`. When the line ends first, the separator is
    /// synthesised: the violation is recorded and the value parse continues
    /// from the current position.
    fn parse_key(&mut self) -> String {
        let start = self.position;
        loop {
            match self.peek_char() {
                Some(':') => {
                    let key = self.input[start..self.position].trim().to_string();
                    self.next_char();
                    return key;
                }
                Some('\n') | Some('\r') | None => {
                    self.record("missing ':' after key");
                    return self.input[start..self.position].trim().to_string();
                }
                Some(_) => {
                    self.next_char();
                }
            }
        }
    }

    fn parse_list(&mut self) -> Value {
        self.next_char(); // '['
        let declared = self.parse_length();
        self.skip_inline_whitespace();
        let header = if self.peek_char() == Some('{') {
            Some(self.parse_tabular_header())
        } else {
            None
        };
        self.skip_inline_whitespace();
        if self.peek_char() == Some(':') {
            self.next_char();
        }
        match header {
            Some((columns, delimiter)) => self.parse_rows(declared, &columns, delimiter),
            None => self.parse_elements(declared),
        }
    }

    /// Parses the `[N]` length. `[-]` is tolerated (unknown length) and a
    /// malformed token degrades to unknown length with a diagnostic.
    fn parse_length(&mut self) -> Option<usize> {
        let mark = (self.line, self.column);
        let mut declared = None;
        let mut valid = false;
        if self.peek_char() == Some('-') {
            self.next_char();
            valid = true;
        } else {
            let start = self.position;
            while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                self.next_char();
            }
            if let Ok(n) = self.input[start..self.position].parse::<usize>() {
                declared = Some(n);
                valid = true;
            }
        }
        loop {
            match self.peek_char() {
                Some(']') => {
                    self.next_char();
                    break;
                }
                Some('\n') | Some('\r') | None => {
                    self.record_at(mark, "missing ']' in array header");
                    return declared;
                }
                Some(_) => {
                    valid = false;
                    self.next_char();
                }
            }
        }
        if !valid {
            self.record_at(mark, "invalid array length");
        }
        declared
    }

    fn parse_tabular_header(&mut self) -> (Vec<String>, char) {
        self.next_char(); // '{'
        let start = self.position;
        loop {
            match self.peek_char() {
                Some('}') => break,
                Some('\n') | Some('\r') | None => {
                    self.record("missing '}' in tabular header");
                    break;
                }
                Some(_) => {
                    self.next_char();
                }
            }
        }
        let header = &self.input[start..self.position];
        if self.peek_char() == Some('}') {
            self.next_char();
        }
        let delimiter = infer_delimiter(header);
        let columns = header
            .split(delimiter)
            .map(|key| key.trim().to_string())
            .collect();
        (columns, delimiter)
    }

    /// Regular-list elements: up to the declared count, stopping early when
    /// the enclosing context closes. A shortfall is a length mismatch; with
    /// an unknown length, elements are read until the context closes.
    fn parse_elements(&mut self, declared: Option<usize>) -> Value {
        let mut items = Vec::new();
        loop {
            if declared.is_some_and(|n| items.len() >= n) {
                break;
            }
            self.skip_whitespace();
            match self.peek_char() {
                None | Some('}') | Some(']') => break,
                Some(_) => {}
            }
            let before = self.position;
            items.push(self.parse_value());
            if self.position == before {
                self.next_char();
            }
        }
        if let Some(n) = declared {
            if items.len() != n {
                self.record(&format!(
                    "length mismatch (declared {}, actual {})",
                    n,
                    items.len()
                ));
            }
        }
        Value::List(items)
    }

    /// Tabular rows: up to the declared count, stopping early when the
    /// enclosing context closes. Reading past the declaration would eat
    /// sibling elements in nested documents, so a surplus at the root
    /// surfaces as trailing content instead.
    fn parse_rows(&mut self, declared: Option<usize>, columns: &[String], delimiter: char) -> Value {
        let mut rows = Vec::new();
        loop {
            if declared.is_some_and(|n| rows.len() >= n) {
                break;
            }
            self.skip_whitespace();
            match self.peek_char() {
                None | Some('}') | Some(']') => break,
                Some(_) => {}
            }
            let before = self.position;
            rows.push(Value::Object(self.parse_row(columns, delimiter)));
            if self.position == before {
                self.next_char();
            }
        }
        if let Some(n) = declared {
            if rows.len() != n {
                self.record(&format!(
                    "length mismatch (declared {}, actual {})",
                    n,
                    rows.len()
                ));
            }
        }
        Value::List(rows)
    }

    /// One line-bounded row. Missing cells become `Null`, surplus cells are
    /// discarded; either way the row gets a single arity diagnostic.
    fn parse_row(&mut self, columns: &[String], delimiter: char) -> Map {
        let mark = (self.line, self.column);
        let mut cells = Vec::new();
        loop {
            self.skip_cell_padding(delimiter);
            cells.push(self.parse_cell(delimiter));
            self.skip_cell_padding(delimiter);
            if self.peek_char() == Some(delimiter) {
                self.next_char();
            } else {
                break;
            }
        }
        if cells.len() != columns.len() {
            self.record_at(
                mark,
                &format!("row has {} cells, expected {}", cells.len(), columns.len()),
            );
        }
        let mut map = Map::with_capacity(columns.len());
        let mut cells = cells.into_iter();
        for column in columns {
            map.insert(column.clone(), cells.next().unwrap_or(Value::Null));
        }
        map
    }

    fn parse_cell(&mut self, delimiter: char) -> Value {
        if self.peek_char() == Some('"') {
            return Value::Str(self.parse_quoted_string());
        }
        let start = self.position;
        while let Some(ch) = self.peek_char() {
            if ch == delimiter || ch == '\n' || ch == '\r' {
                break;
            }
            self.next_char();
        }
        parse_scalar(self.input[start..self.position].trim())
    }

    /// Quoted string; an unterminated one ends at the next line break or
    /// end of input with a diagnostic.
    fn parse_quoted_string(&mut self) -> String {
        self.next_char(); // '"'
        let mut result = String::new();
        loop {
            match self.peek_char() {
                None | Some('\n') | Some('\r') => {
                    self.record("unterminated string");
                    return result;
                }
                Some('"') => {
                    self.next_char();
                    return result;
                }
                Some('\\') => {
                    self.next_char();
                    match self.next_char() {
                        Some('\\') => result.push('\\'),
                        Some('"') => result.push('"'),
                        Some('n') => result.push('\n'),
                        Some('r') => result.push('\r'),
                        Some('t') => result.push('\t'),
                        None | Some('\n') | Some('\r') => {
                            self.record("unterminated string");
                            return result;
                        }
                        Some(other) => {
                            result.push('\\');
                            result.push(other);
                        }
                    }
                }
                Some(other) => {
                    self.next_char();
                    result.push(other);
                }
            }
        }
    }
}
