//! Strict TOON decoding.
//!
//! This module provides the strict decoder — a hand-written
//! recursive-descent parser over byte positions with line/column tracking —
//! and the serde glue that turns a decoded [`Value`] into host types.
//!
//! The grammar is closed by explicit delimiters (`}`, `]`) and declared
//! array lengths; indentation is never used to end a block. After any token
//! the parser skips ASCII whitespace (space, tab, LF, CR). The first
//! grammar violation aborts parsing with a positioned [`Error`].
//!
//! ## Usage
//!
//! ```rust
//! use toon_codec::{decode, Value};
//!
//! let value = decode("{\n  name: John\n  age: 30\n}").unwrap();
//! let object = value.as_object().unwrap();
//! assert_eq!(object.get("age"), Some(&Value::Int(30)));
//! ```

use crate::scalar::parse_scalar;
use crate::{Error, Map, Result, Value};
use serde::de::value::{MapAccessDeserializer, MapDeserializer, SeqDeserializer};
use serde::de::{self, IntoDeserializer};
use serde::forward_to_deserialize_any;

/// Decodes a TOON document into a [`Value`], failing fast on the first
/// grammar violation.
///
/// The unknown-length header `[-]` is rejected here; it is only meaningful
/// to the streaming decoder.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{decode, Value};
///
/// assert_eq!(decode("42").unwrap(), Value::Int(42));
/// assert_eq!(decode("\"42\"").unwrap(), Value::Str("42".to_string()));
/// ```
///
/// # Errors
///
/// Returns a positioned [`Error`] for empty input, truncated input,
/// malformed headers, unterminated strings, or trailing content.
pub fn decode(input: &str) -> Result<Value> {
    let mut parser = Parser::new(input);
    parser.skip_whitespace();
    if parser.at_end() {
        return Err(Error::EmptyInput);
    }
    let value = parser.parse_value()?;
    parser.skip_whitespace();
    if !parser.at_end() {
        return Err(Error::unexpected_trailing(parser.line, parser.column));
    }
    Ok(value)
}

/// The strict recursive-descent parser.
pub(crate) struct Parser<'de> {
    input: &'de str,
    position: usize,
    line: usize,
    column: usize,
}

impl<'de> Parser<'de> {
    pub(crate) fn new(input: &'de str) -> Self {
        Parser {
            input,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Parser positioned on an isolated line of a larger source; the
    /// streaming decoder uses this to report real line numbers.
    pub(crate) fn new_at(input: &'de str, line: usize) -> Self {
        Parser {
            input,
            position: 0,
            line,
            column: 1,
        }
    }

    pub(crate) fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    pub(crate) fn location(&self) -> (usize, usize) {
        (self.line, self.column)
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

    pub(crate) fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if matches!(ch, ' ' | '\t' | '\n' | '\r') {
                self.next_char();
            } else {
                break;
            }
        }
    }

    pub(crate) fn skip_inline_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch == ' ' || ch == '\t' {
                self.next_char();
            } else {
                break;
            }
        }
    }

    /// Inline whitespace between cells, minus the delimiter itself — a tab
    /// delimiter must survive the skip.
    fn skip_cell_padding(&mut self, delimiter: char) {
        while let Some(ch) = self.peek_char() {
            if (ch == ' ' || ch == '\t') && ch != delimiter {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn parse_value(&mut self) -> Result<Value> {
        match self.peek_char() {
            None => Err(Error::unexpected_end(self.line, self.column, "a value")),
            Some('{') => self.parse_object(),
            Some('[') => self.parse_list(),
            Some('"') => self.parse_quoted_string().map(Value::Str),
            Some(_) => {
                let start = self.position;
                while let Some(ch) = self.peek_char() {
                    if matches!(ch, '\n' | '\r' | ',' | ':' | '}' | ']') {
                        break;
                    }
                    self.next_char();
                }
                Ok(parse_scalar(self.input[start..self.position].trim()))
            }
        }
    }

    /// Object = `{` (ws) (Field (ws))* `}` with Field = Key `:` Value.
    /// Duplicate keys resolve last-wins.
    fn parse_object(&mut self) -> Result<Value> {
        self.next_char(); // '{'
        self.skip_whitespace();
        let mut map = Map::new();
        loop {
            match self.peek_char() {
                None => {
                    return Err(Error::unexpected_end(self.line, self.column, "'}'"));
                }
                Some('}') => {
                    self.next_char();
                    break;
                }
                Some(_) => {
                    let key = self.parse_key()?;
                    self.skip_whitespace();
                    let value = self.parse_value()?;
                    map.insert(key, value);
                    self.skip_whitespace();
                }
            }
        }
        Ok(Value::Object(map))
    }

    /// Reads a key up to the `:` separator and consumes the separator. A
    /// line break or end of input before the colon is a grammar error.
    fn parse_key(&mut self) -> Result<String> {
        let start = self.position;
        loop {
            match self.peek_char() {
                Some(':') => {
                    let key = self.input[start..self.position].trim().to_string();
                    self.next_char();
                    return Ok(key);
                }
                Some('\n') | Some('\r') | None => {
                    return Err(Error::expected_char(self.line, self.column, ':'));
                }
                Some(_) => {
                    self.next_char();
                }
            }
        }
    }

    /// List = `[` Integer `]` (`{` Header `}`)? (`:`)? Element*, with
    /// exactly the declared number of elements. The colon after the header
    /// is accepted but not required.
    fn parse_list(&mut self) -> Result<Value> {
        self.next_char(); // '['
        if self.peek_char() == Some('-') {
            return Err(Error::invalid_array_length(
                self.line,
                self.column,
                "unknown length '-' is only accepted by the streaming decoder",
            ));
        }
        let declared = self.parse_length()?;
        match self.peek_char() {
            Some(']') => {
                self.next_char();
            }
            _ => return Err(Error::expected_char(self.line, self.column, ']')),
        }
        // header and colon must sit on the header line; a `{` on the next
        // line is the first element of a colon-less regular list
        self.skip_inline_whitespace();

        let header = if self.peek_char() == Some('{') {
            let header = self.parse_tabular_header()?;
            self.skip_inline_whitespace();
            Some(header)
        } else {
            None
        };

        if self.peek_char() == Some(':') {
            self.next_char();
        }

        if declared == 0 {
            return Ok(Value::List(Vec::new()));
        }

        match header {
            Some((columns, delimiter)) => {
                let mut rows = Vec::with_capacity(declared);
                for _ in 0..declared {
                    self.skip_whitespace();
                    if self.at_end() {
                        return Err(Error::unexpected_end(self.line, self.column, "a tabular row"));
                    }
                    rows.push(Value::Object(self.parse_row(&columns, delimiter)?));
                }
                Ok(Value::List(rows))
            }
            None => {
                let mut items = Vec::with_capacity(declared);
                for _ in 0..declared {
                    self.skip_whitespace();
                    if self.at_end() {
                        return Err(Error::unexpected_end(self.line, self.column, "a list element"));
                    }
                    items.push(self.parse_value()?);
                }
                Ok(Value::List(items))
            }
        }
    }

    fn parse_length(&mut self) -> Result<usize> {
        let start = self.position;
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.next_char();
        }
        let digits = &self.input[start..self.position];
        if digits.is_empty() {
            return Err(Error::invalid_array_length(
                self.line,
                self.column,
                "expected digits",
            ));
        }
        digits.parse().map_err(|_| {
            Error::invalid_array_length(self.line, self.column, "length out of range")
        })
    }

    /// Reads `{k1<delim>k2…}` and returns the trimmed column keys together
    /// with the inferred delimiter. The wire format carries no delimiter
    /// declaration, so the header text decides: comma if present, else tab,
    /// else pipe, else a single column.
    fn parse_tabular_header(&mut self) -> Result<(Vec<String>, char)> {
        self.next_char(); // '{'
        let start = self.position;
        loop {
            match self.peek_char() {
                Some('}') => break,
                Some('\n') | Some('\r') | None => {
                    return Err(Error::expected_char(self.line, self.column, '}'));
                }
                Some(_) => {
                    self.next_char();
                }
            }
        }
        let header = &self.input[start..self.position];
        self.next_char(); // '}'

        let delimiter = infer_delimiter(header);
        let columns = header
            .split(delimiter)
            .map(|key| key.trim().to_string())
            .collect();
        Ok((columns, delimiter))
    }

    /// Parses one line-bounded tabular row into an object over `columns`.
    /// A short row fails at the missing delimiter; a long row fails at the
    /// delimiter that begins the surplus cell.
    pub(crate) fn parse_row(&mut self, columns: &[String], delimiter: char) -> Result<Map> {
        let mut map = Map::with_capacity(columns.len());
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                self.skip_cell_padding(delimiter);
                if self.peek_char() == Some(delimiter) {
                    self.next_char();
                } else {
                    return Err(Error::expected_char(self.line, self.column, delimiter));
                }
            }
            self.skip_cell_padding(delimiter);
            let cell = self.parse_cell(delimiter)?;
            map.insert(column.clone(), cell);
        }
        self.skip_cell_padding(delimiter);
        match self.peek_char() {
            None | Some('\n') | Some('\r') => Ok(map),
            Some(_) => Err(Error::expected_char(self.line, self.column, '\n')),
        }
    }

    /// A cell is a quoted string or an unquoted token terminated by the
    /// delimiter or the end of the line, classified by the scalar rules.
    pub(crate) fn parse_cell(&mut self, delimiter: char) -> Result<Value> {
        if self.peek_char() == Some('"') {
            return self.parse_quoted_string().map(Value::Str);
        }
        let start = self.position;
        while let Some(ch) = self.peek_char() {
            if ch == delimiter || ch == '\n' || ch == '\r' {
                break;
            }
            self.next_char();
        }
        Ok(parse_scalar(self.input[start..self.position].trim()))
    }

    /// Quoted string with `\"`, `\\`, `\n`, `\r`, `\t` escapes. Unknown
    /// escapes are preserved literally. A line break before the closing
    /// quote is an unterminated string.
    fn parse_quoted_string(&mut self) -> Result<String> {
        self.next_char(); // '"'
        let mut result = String::new();
        loop {
            match self.peek_char() {
                None | Some('\n') | Some('\r') => {
                    return Err(Error::unterminated_string(self.line, self.column));
                }
                Some('"') => {
                    self.next_char();
                    return Ok(result);
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
                            return Err(Error::unterminated_string(self.line, self.column));
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

/// Picks the delimiter a header or row was written with: comma if present,
/// else tab, else pipe, else comma (single column).
pub(crate) fn infer_delimiter(header: &str) -> char {
    if header.contains(',') {
        ','
    } else if header.contains('\t') {
        '\t'
    } else if header.contains('|') {
        '|'
    } else {
        ','
    }
}

/// Deserializes a `T` from an already-decoded [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use toon_codec::{from_value, toon};
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let value = toon!({"x": 1, "y": 2});
/// assert_eq!(from_value::<Point>(value).unwrap(), Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error when the value's shape does not match `T`.
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: de::DeserializeOwned,
{
    T::deserialize(value)
}

impl<'de> de::Deserializer<'de> for Value {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Int(i) => visitor.visit_i64(i),
            Value::Float(f) => visitor.visit_f64(f),
            Value::Str(s) => visitor.visit_string(s),
            Value::List(items) => SeqDeserializer::new(items.into_iter()).deserialize_any(visitor),
            Value::Object(map) => MapDeserializer::new(map.into_iter()).deserialize_any(visitor),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self {
            Value::Null => visitor.visit_none(),
            other => visitor.visit_some(other),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self {
            // unit variants decode from their bare name
            Value::Str(s) => visitor.visit_enum(s.into_deserializer()),
            Value::Object(map) => {
                visitor.visit_enum(MapAccessDeserializer::new(MapDeserializer::new(
                    map.into_iter(),
                )))
            }
            other => Err(Error::custom(format!(
                "expected enum representation, found {}",
                other
            ))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier ignored_any
    }
}

impl<'de> IntoDeserializer<'de, Error> for Value {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self::Deserializer {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toon;

    #[test]
    fn test_scalar_root() {
        assert_eq!(decode("42").unwrap(), Value::Int(42));
        assert_eq!(decode("  true  ").unwrap(), Value::Bool(true));
        assert_eq!(decode("hello").unwrap(), Value::Str("hello".to_string()));
        assert_eq!(decode("\"\"").unwrap(), Value::Str(String::new()));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(decode(""), Err(Error::EmptyInput)));
        assert!(matches!(decode("  \n\t "), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_object() {
        let value = decode("{\n  name: John\n  age: 30\n}").unwrap();
        assert_eq!(value, toon!({"name": "John", "age": 30}));
    }

    #[test]
    fn test_object_duplicate_key_last_wins() {
        let value = decode("{\n  a: 1\n  a: 2\n}").unwrap();
        assert_eq!(value, toon!({"a": 2}));
    }

    #[test]
    fn test_missing_colon_in_key() {
        let err = decode("{\n  name John\n}").unwrap_err();
        assert!(matches!(err, Error::ExpectedCharacter { expected: ':', .. }));
    }

    #[test]
    fn test_unclosed_object() {
        let err = decode("{\n  a: 1\n").unwrap_err();
        assert!(matches!(err, Error::UnexpectedEnd { .. }));
    }

    #[test]
    fn test_regular_list() {
        let value = decode("[3]:\n  1\n  2\n  3").unwrap();
        assert_eq!(value, toon!([1, 2, 3]));
    }

    #[test]
    fn test_list_header_colon_optional() {
        let value = decode("[2]\n  1\n  2").unwrap();
        assert_eq!(value, toon!([1, 2]));
    }

    #[test]
    fn test_list_too_short() {
        let err = decode("[3]:\n  1\n  2").unwrap_err();
        assert!(matches!(err, Error::UnexpectedEnd { .. }));
    }

    #[test]
    fn test_list_too_long_is_trailing() {
        let err = decode("[2]:\n  1\n  2\n  3").unwrap_err();
        assert!(matches!(err, Error::UnexpectedTrailing { .. }));
    }

    #[test]
    fn test_invalid_length() {
        assert!(matches!(
            decode("[x]:"),
            Err(Error::InvalidArrayLength { .. })
        ));
        assert!(matches!(
            decode("[-]:\n  1"),
            Err(Error::InvalidArrayLength { .. })
        ));
    }

    #[test]
    fn test_tabular_list() {
        let value = decode("[2]{sku,qty,price}:\n  A1,2,9.99\n  B2,1,14.5").unwrap();
        assert_eq!(
            value,
            toon!([
                {"sku": "A1", "qty": 2, "price": 9.99},
                {"sku": "B2", "qty": 1, "price": 14.5}
            ])
        );
    }

    #[test]
    fn test_tabular_quoted_cells() {
        let value = decode("[1]{name,desc}:\n  \"Product, A\",\"line\\nbreak\"").unwrap();
        assert_eq!(
            value,
            toon!([{"name": "Product, A", "desc": "line\nbreak"}])
        );
    }

    #[test]
    fn test_tabular_row_too_short() {
        let err = decode("[1]{a,b}:\n  1").unwrap_err();
        assert!(matches!(err, Error::ExpectedCharacter { expected: ',', .. }));
    }

    #[test]
    fn test_tabular_row_too_long() {
        let err = decode("[1]{a,b}:\n  1,2,3").unwrap_err();
        assert!(matches!(err, Error::ExpectedCharacter { expected: '\n', .. }));
    }

    #[test]
    fn test_tabular_pipe_delimiter_inferred() {
        let value = decode("[1]{id|name}:\n  1|Alice").unwrap();
        assert_eq!(value, toon!([{"id": 1, "name": "Alice"}]));
    }

    #[test]
    fn test_unterminated_string() {
        assert!(matches!(
            decode("\"abc"),
            Err(Error::UnterminatedString { .. })
        ));
        assert!(matches!(
            decode("\"abc\ndef\""),
            Err(Error::UnterminatedString { .. })
        ));
    }

    #[test]
    fn test_trailing_content() {
        // an unquoted root token absorbs inner spaces, so this is one string
        assert_eq!(
            decode("42 extra").unwrap(),
            Value::Str("42 extra".to_string())
        );
        // but content after a completed composite is trailing
        let err = decode("{} junk").unwrap_err();
        assert!(matches!(err, Error::UnexpectedTrailing { .. }));
    }

    #[test]
    fn test_error_positions() {
        let err = decode("{\n  name John\n}").unwrap_err();
        assert_eq!(err.position(), Some((2, 12)));
    }

    #[test]
    fn test_nested_document() {
        let text = "{\n  company: Acme\n  employees[2]{name,role}: x\n}";
        // key containing brackets is read verbatim up to the colon
        let value = decode(text).unwrap();
        let object = value.as_object().unwrap();
        assert!(object.contains_key("employees[2]{name,role}"));
    }

    #[test]
    fn test_from_value_struct() {
        use serde::Deserialize;

        #[derive(Deserialize, PartialEq, Debug)]
        struct User {
            name: String,
            age: u32,
            tags: Vec<String>,
        }

        let value = toon!({"name": "Alice", "age": 30, "tags": ["a", "b"]});
        let user: User = from_value(value).unwrap();
        assert_eq!(
            user,
            User {
                name: "Alice".to_string(),
                age: 30,
                tags: vec!["a".to_string(), "b".to_string()],
            }
        );
    }

    #[test]
    fn test_from_value_option_and_enum() {
        use serde::Deserialize;

        #[derive(Deserialize, PartialEq, Debug)]
        enum Status {
            Active,
            Banned { reason: String },
        }

        assert_eq!(
            from_value::<Option<i32>>(Value::Null).unwrap(),
            None
        );
        assert_eq!(
            from_value::<Status>(Value::Str("Active".to_string())).unwrap(),
            Status::Active
        );
        let banned = toon!({"Banned": {"reason": "spam"}});
        assert_eq!(
            from_value::<Status>(banned).unwrap(),
            Status::Banned {
                reason: "spam".to_string()
            }
        );
    }
}
