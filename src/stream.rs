//! Streaming adapters for root-level lists.
//!
//! The streaming encoder turns an iterator of values into a sequence of
//! text chunks without materialising the list; the streaming decoder pulls
//! rows one at a time from a reader, holding no more than a single line
//! plus the column schema in memory.
//!
//! Both sides use the `[-]` unknown-length header: the element count of a
//! stream cannot be written without buffering the whole sequence, so it is
//! intentionally omitted. The batch decoder rejects that header; only
//! [`stream_decode_rows`] accepts it.
//!
//! ## Usage
//!
//! ```rust
//! use toon_codec::{stream_encode, stream_decode_rows, toon, EncodeOptions, Value};
//!
//! let chunks: Vec<String> = stream_encode(
//!     vec![toon!({"id": 1}), toon!({"id": 2})],
//!     EncodeOptions::default(),
//! )
//! .collect();
//! assert_eq!(chunks[0], "[-]{id}:\n");
//!
//! let document = chunks.concat();
//! let rows: Vec<Value> = stream_decode_rows(document.as_bytes())
//!     .unwrap()
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(rows, vec![toon!({"id": 1}), toon!({"id": 2})]);
//! ```

use crate::classify::detect_tabular;
use crate::de::{infer_delimiter, Parser};
use crate::scalar::write_scalar;
use crate::ser::encode_block;
use crate::{EncodeOptions, Error, Result, Value};
use std::collections::VecDeque;
use std::io::BufRead;

/// Encodes an iterator of values as the elements of a root list, one chunk
/// per emitted line.
///
/// The first chunk is the header: the encoder peeks at most two items to
/// choose between the tabular projection (`[-]{k1,…}:`) and the regular
/// form (`[-]:`), then hands each item back as soon as it is rendered. The
/// sequence may be unbounded; nothing beyond the two peeked items is ever
/// buffered.
pub fn stream_encode<I>(items: I, options: EncodeOptions) -> StreamEncoder<I::IntoIter>
where
    I: IntoIterator<Item = Value>,
{
    StreamEncoder {
        items: items.into_iter(),
        options,
        pending: VecDeque::new(),
        columns: None,
        header_sent: false,
    }
}

/// Iterator of text chunks produced by [`stream_encode`].
pub struct StreamEncoder<I> {
    items: I,
    options: EncodeOptions,
    pending: VecDeque<Value>,
    columns: Option<Vec<String>>,
    header_sent: bool,
}

impl<I> StreamEncoder<I>
where
    I: Iterator<Item = Value>,
{
    fn header(&mut self) -> String {
        for _ in 0..2 {
            match self.items.next() {
                Some(item) => self.pending.push_back(item),
                None => break,
            }
        }
        let delimiter = self.options.delimiter.as_char();
        self.pending.make_contiguous();
        let (peeked, _) = self.pending.as_slices();
        self.columns = if peeked.is_empty() {
            None
        } else {
            detect_tabular(peeked, delimiter)
        };

        let mut header = String::from("[-]");
        if let Some(columns) = &self.columns {
            header.push('{');
            for (i, column) in columns.iter().enumerate() {
                if i > 0 {
                    header.push(delimiter);
                }
                header.push_str(column);
            }
            header.push('}');
        }
        header.push_str(":\n");
        header
    }

    /// Renders one item as a chunk ending in a newline. In tabular mode an
    /// item that stopped conforming degrades gracefully: missing or
    /// non-scalar fields become `null` cells and surplus fields are
    /// dropped — the shape chosen at the header is never revisited.
    fn render(&self, item: &Value) -> String {
        let delimiter = self.options.delimiter.as_char();
        let mut out = self.options.indent.clone();
        match &self.columns {
            Some(columns) => {
                for (i, column) in columns.iter().enumerate() {
                    if i > 0 {
                        out.push(delimiter);
                    }
                    let cell = item
                        .as_object()
                        .and_then(|map| map.get(column))
                        .filter(|value| value.is_scalar())
                        .unwrap_or(&Value::Null);
                    write_scalar(cell, delimiter, &mut out);
                }
            }
            None => out.push_str(&encode_block(item, &self.options, 1)),
        }
        out.push('\n');
        out
    }
}

impl<I> Iterator for StreamEncoder<I>
where
    I: Iterator<Item = Value>,
{
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if !self.header_sent {
            self.header_sent = true;
            return Some(self.header());
        }
        let item = self.pending.pop_front().or_else(|| self.items.next())?;
        Some(self.render(&item))
    }
}

/// Opens a row stream over a document whose root is a tabular or regular
/// list, including the `[-]` unknown-length forms.
///
/// Reads and parses the header line eagerly, so malformed headers fail
/// here rather than on the first row.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{stream_decode_rows, Value};
///
/// let mut rows = stream_decode_rows("[2]:\n  1\n  2\n".as_bytes()).unwrap();
/// assert_eq!(rows.next().unwrap().unwrap(), Value::Int(1));
/// assert_eq!(rows.next().unwrap().unwrap(), Value::Int(2));
/// assert!(rows.next().is_none());
/// ```
///
/// # Errors
///
/// Returns an error when the source is empty, unreadable, or the header
/// line is not a list header.
pub fn stream_decode_rows<R: BufRead>(mut reader: R) -> Result<RowStream<R>> {
    let mut buffer = String::new();
    let mut line_no = 0usize;
    loop {
        buffer.clear();
        let read = reader
            .read_line(&mut buffer)
            .map_err(|e| Error::io(&e.to_string()))?;
        if read == 0 {
            return Err(Error::EmptyInput);
        }
        line_no += 1;
        if !buffer.trim().is_empty() {
            break;
        }
    }
    let line = buffer.trim_end_matches(['\n', '\r']);
    let (remaining, columns, delimiter) = parse_stream_header(line, line_no)?;
    Ok(RowStream {
        reader,
        columns,
        delimiter,
        remaining,
        line_no,
        buffer: String::new(),
        done: false,
    })
}

/// Pull-based row iterator produced by [`stream_decode_rows`].
///
/// Owns the reader and releases it on drop. Memory use is bounded by one
/// line plus the column schema; the enclosing list is never constructed.
pub struct RowStream<R> {
    reader: R,
    columns: Option<Vec<String>>,
    delimiter: char,
    remaining: Option<usize>,
    line_no: usize,
    buffer: String,
    done: bool,
}

impl<R> RowStream<R> {
    /// Column keys from the tabular header, if the stream is tabular.
    #[must_use]
    pub fn columns(&self) -> Option<&[String]> {
        self.columns.as_deref()
    }

    fn parse_row_line(&self, line: &str) -> Result<Value> {
        let mut parser = Parser::new_at(line, self.line_no);
        parser.skip_inline_whitespace();
        match &self.columns {
            Some(columns) => Ok(Value::Object(parser.parse_row(columns, self.delimiter)?)),
            None => {
                let value = parser.parse_cell(self.delimiter)?;
                parser.skip_inline_whitespace();
                if parser.at_end() {
                    Ok(value)
                } else {
                    let (line, column) = parser.location();
                    Err(Error::unexpected_trailing(line, column))
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for RowStream<R> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Result<Value>> {
        if self.done {
            return None;
        }
        if self.remaining == Some(0) {
            self.done = true;
            return None;
        }
        loop {
            self.buffer.clear();
            let read = match self.reader.read_line(&mut self.buffer) {
                Ok(read) => read,
                Err(e) => {
                    self.done = true;
                    return Some(Err(Error::io(&e.to_string())));
                }
            };
            if read == 0 {
                self.done = true;
                return match self.remaining {
                    Some(missing) if missing > 0 => {
                        Some(Err(Error::unexpected_end(self.line_no + 1, 1, "a row")))
                    }
                    _ => None,
                };
            }
            self.line_no += 1;
            if self.buffer.trim().is_empty() {
                match self.remaining {
                    // a blank line terminates an unknown-length stream
                    None => {
                        self.done = true;
                        return None;
                    }
                    Some(_) => continue,
                }
            }
            if let Some(remaining) = &mut self.remaining {
                *remaining -= 1;
            }
            let line_end = self.buffer.trim_end_matches(['\n', '\r']).len();
            let row = self.parse_row_line(&self.buffer[..line_end]);
            if row.is_err() {
                self.done = true;
            }
            return Some(row);
        }
    }
}

/// Parses a root list header line: `[N]` or `[-]`, an optional `{…}`
/// column block, an optional `:`, and nothing else.
fn parse_stream_header(
    line: &str,
    line_no: usize,
) -> Result<(Option<usize>, Option<Vec<String>>, char)> {
    let trimmed = line.trim_start();
    let offset = line.len() - trimmed.len();
    let col = |idx: usize| offset + idx + 1;
    let bytes = trimmed.as_bytes();
    let mut i = 0;

    if bytes.first() != Some(&b'[') {
        return Err(Error::expected_char(line_no, col(i), '['));
    }
    i += 1;

    let remaining = if bytes.get(i) == Some(&b'-') {
        i += 1;
        None
    } else {
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == start {
            return Err(Error::invalid_array_length(
                line_no,
                col(i),
                "expected digits or '-'",
            ));
        }
        let declared = trimmed[start..i].parse().map_err(|_| {
            Error::invalid_array_length(line_no, col(start), "length out of range")
        })?;
        Some(declared)
    };

    if bytes.get(i) != Some(&b']') {
        return Err(Error::expected_char(line_no, col(i), ']'));
    }
    i += 1;

    let mut header_columns = None;
    if bytes.get(i) == Some(&b'{') {
        i += 1;
        let start = i;
        while i < bytes.len() && bytes[i] != b'}' {
            i += 1;
        }
        if i >= bytes.len() {
            return Err(Error::expected_char(line_no, col(i), '}'));
        }
        let header = &trimmed[start..i];
        i += 1;
        let delimiter = infer_delimiter(header);
        let columns = header
            .split(delimiter)
            .map(|key| key.trim().to_string())
            .collect::<Vec<_>>();
        header_columns = Some((columns, delimiter));
    }

    if bytes.get(i) == Some(&b':') {
        i += 1;
    }
    if !trimmed[i..].trim().is_empty() {
        return Err(Error::unexpected_trailing(line_no, col(i)));
    }

    Ok(match header_columns {
        Some((columns, delimiter)) => (remaining, Some(columns), delimiter),
        None => (remaining, None, ','),
    })
}
