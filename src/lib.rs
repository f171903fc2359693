//! # toon_codec
//!
//! A codec for the TOON (Token-Oriented Object Notation) format.
//!
//! ## What is TOON?
//!
//! TOON is a compact, human-readable text format for structured data,
//! designed to minimize the number of subword tokens a Large Language
//! Model consumes. Compared with JSON it drops the per-line braces and the
//! repeated keys of uniform arrays while remaining unambiguous and
//! losslessly convertible to and from a JSON-like value model.
//!
//! ## Key Features
//!
//! - **Deterministic encoder**: identical input values produce
//!   byte-identical output — object keys and tabular columns are emitted
//!   in lexicographic order
//! - **Strict decoder**: fails fast with line/column positions
//! - **Lenient decoder**: recovers from grammar errors, returning a
//!   partial value plus an ordered diagnostic list
//! - **Streaming adapters**: encode an unbounded iterator of values, or
//!   pull rows one at a time, in bounded memory
//! - **Serde compatible**: project any `Serialize` type into the value
//!   model and back
//!
//! ## Quick Start
//!
//! ```rust
//! use toon_codec::{decode, encode, toon};
//!
//! let value = toon!({
//!     "name": "John",
//!     "age": 30
//! });
//!
//! let text = encode(&value);
//! assert_eq!(text, "{\n  age: 30\n  name: John\n}");
//! assert_eq!(decode(&text).unwrap(), value);
//! ```
//!
//! ### Tabular Lists
//!
//! Lists of uniform objects serialize as a header plus rows:
//!
//! ```rust
//! use toon_codec::{encode, toon};
//!
//! let products = toon!([
//!     {"sku": "A1", "qty": 2, "price": 9.99},
//!     {"sku": "B2", "qty": 1, "price": 14.5}
//! ]);
//!
//! assert_eq!(
//!     encode(&products),
//!     "[2]{price,qty,sku}:\n  9.99,2,A1\n  14.5,1,B2"
//! );
//! ```
//!
//! ### Recovering From Malformed Input
//!
//! ```rust
//! use toon_codec::decode_lenient;
//!
//! let (value, diagnostics) = decode_lenient("[3]:\n  1\n  2");
//! assert!(value.is_some());
//! assert!(diagnostics[0].message.contains("length mismatch"));
//! ```
//!
//! ## Format
//!
//! See the [`format`] module for the full wire-format description.

mod classify;
pub mod de;
pub mod error;
pub mod format;
pub mod lenient;
pub mod macros;
pub mod map;
pub mod options;
mod scalar;
pub mod ser;
pub mod stream;
pub mod value;

pub use de::{decode, from_value};
pub use error::{Error, Result};
pub use lenient::{decode_lenient, Diagnostic};
pub use map::Map;
pub use options::{Delimiter, EncodeOptions};
pub use ser::{encode, encode_with_options, to_value, ValueSerializer};
pub use stream::{stream_decode_rows, stream_encode, RowStream, StreamEncoder};
pub use value::Value;

use serde::Serialize;
use std::io;

/// Serialize any `T: Serialize` to a TOON string.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use toon_codec::to_string;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let toon = to_string(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(toon, "{\n  x: 1\n  y: 2\n}");
/// ```
///
/// # Errors
///
/// Returns an error if the value does not map to the TOON value model.
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &EncodeOptions::default())
}

/// Serialize any `T: Serialize` to a TOON string with custom options.
///
/// # Errors
///
/// Returns an error if the value does not map to the TOON value model.
pub fn to_string_with_options<T>(value: &T, options: &EncodeOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Ok(encode_with_options(&to_value(value)?, options))
}

/// Serialize any `T: Serialize` to a writer in TOON format.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, &EncodeOptions::default())
}

/// Serialize any `T: Serialize` to a writer in TOON format with custom
/// options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: &EncodeOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from a string of TOON text.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use toon_codec::from_str;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("{\n  x: 1\n  y: 2\n}").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid TOON or cannot be
/// deserialized to `T`. Decode errors carry line and column information.
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    from_value(decode(s)?)
}

/// Deserialize an instance of type `T` from an I/O stream of TOON.
///
/// # Errors
///
/// Returns an error if reading fails, the input is not valid TOON, or the
/// data cannot be deserialized to `T`.
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: serde::de::DeserializeOwned,
{
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&text)
}

/// Deserialize an instance of type `T` from bytes of TOON text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid TOON, or
/// cannot be deserialized to `T`.
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}
