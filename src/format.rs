//! TOON Wire Format
//!
//! This module documents the TOON (Token-Oriented Object Notation) text
//! format as implemented by this library.
//!
//! # Overview
//!
//! TOON is a minimalist data serialization format designed for efficient
//! token usage in Large Language Model (LLM) contexts. It removes the
//! syntactic noise JSON spends on every line — braces per value, repeated
//! keys in uniform arrays, quotes around plain words — while remaining
//! unambiguous and losslessly convertible to and from the value model.
//!
//! # Core Syntax
//!
//! ## Objects
//!
//! A non-empty object opens with `{`, holds one `key: value` field per
//! line, and closes with `}` on its own line:
//!
//! ```text
//! {
//!   age: 30
//!   name: John
//! }
//! ```
//!
//! **Rules**:
//! - Keys are written raw: everything up to the `:` separator, trimmed.
//!   Keys must be non-empty and must not contain `:`, line breaks or
//!   control characters.
//! - The encoder emits fields in lexicographic key order, so identical
//!   values always produce identical bytes.
//! - Blocks are closed by the `}` delimiter, never by indentation — the
//!   indentation exists for human readers only.
//! - Duplicate keys on input resolve last-wins.
//! - The empty object is the literal `{}`.
//!
//! ## Scalars
//!
//! | Type | Syntax | Example |
//! |------|--------|---------|
//! | Null | `null` | `note: null` |
//! | Boolean | `true` or `false` | `active: true` |
//! | Integer | Decimal digits, optional `-` | `count: 42` |
//! | Float | Decimal with `.`, optional exponent | `price: 19.99` |
//! | String | Unquoted or `"quoted"` | `name: Alice` |
//!
//! Whole floats are written with a `.0` suffix (`2.0`, not `2`) so they
//! decode back as floats. Non-finite floats (NaN, ±∞) are written as
//! `null`.
//!
//! ## Strings
//!
//! Strings are **unquoted by default**. Quoting is required when the
//! string:
//!
//! - is empty, or starts/ends with whitespace
//! - equals a reserved word: `true`, `false`, `null`
//! - parses as a number: `"42"`, `"-3.14"`, `"1e-6"`
//! - contains a structural character: `,`, `:`, `{`, `}`, `[`, `]`, `"`,
//!   `\`, the active delimiter, or any control character
//!
//! **Escape sequences** (in quoted strings): `\"`, `\\`, `\n`, `\r`, `\t`.
//! Unknown escapes are preserved literally.
//!
//! ## Lists
//!
//! A regular list declares its length, then holds one element per line:
//!
//! ```text
//! [3]:
//!   1
//!   2
//!   3
//! ```
//!
//! The declared length drives parsing: the decoder reads exactly that many
//! elements. The `:` after `]` is optional on input; the encoder omits it
//! when the `length_marker` option is off. The empty list is the literal
//! `[0]`.
//!
//! ## Tabular Lists
//!
//! A list of objects sharing one set of scalar fields serializes as a
//! header plus rows, eliminating the repeated keys:
//!
//! ```text
//! [2]{price,qty,sku}:
//!   9.99,2,A1
//!   14.5,1,B2
//! ```
//!
//! - Column keys are sorted lexicographically.
//! - One row per line; cells in header order, separated by the delimiter.
//! - A cell containing the delimiter is always quoted.
//! - `null` cells are written literally.
//!
//! Any list that does not fit the tabular shape — a missing key, a nested
//! composite field, a non-object element — falls back to the regular form.
//!
//! # Delimiters
//!
//! The field separator for tabular headers and rows is configurable:
//! comma (default), tab, pipe, or any character outside the reserved set
//! (`:`, `"`, `\`, `{`, `}`, `[`, `]`, LF, CR). The format carries no
//! delimiter declaration; the decoder infers it from the header text
//! (comma if present, else tab, else pipe).
//!
//! # Streaming
//!
//! When the element count is unknown — the sequence is produced
//! incrementally, possibly unbounded — the header uses `-` in place of the
//! length:
//!
//! ```text
//! [-]{id,name}:
//!   1,Alice
//!   2,Bob
//! ```
//!
//! Only the streaming row decoder accepts this form; the batch decoder
//! rejects it. An unknown-length stream terminates at a blank line or end
//! of input.
//!
//! # Encoding
//!
//! - Character set: UTF-8, not normalised.
//! - Line terminator on output: LF. Input accepts LF and CRLF.
//! - Indentation: configurable, space and tab characters only.
//! - Output never ends with a trailing newline.
//!
//! # Comparison
//!
//! **JSON** (123 chars):
//! ```json
//! [{"id":1,"name":"Alice","active":true},
//!  {"id":2,"name":"Bob","active":true}]
//! ```
//!
//! **TOON** (59 chars):
//! ```text
//! [2]{active,id,name}:
//!   true,1,Alice
//!   true,2,Bob
//! ```
//!
//! # Limitations
//!
//! - Map keys must be strings.
//! - Tabular lists require identical object structure with scalar values.
//! - Field order is sorted lexicographically, which may differ from the
//!   original struct declaration order.
//! - Comments are not supported.

// This module contains only documentation; no implementation code
