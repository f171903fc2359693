//! TOON encoding.
//!
//! This module provides the text encoder, which turns a [`Value`] tree into
//! a TOON document, and [`ValueSerializer`], which projects any
//! `T: Serialize` into the value model.
//!
//! ## Overview
//!
//! The encoder applies TOON's space-saving projections:
//!
//! - **Tabular lists**: uniform object lists serialize as a header plus rows
//! - **Quote minimization**: strings are unquoted when safe
//! - **Deterministic output**: object keys and tabular columns are emitted
//!   in lexicographic order, so identical inputs produce identical bytes
//!
//! ## Usage
//!
//! ```rust
//! use toon_codec::{encode, toon};
//!
//! let value = toon!({"name": "John", "age": 30});
//! assert_eq!(encode(&value), "{\n  age: 30\n  name: John\n}");
//! ```

use crate::classify::{classify_list, Shape};
use crate::scalar::write_scalar;
use crate::{EncodeOptions, Error, Map, Result, Value};
use serde::{ser, Serialize};

/// Encodes a value with default options.
///
/// The output never ends with a newline. Encoding a well-formed [`Value`]
/// cannot fail.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{encode, Value};
///
/// assert_eq!(encode(&Value::Int(42)), "42");
/// assert_eq!(encode(&Value::List(vec![])), "[0]");
/// ```
#[must_use]
pub fn encode(value: &Value) -> String {
    encode_with_options(value, &EncodeOptions::default())
}

/// Encodes a value with explicit options.
#[must_use]
pub fn encode_with_options(value: &Value, options: &EncodeOptions) -> String {
    encode_block(value, options, 0)
}

/// Renders a value as it appears at nesting depth `depth`. The first line
/// carries no indentation (the caller positions it); continuation lines are
/// indented relative to `depth`. Shared with the streaming encoder, which
/// emits list elements at depth 1.
pub(crate) fn encode_block(value: &Value, options: &EncodeOptions, depth: usize) -> String {
    let mut encoder = Encoder {
        options,
        delimiter: options.delimiter.as_char(),
        out: String::with_capacity(256),
    };
    encoder.write_value(value, depth);
    encoder.out
}

struct Encoder<'a> {
    options: &'a EncodeOptions,
    delimiter: char,
    out: String,
}

impl Encoder<'_> {
    fn write_indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.out.push_str(&self.options.indent);
        }
    }

    /// True when a value renders on a single line and can share the line
    /// with its key.
    fn is_inline(value: &Value) -> bool {
        match value {
            Value::List(items) => items.is_empty(),
            Value::Object(map) => map.is_empty(),
            _ => true,
        }
    }

    fn write_value(&mut self, value: &Value, depth: usize) {
        match value {
            Value::Object(map) => self.write_object(map, depth),
            Value::List(items) => self.write_list(items, depth),
            scalar => write_scalar(scalar, self.delimiter, &mut self.out),
        }
    }

    fn write_object(&mut self, map: &Map, depth: usize) {
        if map.is_empty() {
            self.out.push_str("{}");
            return;
        }
        self.out.push('{');
        // scratch key vector, sorted once and dropped at end of scope
        let keys = map.sorted_keys();
        for key in keys {
            let value = map.get(key).unwrap_or(&Value::Null);
            self.out.push('\n');
            self.write_indent(depth + 1);
            self.out.push_str(key);
            self.out.push(':');
            if Self::is_inline(value) {
                self.out.push(' ');
                self.write_value(value, depth + 1);
            } else {
                self.out.push('\n');
                self.write_indent(depth + 1);
                self.write_value(value, depth + 1);
            }
        }
        self.out.push('\n');
        self.write_indent(depth);
        self.out.push('}');
    }

    fn write_list(&mut self, items: &[Value], depth: usize) {
        if items.is_empty() {
            self.out.push_str("[0]");
            return;
        }
        match classify_list(items, self.delimiter) {
            Shape::Tabular(columns) => {
                self.out.push('[');
                self.out.push_str(&items.len().to_string());
                self.out.push(']');
                self.out.push('{');
                for (i, column) in columns.iter().enumerate() {
                    if i > 0 {
                        self.out.push(self.delimiter);
                    }
                    self.out.push_str(column);
                }
                self.out.push_str("}:");
                for item in items {
                    self.out.push('\n');
                    self.write_indent(depth + 1);
                    self.write_row(item, &columns);
                }
            }
            Shape::List => {
                self.out.push('[');
                self.out.push_str(&items.len().to_string());
                self.out.push(']');
                if self.options.length_marker {
                    self.out.push(':');
                }
                for item in items {
                    self.out.push('\n');
                    self.write_indent(depth + 1);
                    self.write_value(item, depth + 1);
                }
            }
        }
    }

    /// Emits one tabular row: delimited scalar cells in column order. The
    /// classifier guarantees every cell exists and is a scalar.
    fn write_row(&mut self, item: &Value, columns: &[String]) {
        let object = item.as_object();
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                self.out.push(self.delimiter);
            }
            let cell = object
                .and_then(|map| map.get(column))
                .unwrap_or(&Value::Null);
            write_scalar(cell, self.delimiter, &mut self.out);
        }
    }
}

/// Converts any `T: Serialize` into a [`Value`].
///
/// This is the host-value projection: values that do not map to the model
/// (for example maps with non-string keys) fail with
/// [`Error::UnsupportedValue`].
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use toon_codec::{to_value, Value};
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_object());
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be projected into the model.
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Serializer producing a [`Value`] instead of text.
pub struct ValueSerializer;

fn key_string(value: Value) -> Result<String> {
    match value {
        Value::Str(s) => Ok(s),
        other => Err(Error::unsupported_value(&format!(
            "map key must be a string, found {}",
            other
        ))),
    }
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMapValue;
    type SerializeStruct = SerializeMapValue;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Int(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        if v <= i64::MAX as u64 {
            Ok(Value::Int(v as i64))
        } else {
            Ok(Value::Float(v as f64))
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Float(v as f64))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::Str(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::Str(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::List(v.iter().map(|b| Value::Int(*b as i64)).collect()))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::Str(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let mut map = Map::new();
        map.insert(variant.to_string(), value.serialize(self)?);
        Ok(Value::Object(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(SerializeVec {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            variant,
            items: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(SerializeMapValue {
            map: Map::with_capacity(len.unwrap_or(0)),
            next_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Ok(SerializeStructVariant {
            variant,
            map: Map::with_capacity(len),
        })
    }
}

pub struct SerializeVec {
    items: Vec<Value>,
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::List(self.items))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

pub struct SerializeTupleVariant {
    variant: &'static str,
    items: Vec<Value>,
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let mut map = Map::new();
        map.insert(self.variant.to_string(), Value::List(self.items));
        Ok(Value::Object(map))
    }
}

pub struct SerializeMapValue {
    map: Map,
    next_key: Option<String>,
}

impl ser::SerializeMap for SerializeMapValue {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.next_key = Some(key_string(key.serialize(ValueSerializer)?)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called before serialize_key"))?;
        self.map.insert(key, value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStruct for SerializeMapValue {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map
            .insert(key.to_string(), value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

pub struct SerializeStructVariant {
    variant: &'static str,
    map: Map,
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map
            .insert(key.to_string(), value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let mut outer = Map::new();
        outer.insert(self.variant.to_string(), Value::Object(self.map));
        Ok(Value::Object(outer))
    }
}
