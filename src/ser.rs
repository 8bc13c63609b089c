//! JSON encoding: [`Value`] to text, plus the serde bridge that turns any
//! `Serialize` type into a [`Value`] first.

use crate::error::{EncodeError, EncodeErrorKind};
use crate::options::{Flags, Options};
use crate::value::{Map, Number, Value};
use serde::ser::{self, Serialize};

/// Encodes a `Serialize` value as compact JSON text with default options.
///
/// # Examples
///
/// ```
/// use fluent_json::to_string;
///
/// #[derive(serde::Serialize)]
/// struct User {
///     id: u64,
///     name: String,
/// }
///
/// let user = User {
///     id: 42,
///     name: "Ada".to_string(),
/// };
///
/// assert_eq!(to_string(&user).unwrap(), r#"{"id":42,"name":"Ada"}"#);
/// ```
pub fn to_string<T: Serialize + ?Sized>(value: &T) -> Result<String, EncodeError> {
    to_string_with_options(value, Options::default())
}

/// Encodes a `Serialize` value as JSON text, honoring `max_depth` and flags.
pub fn to_string_with_options<T: Serialize + ?Sized>(
    value: &T,
    options: Options,
) -> Result<String, EncodeError> {
    let value = to_value(value)?;
    stringify(&value, options)
}

/// Encodes a `Serialize` value as 4-space-indented multi-line JSON text.
pub fn to_string_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String, EncodeError> {
    to_string_with_options(value, Options::default().add_flags(Flags::PRETTY_PRINT))
}

/// Converts any `Serialize` type into a [`Value`].
///
/// Maps must have string keys (`char` keys are accepted and stringified);
/// anything else fails with [`EncodeErrorKind::KeyMustBeString`].
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value, EncodeError> {
    value.serialize(ValueSerializer)
}

/// Writes a [`Value`] as JSON text.
///
/// Compact output carries no extraneous whitespace; with
/// [`Flags::PRETTY_PRINT`] every container member sits on its own line,
/// indented four spaces per level. Non-finite numbers and nesting deeper
/// than `options.max_depth` fail.
pub fn stringify(value: &Value, options: Options) -> Result<String, EncodeError> {
    if options.max_depth == 0 {
        return Err(EncodeError::new(
            EncodeErrorKind::InvalidDepth,
            "maximum depth must be at least 1",
        ));
    }

    let mut out = String::new();
    write_value(&mut out, value, &options, 0)?;
    Ok(out)
}

fn indent(level: usize) -> String {
    " ".repeat(level * 4)
}

fn write_value(
    out: &mut String,
    value: &Value,
    options: &Options,
    level: usize,
) -> Result<(), EncodeError> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(number) => write_number(out, number)?,
        Value::String(text) => write_string(out, text, options.flags),
        Value::Array(items) => {
            if level + 1 > options.max_depth {
                return Err(depth_error(options.max_depth));
            }
            let pretty = options.flags.contains(Flags::PRETTY_PRINT);
            out.push('[');
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                if pretty {
                    out.push('\n');
                    out.push_str(&indent(level + 1));
                }
                write_value(out, item, options, level + 1)?;
            }
            if pretty && !items.is_empty() {
                out.push('\n');
                out.push_str(&indent(level));
            }
            out.push(']');
        }
        Value::Object(map) => {
            if level + 1 > options.max_depth {
                return Err(depth_error(options.max_depth));
            }
            let pretty = options.flags.contains(Flags::PRETTY_PRINT);
            out.push('{');
            for (index, (key, item)) in map.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                if pretty {
                    out.push('\n');
                    out.push_str(&indent(level + 1));
                }
                write_string(out, key, options.flags);
                out.push(':');
                if pretty {
                    out.push(' ');
                }
                write_value(out, item, options, level + 1)?;
            }
            if pretty && !map.is_empty() {
                out.push('\n');
                out.push_str(&indent(level));
            }
            out.push('}');
        }
    }

    Ok(())
}

fn depth_error(max_depth: usize) -> EncodeError {
    EncodeError::new(
        EncodeErrorKind::DepthLimitExceeded,
        format!("nesting exceeds maximum depth of {}", max_depth),
    )
}

fn write_number(out: &mut String, number: &Number) -> Result<(), EncodeError> {
    match number {
        Number::I64(n) => out.push_str(&n.to_string()),
        Number::U64(n) => out.push_str(&n.to_string()),
        Number::F64(n) => {
            if !n.is_finite() {
                return Err(EncodeError::new(
                    EncodeErrorKind::NonFiniteNumber,
                    "cannot encode a non-finite number",
                ));
            }
            // Whole floats keep a trailing ".0" so the integer/float
            // distinction survives a round trip.
            if n.fract() == 0.0 {
                out.push_str(&format!("{:.1}", n));
            } else {
                out.push_str(&format!("{}", n));
            }
        }
    }
    Ok(())
}

fn write_string(out: &mut String, text: &str, flags: Flags) {
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            ch if ch.is_control() => out.push_str(&format!("\\u{:04x}", ch as u32)),
            ch if (ch as u32) > 0x7F && flags.contains(Flags::ESCAPE_UNICODE) => {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units).iter() {
                    out.push_str(&format!("\\u{:04x}", unit));
                }
            }
            ch => out.push(ch),
        }
    }
    out.push('"');
}

struct ValueSerializer;

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = EncodeError;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Value, EncodeError> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value, EncodeError> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<Value, EncodeError> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<Value, EncodeError> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<Value, EncodeError> {
        Ok(Value::Number(Number::I64(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Value, EncodeError> {
        self.serialize_i64(v as i64)
    }

    fn serialize_u16(self, v: u16) -> Result<Value, EncodeError> {
        self.serialize_i64(v as i64)
    }

    fn serialize_u32(self, v: u32) -> Result<Value, EncodeError> {
        self.serialize_i64(v as i64)
    }

    fn serialize_u64(self, v: u64) -> Result<Value, EncodeError> {
        // Small unsigned values normalize to I64, matching the decoder.
        match i64::try_from(v) {
            Ok(i) => Ok(Value::Number(Number::I64(i))),
            Err(_) => Ok(Value::Number(Number::U64(v))),
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Value, EncodeError> {
        self.serialize_f64(v as f64)
    }

    fn serialize_f64(self, v: f64) -> Result<Value, EncodeError> {
        Ok(Value::Number(Number::F64(v)))
    }

    fn serialize_char(self, v: char) -> Result<Value, EncodeError> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value, EncodeError> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value, EncodeError> {
        Ok(Value::Array(
            v.iter()
                .map(|byte| Value::Number(Number::I64(*byte as i64)))
                .collect(),
        ))
    }

    fn serialize_none(self) -> Result<Value, EncodeError> {
        Ok(Value::Null)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Value, EncodeError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value, EncodeError> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value, EncodeError> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value, EncodeError> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Value, EncodeError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value, EncodeError> {
        let mut map = Map::new();
        map.insert(variant.to_string(), to_value(value)?);
        Ok(Value::Object(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq, EncodeError> {
        Ok(SerializeVec {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple, EncodeError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct, EncodeError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant, EncodeError> {
        Ok(SerializeTupleVariant {
            variant,
            items: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, EncodeError> {
        Ok(SerializeMap {
            map: Map::new(),
            next_key: None,
        })
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, EncodeError> {
        self.serialize_map(None)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, EncodeError> {
        Ok(SerializeStructVariant {
            variant,
            map: Map::new(),
        })
    }
}

struct SerializeVec {
    items: Vec<Value>,
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), EncodeError> {
        self.items.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value, EncodeError> {
        Ok(Value::Array(self.items))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), EncodeError> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, EncodeError> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), EncodeError> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, EncodeError> {
        ser::SerializeSeq::end(self)
    }
}

struct SerializeTupleVariant {
    variant: &'static str,
    items: Vec<Value>,
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), EncodeError> {
        self.items.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value, EncodeError> {
        let mut map = Map::new();
        map.insert(self.variant.to_string(), Value::Array(self.items));
        Ok(Value::Object(map))
    }
}

struct SerializeMap {
    map: Map<String, Value>,
    next_key: Option<String>,
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), EncodeError> {
        match to_value(key)? {
            Value::String(key) => {
                self.next_key = Some(key);
                Ok(())
            }
            _ => Err(EncodeError::new(
                EncodeErrorKind::KeyMustBeString,
                "object keys must be strings",
            )),
        }
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), EncodeError> {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| EncodeError::custom("value serialized before key"))?;
        self.map.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value, EncodeError> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), EncodeError> {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value, EncodeError> {
        Ok(Value::Object(self.map))
    }
}

struct SerializeStructVariant {
    variant: &'static str,
    map: Map<String, Value>,
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), EncodeError> {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value, EncodeError> {
        let mut map = Map::new();
        map.insert(self.variant.to_string(), Value::Object(self.map));
        Ok(Value::Object(map))
    }
}
