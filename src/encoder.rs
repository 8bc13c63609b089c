//! The fluent encoder: value plus configuration, serialized on demand.

use crate::error::EncodeError;
use crate::options::{Flags, Options};
use crate::ser;
use crate::value::Value;
use serde::Serialize;

/// An immutable wrapper around a value and its encode configuration.
///
/// # Examples
///
/// ```
/// use fluent_json::{encoder_for, Map, Value};
///
/// let mut map = Map::new();
/// map.insert("foo".to_string(), Value::from("bar"));
///
/// let encoder = encoder_for(map);
/// assert_eq!(encoder.serialize().unwrap(), r#"{"foo":"bar"}"#);
/// assert_eq!(encoder.prettify().unwrap(), "{\n    \"foo\": \"bar\"\n}");
/// ```
#[derive(Debug, Clone)]
pub struct Encoder {
    value: Value,
    options: Options,
}

impl Encoder {
    /// Wraps the given value with default options.
    pub fn new(value: impl Into<Value>) -> Self {
        Encoder::with_options(value, Options::default())
    }

    pub fn with_options(value: impl Into<Value>, options: Options) -> Self {
        Encoder {
            value: value.into(),
            options,
        }
    }

    /// Wraps any `Serialize` type by converting it to a [`Value`] first.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Encoder, EncodeError> {
        Ok(Encoder::new(ser::to_value(value)?))
    }

    /// The configuration attached to this instance.
    pub fn options(&self) -> Options {
        self.options
    }

    /// Returns a new encoder over the same value with the given depth
    /// limit. The receiver is unchanged.
    pub fn with_depth(&self, max_depth: usize) -> Encoder {
        Encoder::with_options(self.value.clone(), self.options.with_depth(max_depth))
    }

    /// Returns a new encoder with the flag set replaced.
    pub fn with_flags(&self, flags: Flags) -> Encoder {
        Encoder::with_options(self.value.clone(), self.options.with_flags(flags))
    }

    /// Returns a new encoder with the given flags merged in (bitwise or).
    pub fn add_flags(&self, flags: Flags) -> Encoder {
        Encoder::with_options(self.value.clone(), self.options.add_flags(flags))
    }

    /// Encodes the wrapped value, honoring `max_depth` and flags.
    ///
    /// Compact unless the configuration carries
    /// [`Flags::PRETTY_PRINT`]. Fails on non-finite numbers or nesting
    /// deeper than the depth limit.
    pub fn serialize(&self) -> Result<String, EncodeError> {
        ser::stringify(&self.value, self.options)
    }

    /// Encodes the wrapped value with the pretty-print flag merged into a
    /// transient copy of the configuration; this encoder's own flags are
    /// untouched.
    pub fn prettify(&self) -> Result<String, EncodeError> {
        ser::stringify(&self.value, self.options.add_flags(Flags::PRETTY_PRINT))
    }
}
