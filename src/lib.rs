//! Fluent, immutable wrappers around JSON decoding and encoding, with
//! dotted-path accessors for reading nested values out of decoded
//! documents.
//!
//! The crate has three collaborating pieces: a pair of facade constructors
//! ([`decoder_for`] and [`encoder_for`]), a [`Decoder`] wrapping raw text
//! plus configuration, and an [`Encoder`] wrapping an in-memory value plus
//! configuration. Both wrappers are value objects: every `with_*`/`add_*`
//! mutator returns a new instance and never touches the receiver.
//!
//! # Features
//!
//! - **Deferred parsing**: constructing a decoder never parses; the text
//!   is decoded lazily and the accessor layer memoizes one associative
//!   projection per instance
//! - **Dotted-path access**: `get`/`has` and typed accessors resolve
//!   literal keys joined by `.` through nested objects
//! - **Loose coercion**: typed accessors coerce with a documented table
//!   (see below) instead of failing on type mismatches
//! - **Order preservation**: objects decode to insertion-ordered maps
//! - **Serde integration**: decode into any `Deserialize` type, encode any
//!   `Serialize` type
//!
//! # Usage
//!
//! ## Decoding
//!
//! ```
//! use fluent_json::decoder_for;
//!
//! let decoder = decoder_for(r#"{"id":1,"meta":{"age":67},"roles":["admin"]}"#);
//!
//! assert!(decoder.is_valid());
//! assert_eq!(decoder.as_int("id").unwrap(), 1);
//! assert_eq!(decoder.as_int("meta.age").unwrap(), 67);
//! assert_eq!(decoder.as_int_or("meta.unknown", 12).unwrap(), 12);
//! assert_eq!(decoder.as_array("roles").unwrap().len(), 1);
//! ```
//!
//! ## Encoding
//!
//! ```
//! use fluent_json::{encoder_for, Map, Value};
//!
//! let mut map = Map::new();
//! map.insert("foo".to_string(), Value::from("bar"));
//!
//! assert_eq!(encoder_for(map).serialize().unwrap(), r#"{"foo":"bar"}"#);
//! ```
//!
//! # Configuration
//!
//! Each wrapper carries an immutable [`Options`] pair of `max_depth`
//! (default 512; nesting strictly deeper fails) and a [`Flags`] bitset.
//! Flags merge with bitwise or, and bits the crate does not define are
//! forwarded unchanged:
//!
//! ```
//! use fluent_json::{decoder_for, Flags};
//!
//! let deep = decoder_for(r#"{"a":{"b":{"c":{"d":"e"}}}}"#);
//! let shallow = deep.with_depth(2);
//!
//! assert!(deep.is_valid());
//! assert!(!shallow.is_valid());
//! ```
//!
//! # Coercion table
//!
//! Typed accessors coerce the resolved value with these rules; a path that
//! does not resolve yields the supplied default instead.
//!
//! | from | `as_int` | `as_float` | `as_string` | `as_bool` | `as_array` |
//! |---|---|---|---|---|---|
//! | null | `0` | `0.0` | `""` | `false` | `[]` |
//! | bool | `0`/`1` | `0.0`/`1.0` | `"true"`/`"false"` | itself | `[]` |
//! | number | truncated | widened | formatted | `!= 0` | `[]` |
//! | string | numeric parse, else `0` | numeric parse, else `0.0` | itself | non-empty and not `"0"` | `[]` |
//! | array | `0` | `0.0` | compact JSON | non-empty | itself |
//! | object | `0` | `0.0` | compact JSON | non-empty | `[]` |
//!
//! # Error handling
//!
//! Syntactically invalid text and depth overflows fail with
//! [`DecodeError`], which carries the line and column where decoding
//! stopped. Path-resolution misses are not errors: `get`/`has` and the
//! typed accessors swallow them and return the default. Encoding fails
//! with [`EncodeError`] on non-finite numbers, depth overflow, or
//! non-string map keys; there is no non-throwing validity check on the
//! encode side.
//!
//! ```
//! use fluent_json::encoder_for;
//!
//! let result = encoder_for(f64::NAN).serialize();
//! assert!(result.is_err());
//! ```

pub mod de;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod options;
pub mod ser;
pub mod value;

pub use de::{from_str, from_str_with_options, parse, parse_with_options};
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{DecodeError, DecodeErrorKind, EncodeError, EncodeErrorKind};
pub use options::{DEFAULT_MAX_DEPTH, Flags, Options};
pub use ser::{stringify, to_string, to_string_pretty, to_string_with_options, to_value};
pub use value::{Map, Number, Value};

/// Wraps JSON text in a [`Decoder`] with default options.
///
/// Pure construction: no parsing happens until a projection or accessor is
/// called. Configure with the fluent mutators:
///
/// ```
/// use fluent_json::{decoder_for, Flags};
///
/// let decoder = decoder_for("[1,[2,[3]]]").with_depth(8);
/// assert!(decoder.is_valid());
/// ```
pub fn decoder_for(text: impl Into<String>) -> Decoder {
    Decoder::new(text)
}

/// Wraps a value in an [`Encoder`] with default options.
///
/// Accepts anything convertible into a [`Value`]; for arbitrary
/// `Serialize` types use [`Encoder::from_serialize`].
pub fn encoder_for(value: impl Into<Value>) -> Encoder {
    Encoder::new(value)
}
