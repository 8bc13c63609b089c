//! The fluent decoder: lazy parsing, projections, and dotted-path access.

use crate::de;
use crate::error::{DecodeError, DecodeErrorKind};
use crate::options::{Flags, Options};
use crate::ser;
use crate::value::{Map, Value};
use serde::de::DeserializeOwned;
use std::sync::OnceLock;

/// An immutable wrapper around JSON text and its decode configuration.
///
/// Construction never parses; the text is decoded on the first call that
/// needs it. The dotted-path accessors share one memoized associative
/// projection of the document, computed once per instance.
///
/// # Examples
///
/// ```
/// use fluent_json::decoder_for;
///
/// let decoder = decoder_for(r#"{"meta":{"age":67},"active":true}"#);
///
/// assert!(decoder.is_valid());
/// assert_eq!(decoder.as_int("meta.age").unwrap(), 67);
/// assert!(decoder.as_bool("active").unwrap());
/// assert!(!decoder.has("meta.unknown").unwrap());
/// ```
#[derive(Debug)]
pub struct Decoder {
    text: String,
    options: Options,
    document: OnceLock<Result<Value, DecodeError>>,
}

impl Decoder {
    /// Wraps the given text with default options. No parsing happens yet.
    pub fn new(text: impl Into<String>) -> Self {
        Decoder::with_options(text, Options::default())
    }

    pub fn with_options(text: impl Into<String>, options: Options) -> Self {
        Decoder {
            text: text.into(),
            options,
            document: OnceLock::new(),
        }
    }

    /// The configuration attached to this instance.
    pub fn options(&self) -> Options {
        self.options
    }

    /// Returns a new decoder over the same text with the given depth limit.
    /// The receiver is unchanged.
    pub fn with_depth(&self, max_depth: usize) -> Decoder {
        Decoder::with_options(self.text.clone(), self.options.with_depth(max_depth))
    }

    /// Returns a new decoder with the flag set replaced.
    pub fn with_flags(&self, flags: Flags) -> Decoder {
        Decoder::with_options(self.text.clone(), self.options.with_flags(flags))
    }

    /// Returns a new decoder with the given flags merged in (bitwise or).
    pub fn add_flags(&self, flags: Flags) -> Decoder {
        Decoder::with_options(self.text.clone(), self.options.add_flags(flags))
    }

    /// Decodes the wrapped text, honoring `max_depth` and flags.
    pub fn parse(&self) -> Result<Value, DecodeError> {
        de::parse_with_options(&self.text, self.options)
    }

    /// Decodes the document with every object forced to an ordered map.
    ///
    /// The associative-projection flag is merged into a transient copy of
    /// the options; this decoder's own configuration is untouched. Fails
    /// with [`DecodeErrorKind::ExpectedObject`] when the document root is
    /// not an object.
    pub fn to_map(&self) -> Result<Map<String, Value>, DecodeError> {
        match self.document()? {
            Value::Object(map) => Ok(map.clone()),
            other => Err(DecodeError::new(
                DecodeErrorKind::ExpectedObject,
                format!("expected an object at the document root, found {}", kind_name(other)),
            )),
        }
    }

    /// Decodes the document into any `Deserialize` type.
    ///
    /// # Examples
    ///
    /// ```
    /// use fluent_json::decoder_for;
    ///
    /// #[derive(serde::Deserialize)]
    /// struct Meta {
    ///     age: i64,
    /// }
    ///
    /// let meta: Meta = decoder_for(r#"{"age":67}"#).to_object().unwrap();
    /// assert_eq!(meta.age, 67);
    /// ```
    pub fn to_object<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
        let value = self.parse()?;
        T::deserialize(value)
    }

    /// True iff the wrapped text is valid JSON within the depth limit.
    /// Never panics and never surfaces the underlying error.
    pub fn is_valid(&self) -> bool {
        self.parse().is_ok()
    }

    /// Resolves a dotted path, returning `Null` when the path is absent.
    ///
    /// Decode failures propagate; a path that does not resolve is not an
    /// error. Paths are literal keys joined by `.`, with no escaping and
    /// no numeric indexing into arrays.
    pub fn get(&self, path: &str) -> Result<Value, DecodeError> {
        self.get_or(path, Value::Null)
    }

    /// Resolves a dotted path, returning `default` when the path is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use fluent_json::{decoder_for, Value};
    ///
    /// let decoder = decoder_for(r#"{"meta":{"age":67}}"#);
    ///
    /// assert_eq!(decoder.get("meta.age").unwrap(), Value::from(67));
    /// assert_eq!(
    ///     decoder.get_or("meta.unknown", "default").unwrap(),
    ///     Value::from("default"),
    /// );
    /// ```
    pub fn get_or(&self, path: &str, default: impl Into<Value>) -> Result<Value, DecodeError> {
        Ok(match resolve(self.document()?, path) {
            Some(value) => value.clone(),
            None => default.into(),
        })
    }

    /// True iff the dotted path resolves. A key holding an explicit `null`
    /// counts as present.
    pub fn has(&self, path: &str) -> Result<bool, DecodeError> {
        Ok(resolve(self.document()?, path).is_some())
    }

    /// Resolves a path and coerces the value to an integer; `0` on a miss.
    pub fn as_int(&self, path: &str) -> Result<i64, DecodeError> {
        self.as_int_or(path, 0)
    }

    pub fn as_int_or(&self, path: &str, default: i64) -> Result<i64, DecodeError> {
        Ok(match resolve(self.document()?, path) {
            Some(value) => int_of(value),
            None => default,
        })
    }

    /// Resolves a path and coerces the value to a float; `0.0` on a miss.
    pub fn as_float(&self, path: &str) -> Result<f64, DecodeError> {
        self.as_float_or(path, 0.0)
    }

    pub fn as_float_or(&self, path: &str, default: f64) -> Result<f64, DecodeError> {
        Ok(match resolve(self.document()?, path) {
            Some(value) => float_of(value),
            None => default,
        })
    }

    /// Resolves a path and coerces the value to a string; `""` on a miss.
    pub fn as_string(&self, path: &str) -> Result<String, DecodeError> {
        self.as_string_or(path, "")
    }

    pub fn as_string_or(
        &self,
        path: &str,
        default: impl Into<String>,
    ) -> Result<String, DecodeError> {
        Ok(match resolve(self.document()?, path) {
            Some(value) => string_of(value),
            None => default.into(),
        })
    }

    /// Resolves a path and coerces the value to a boolean; `false` on a
    /// miss.
    pub fn as_bool(&self, path: &str) -> Result<bool, DecodeError> {
        self.as_bool_or(path, false)
    }

    pub fn as_bool_or(&self, path: &str, default: bool) -> Result<bool, DecodeError> {
        Ok(match resolve(self.document()?, path) {
            Some(value) => bool_of(value),
            None => default,
        })
    }

    /// Resolves a path to an array of values; empty on a miss or when the
    /// resolved value is not an array.
    pub fn as_array(&self, path: &str) -> Result<Vec<Value>, DecodeError> {
        self.as_array_or(path, Vec::new())
    }

    pub fn as_array_or(
        &self,
        path: &str,
        default: Vec<Value>,
    ) -> Result<Vec<Value>, DecodeError> {
        Ok(match resolve(self.document()?, path) {
            Some(value) => array_of(value),
            None => default,
        })
    }

    /// The memoized associative projection backing the accessor layer.
    ///
    /// Computed on first use via the `to_map` rule (transient
    /// `OBJECT_AS_MAP` merge) and cached for the instance's lifetime.
    /// Recomputation under concurrent first access is idempotent.
    fn document(&self) -> Result<&Value, DecodeError> {
        self.document
            .get_or_init(|| {
                de::parse_with_options(&self.text, self.options.add_flags(Flags::OBJECT_AS_MAP))
            })
            .as_ref()
            .map_err(Clone::clone)
    }
}

/// Walks the document one literal segment at a time. Every intermediate
/// value must be an object holding the segment key; anything else is a
/// miss. Single-segment paths take the same route.
fn resolve<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split('.') {
        match current {
            Value::Object(map) => current = map.get(segment)?,
            _ => return None,
        }
    }
    Some(current)
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// Loose coercions, documented in the crate docs. They are total: every
// value coerces to every target type.

fn int_of(value: &Value) -> i64 {
    match value {
        Value::Null => 0,
        Value::Bool(b) => *b as i64,
        Value::Number(n) => n.as_i64().unwrap_or_else(|| n.as_f64() as i64),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(|f| f as i64))
                .unwrap_or(0)
        }
        Value::Array(_) | Value::Object(_) => 0,
    }
}

fn float_of(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => *b as i64 as f64,
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        Value::Array(_) | Value::Object(_) => 0.0,
    }
}

fn string_of(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::Number(n) => match n {
            crate::value::Number::I64(i) => i.to_string(),
            crate::value::Number::U64(u) => u.to_string(),
            crate::value::Number::F64(f) => f.to_string(),
        },
        Value::String(s) => s.clone(),
        // Containers coerce to their compact encoding; a non-encodable
        // container (non-finite member) coerces to the empty string.
        other => ser::stringify(other, Options::default()).unwrap_or_default(),
    }
}

fn bool_of(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != 0.0,
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn array_of(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.clone(),
        _ => Vec::new(),
    }
}
