//! JSON decoding: text to [`Value`], plus the serde bridge that projects a
//! decoded [`Value`] into arbitrary `Deserialize` types.

use crate::error::{DecodeError, DecodeErrorKind};
use crate::options::Options;
use crate::value::{Map, Number, Value};
use serde::de;
use serde::forward_to_deserialize_any;

/// Decodes JSON text into a [`Value`] with default options.
///
/// # Examples
///
/// ```
/// use fluent_json::parse;
///
/// let value = parse(r#"{"id":1}"#).unwrap();
/// assert_eq!(value.as_object().unwrap().get("id").unwrap().as_i64(), Some(1));
/// ```
pub fn parse(text: &str) -> Result<Value, DecodeError> {
    parse_with_options(text, Options::default())
}

/// Decodes JSON text into a [`Value`], honoring `max_depth` and flags.
///
/// Nesting strictly deeper than `options.max_depth` fails with
/// [`DecodeErrorKind::DepthLimitExceeded`]. Objects always decode to ordered
/// maps; `Flags::OBJECT_AS_MAP` requests that projection explicitly and is
/// otherwise carried through unchanged.
pub fn parse_with_options(text: &str, options: Options) -> Result<Value, DecodeError> {
    if options.max_depth == 0 {
        return Err(DecodeError::new(
            DecodeErrorKind::InvalidDepth,
            "maximum depth must be at least 1",
        ));
    }

    let mut parser = Parser::new(text, options.max_depth);
    parser.skip_whitespace();
    let value = parser.parse_value()?;
    parser.skip_whitespace();
    if parser.pos < parser.input.len() {
        return Err(parser.error(
            DecodeErrorKind::TrailingCharacters,
            "unexpected characters after the document",
        ));
    }

    Ok(value)
}

/// Decodes JSON text directly into a `Deserialize` type with default
/// options.
pub fn from_str<'a, T: de::Deserialize<'a>>(s: &'a str) -> Result<T, DecodeError> {
    from_str_with_options(s, Options::default())
}

/// Decodes JSON text directly into a `Deserialize` type.
///
/// Decoding is two-stage: the text is parsed into a [`Value`] first, then
/// the value drives `T::deserialize`.
pub fn from_str_with_options<'a, T: de::Deserialize<'a>>(
    s: &'a str,
    options: Options,
) -> Result<T, DecodeError> {
    let value = parse_with_options(s, options)?;
    T::deserialize(value)
}

struct Parser<'a> {
    src: &'a str,
    input: &'a [u8],
    pos: usize,
    line: usize,
    line_start: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str, max_depth: usize) -> Self {
        Parser {
            src,
            input: src.as_bytes(),
            pos: 0,
            line: 1,
            line_start: 0,
            depth: 0,
            max_depth,
        }
    }

    fn error(&self, kind: DecodeErrorKind, message: impl Into<String>) -> DecodeError {
        DecodeError::new(kind, message).with_location(self.line, self.pos - self.line_start + 1)
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        if byte == b'\n' {
            self.line += 1;
            self.line_start = self.pos;
        }
        Some(byte)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.bump();
        }
    }

    fn enter(&mut self) -> Result<(), DecodeError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(self.error(
                DecodeErrorKind::DepthLimitExceeded,
                format!("nesting exceeds maximum depth of {}", self.max_depth),
            ));
        }
        Ok(())
    }

    fn parse_value(&mut self) -> Result<Value, DecodeError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(self.error(DecodeErrorKind::UnexpectedEof, "unexpected end of input")),
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(b'"') => self.parse_string().map(Value::String),
            Some(b't') => self.parse_keyword("true", Value::Bool(true)),
            Some(b'f') => self.parse_keyword("false", Value::Bool(false)),
            Some(b'n') => self.parse_keyword("null", Value::Null),
            Some(b'-') | Some(b'0'..=b'9') => self.parse_number(),
            Some(byte) => Err(self.error(
                DecodeErrorKind::InvalidSyntax,
                format!("unexpected character '{}'", byte as char),
            )),
        }
    }

    fn parse_keyword(&mut self, keyword: &str, value: Value) -> Result<Value, DecodeError> {
        if self.input[self.pos..].starts_with(keyword.as_bytes()) {
            self.pos += keyword.len();
            Ok(value)
        } else {
            Err(self.error(
                DecodeErrorKind::InvalidSyntax,
                format!("expected '{}'", keyword),
            ))
        }
    }

    fn parse_object(&mut self) -> Result<Value, DecodeError> {
        self.bump();
        self.enter()?;
        let mut map = Map::new();

        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.bump();
            self.depth -= 1;
            return Ok(Value::Object(map));
        }

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(b'"') => {}
                None => {
                    return Err(
                        self.error(DecodeErrorKind::UnexpectedEof, "unterminated object")
                    );
                }
                Some(byte) => {
                    return Err(self.error(
                        DecodeErrorKind::InvalidSyntax,
                        format!("expected string key, found '{}'", byte as char),
                    ));
                }
            }
            let key = self.parse_string()?;

            self.skip_whitespace();
            match self.bump() {
                Some(b':') => {}
                None => {
                    return Err(
                        self.error(DecodeErrorKind::UnexpectedEof, "unterminated object")
                    );
                }
                Some(_) => {
                    return Err(self.error(
                        DecodeErrorKind::InvalidSyntax,
                        "expected ':' after object key",
                    ));
                }
            }

            let value = self.parse_value()?;
            // Last occurrence of a duplicate key wins, keeping the first
            // occurrence's position in the order.
            map.insert(key, value);

            self.skip_whitespace();
            match self.bump() {
                Some(b',') => {}
                Some(b'}') => break,
                None => {
                    return Err(
                        self.error(DecodeErrorKind::UnexpectedEof, "unterminated object")
                    );
                }
                Some(_) => {
                    return Err(self.error(
                        DecodeErrorKind::InvalidSyntax,
                        "expected ',' or '}' in object",
                    ));
                }
            }
        }

        self.depth -= 1;
        Ok(Value::Object(map))
    }

    fn parse_array(&mut self) -> Result<Value, DecodeError> {
        self.bump();
        self.enter()?;
        let mut items = Vec::new();

        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.bump();
            self.depth -= 1;
            return Ok(Value::Array(items));
        }

        loop {
            items.push(self.parse_value()?);

            self.skip_whitespace();
            match self.bump() {
                Some(b',') => {}
                Some(b']') => break,
                None => {
                    return Err(self.error(DecodeErrorKind::UnexpectedEof, "unterminated array"));
                }
                Some(_) => {
                    return Err(self.error(
                        DecodeErrorKind::InvalidSyntax,
                        "expected ',' or ']' in array",
                    ));
                }
            }
        }

        self.depth -= 1;
        Ok(Value::Array(items))
    }

    fn parse_string(&mut self) -> Result<String, DecodeError> {
        self.bump();
        let mut buf: Vec<u8> = Vec::new();

        loop {
            match self.bump() {
                None => {
                    return Err(
                        self.error(DecodeErrorKind::UnterminatedString, "unterminated string")
                    );
                }
                Some(b'"') => break,
                Some(b'\\') => {
                    let escaped = match self.bump() {
                        None => {
                            return Err(self.error(
                                DecodeErrorKind::UnterminatedString,
                                "unterminated string",
                            ));
                        }
                        Some(b'"') => '"',
                        Some(b'\\') => '\\',
                        Some(b'/') => '/',
                        Some(b'b') => '\u{08}',
                        Some(b'f') => '\u{0c}',
                        Some(b'n') => '\n',
                        Some(b'r') => '\r',
                        Some(b't') => '\t',
                        Some(b'u') => self.parse_unicode_escape()?,
                        Some(other) => {
                            return Err(self.error(
                                DecodeErrorKind::InvalidEscape,
                                format!("invalid escape sequence '\\{}'", other as char),
                            ));
                        }
                    };
                    let mut utf8 = [0u8; 4];
                    buf.extend_from_slice(escaped.encode_utf8(&mut utf8).as_bytes());
                }
                Some(byte) if byte < 0x20 => {
                    return Err(self.error(
                        DecodeErrorKind::InvalidSyntax,
                        "control character in string",
                    ));
                }
                Some(byte) => buf.push(byte),
            }
        }

        String::from_utf8(buf)
            .map_err(|_| self.error(DecodeErrorKind::InvalidSyntax, "invalid UTF-8 in string"))
    }

    fn parse_unicode_escape(&mut self) -> Result<char, DecodeError> {
        let first = self.parse_hex4()?;

        // Surrogate pairs encode characters above the BMP.
        if (0xD800..0xDC00).contains(&first) {
            if self.bump() != Some(b'\\') || self.bump() != Some(b'u') {
                return Err(self.error(
                    DecodeErrorKind::InvalidEscape,
                    "unpaired surrogate in unicode escape",
                ));
            }
            let second = self.parse_hex4()?;
            if !(0xDC00..0xE000).contains(&second) {
                return Err(self.error(
                    DecodeErrorKind::InvalidEscape,
                    "invalid low surrogate in unicode escape",
                ));
            }
            let code = 0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00);
            return char::from_u32(code).ok_or_else(|| {
                self.error(DecodeErrorKind::InvalidEscape, "invalid unicode escape")
            });
        }
        if (0xDC00..0xE000).contains(&first) {
            return Err(self.error(
                DecodeErrorKind::InvalidEscape,
                "unpaired surrogate in unicode escape",
            ));
        }

        char::from_u32(first)
            .ok_or_else(|| self.error(DecodeErrorKind::InvalidEscape, "invalid unicode escape"))
    }

    fn parse_hex4(&mut self) -> Result<u32, DecodeError> {
        let mut code = 0u32;
        for _ in 0..4 {
            let digit = match self.bump() {
                Some(byte @ b'0'..=b'9') => (byte - b'0') as u32,
                Some(byte @ b'a'..=b'f') => (byte - b'a') as u32 + 10,
                Some(byte @ b'A'..=b'F') => (byte - b'A') as u32 + 10,
                _ => {
                    return Err(self.error(
                        DecodeErrorKind::InvalidEscape,
                        "expected four hex digits in unicode escape",
                    ));
                }
            };
            code = code * 16 + digit;
        }
        Ok(code)
    }

    fn parse_number(&mut self) -> Result<Value, DecodeError> {
        let start = self.pos;

        if self.peek() == Some(b'-') {
            self.bump();
        }

        match self.peek() {
            Some(b'0') => {
                self.bump();
                if matches!(self.peek(), Some(b'0'..=b'9')) {
                    return Err(self.error(
                        DecodeErrorKind::InvalidNumber,
                        "leading zeros are not allowed",
                    ));
                }
            }
            Some(b'1'..=b'9') => {
                while matches!(self.peek(), Some(b'0'..=b'9')) {
                    self.bump();
                }
            }
            _ => {
                return Err(self.error(DecodeErrorKind::InvalidNumber, "invalid number literal"));
            }
        }

        let mut is_float = false;
        if self.peek() == Some(b'.') {
            self.bump();
            is_float = true;
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(self.error(
                    DecodeErrorKind::InvalidNumber,
                    "expected digits after decimal point",
                ));
            }
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.bump();
            }
        }

        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.bump();
            is_float = true;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.bump();
            }
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(self.error(
                    DecodeErrorKind::InvalidNumber,
                    "expected digits in exponent",
                ));
            }
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.bump();
            }
        }

        let literal = &self.src[start..self.pos];
        let number = if is_float {
            let parsed = literal
                .parse::<f64>()
                .map_err(|_| self.error(DecodeErrorKind::InvalidNumber, "invalid number literal"))?;
            if !parsed.is_finite() {
                return Err(self.error(DecodeErrorKind::InvalidNumber, "number out of range"));
            }
            Number::F64(parsed)
        } else if let Ok(integer) = literal.parse::<i64>() {
            Number::I64(integer)
        } else if let Ok(unsigned) = literal.parse::<u64>() {
            Number::U64(unsigned)
        } else {
            // Integer literals beyond 64 bits degrade to floating point.
            let parsed = literal
                .parse::<f64>()
                .map_err(|_| self.error(DecodeErrorKind::InvalidNumber, "invalid number literal"))?;
            if !parsed.is_finite() {
                return Err(self.error(DecodeErrorKind::InvalidNumber, "number out of range"));
            }
            Number::F64(parsed)
        };

        Ok(Value::Number(number))
    }
}

impl<'de> de::Deserializer<'de> for Value {
    type Error = DecodeError;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, DecodeError>
    where
        V: de::Visitor<'de>,
    {
        match self {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    visitor.visit_i64(i)
                } else if let Some(u) = n.as_u64() {
                    visitor.visit_u64(u)
                } else {
                    visitor.visit_f64(n.as_f64())
                }
            }
            Value::String(s) => visitor.visit_string(s),
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            Value::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, DecodeError>
    where
        V: de::Visitor<'de>,
    {
        match self {
            Value::Null => visitor.visit_none(),
            other => visitor.visit_some(other),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct newtype_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(values: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: values.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = DecodeError;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>, DecodeError>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(value).map(Some),
            None => Ok(None),
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Value>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(map: Map<String, Value>) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = DecodeError;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>, DecodeError>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(StringDeserializer(key)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value, DecodeError>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(value),
            None => Err(DecodeError::custom("value is missing")),
        }
    }
}

struct StringDeserializer(String);

impl<'de> de::Deserializer<'de> for StringDeserializer {
    type Error = DecodeError;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, DecodeError>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_string(self.0)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}
