//! Read access into composite values.
//!
//! Navigation never fails: a missing key, an out-of-range index, a hidden
//! record field or a value of the wrong kind all yield Nil. Note that Nil is
//! also what a map returns for a key that is present and stored as Nil; the
//! two cases cannot be told apart.

use super::value::Payload;
use super::Value;

/// One step of a path given to [`Value::at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Map key or record field name.
    Key(&'a str),
    /// Array, Bytes or String position.
    Index(usize),
    /// A step that cannot address anything, such as a negative index.
    Unresolvable,
}

impl<'a> From<&'a str> for Segment<'a> {
    fn from(key: &'a str) -> Self {
        Segment::Key(key)
    }
}

impl<'a> From<&'a String> for Segment<'a> {
    fn from(key: &'a String) -> Self {
        Segment::Key(key.as_str())
    }
}

macro_rules! impl_index_segment {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Segment<'_> {
                fn from(index: $ty) -> Self {
                    usize::try_from(index).map_or(Segment::Unresolvable, Segment::Index)
                }
            }
        )*
    };
}

impl_index_segment!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl Value {
    /// Look up a map key or a record field.
    pub fn get(&self, key: &str) -> Value {
        match self.payload() {
            Payload::Map(map) => map.get(key).cloned().unwrap_or(Value::NIL),
            Payload::Struct(record) => record.field(key).unwrap_or_else(|| {
                tracing::trace!(
                    record = record.type_name(),
                    field = key,
                    "no readable field"
                );
                Value::NIL
            }),
            _ => Value::NIL,
        }
    }

    /// Bounds-checked positional access.
    ///
    /// - Array: the element.
    /// - Bytes: the byte as a Number.
    /// - String: the single byte at `index` as a String. This is a byte, not
    ///   a character; a non-ASCII byte comes back as U+FFFD.
    pub fn index(&self, index: usize) -> Value {
        match self.payload() {
            Payload::Array(items) => items.get(index).cloned(),
            Payload::Bytes(bytes) => bytes.get(index).map(|b| Value::number(f64::from(*b))),
            Payload::Str(s) => s.as_bytes().get(index).map(|b| byte_string(*b)),
            _ => None,
        }
        .unwrap_or(Value::NIL)
    }

    /// Walk a path of keys and indices, stopping at the first Invalid or Nil.
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use kit_core::values::{Segment, Value};
    ///
    /// let v = Value::new(HashMap::from([("a", vec![10, 20])]));
    /// assert_eq!(v.at([Segment::from("a"), Segment::from(1)]).as_int(), 20);
    /// assert!(v.at(["x", "y"]).is_nil());
    /// ```
    pub fn at<'a, I>(&self, path: I) -> Value
    where
        I: IntoIterator,
        I::Item: Into<Segment<'a>>,
    {
        let mut current = self.clone();
        for segment in path {
            current = match segment.into() {
                Segment::Key(key) => current.get(key),
                Segment::Index(index) => current.index(index),
                Segment::Unresolvable => Value::NIL,
            };
            if current.is_blank() {
                break;
            }
        }
        current
    }

    /// Number of bytes, elements or entries of a populated String, Bytes,
    /// Array or Map; 0 for anything else.
    pub fn len(&self) -> usize {
        match self.payload() {
            Payload::Str(s) => s.len(),
            Payload::Bytes(bytes) => bytes.len(),
            Payload::Array(items) => items.len(),
            Payload::Map(map) => map.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invoke a Func value. Any other kind yields Invalid.
    pub fn call(&self, args: &[Value]) -> Value {
        match self.payload() {
            Payload::Func(function) => function.call(args),
            _ => {
                tracing::trace!(kind = %self.kind(), "call on a value that is not callable");
                Value::INVALID
            }
        }
    }
}

fn byte_string(byte: u8) -> Value {
    if byte.is_ascii() {
        Value::string(&*char::from(byte).encode_utf8(&mut [0; 4]))
    } else {
        Value::string(char::REPLACEMENT_CHARACTER.to_string())
    }
}

/// Walk into a value with a mixed path of keys and indices.
///
/// ```
/// use std::collections::HashMap;
/// use kit_core::{at, values::Value};
///
/// let v = Value::new(HashMap::from([("users", vec![HashMap::from([("name", "Ada")])])]));
/// assert_eq!(at!(v, "users", 0, "name").str(), "Ada");
/// assert!(at!(v, "users", 5, "name").is_nil());
/// ```
#[macro_export]
macro_rules! at {
    ($value:expr $(, $segment:expr)* $(,)?) => {
        $value.at([$($crate::values::Segment::from($segment)),*])
    };
}
