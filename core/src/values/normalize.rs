//! One-time conversion of host data into [`Value`]s.
//!
//! Every host type that can enter the value layer implements [`IntoValue`],
//! stating once how it maps onto a [`Kind`](super::Kind). Composite inputs are
//! converted element by element through the same trait, so a nested host
//! structure is fully normalized in a single pass. Records are the exception:
//! they are stored as-is and their fields are converted lazily on access.
//!
//! | Host type                                              | Kind     |
//! |--------------------------------------------------------|----------|
//! | `None`, `()`                                           | Nil      |
//! | `Value`, `&Value`                                      | unchanged |
//! | integers, floats                                       | Number   |
//! | `bool`                                                 | Bool     |
//! | `DateTime<Tz>`, `NaiveDateTime`, `SystemTime`          | Time     |
//! | `std::time::Duration`, `chrono::TimeDelta`             | Duration |
//! | `&str`, `String`, `EcoString`, `Cow<str>`, `char`      | String   |
//! | `Vec<u8>`, `&[u8]`, `[u8; N]`, `EcoVec<u8>`            | Bytes    |
//! | other sequences                                        | Array    |
//! | `HashMap<K, V>`, `BTreeMap<K, V>`, [`Map`]             | Map      |
//! | `#[derive(Record)]` types                              | Struct   |
//! | [`Opaque<T>`]                                          | Any      |
//!
//! `Option`, `Box`, `Rc`, `Arc` and references are followed to the value they
//! point at.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::rc::Rc;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, NaiveDateTime, TimeDelta, TimeZone};
use ecow::{EcoString, EcoVec, eco_format};

use super::host::Opaque;
use super::value::{Map, Value};

/// Conversion of a host value into a [`Value`].
///
/// Conversion is total: an implementation must not fail or panic.
pub trait IntoValue {
    fn into_value(self) -> Value;

    /// Convert a sequence whose elements are `Self`.
    ///
    /// Defaults to an Array of individually converted elements. `u8`
    /// overrides it so that byte sequences become Bytes.
    #[doc(hidden)]
    fn sequence_into_value<I>(items: I) -> Value
    where
        I: IntoIterator<Item = Self>,
        Self: Sized,
    {
        Value::array(items.into_iter().map(IntoValue::into_value).collect::<EcoVec<_>>())
    }

    /// Convert a shared vector whose elements are `Self`.
    ///
    /// Element types that map onto themselves reuse the storage.
    #[doc(hidden)]
    fn eco_sequence_into_value(items: EcoVec<Self>) -> Value
    where
        Self: Sized + Clone,
    {
        Self::sequence_into_value(items)
    }
}

impl Value {
    /// Normalize any host value.
    ///
    /// ```
    /// use kit_core::values::{Kind, Value};
    ///
    /// assert_eq!(Value::new(42).kind(), Kind::Number);
    /// assert_eq!(Value::new("hi").kind(), Kind::String);
    /// assert_eq!(Value::new(b"raw".to_vec()).kind(), Kind::Bytes);
    /// assert_eq!(Value::new(None::<i32>).kind(), Kind::Nil);
    /// ```
    #[inline]
    pub fn new<T: IntoValue>(value: T) -> Value {
        value.into_value()
    }
}

// ============================================================================
// Values and indirections
// ============================================================================

impl IntoValue for Value {
    #[inline]
    fn into_value(self) -> Value {
        self
    }

    fn eco_sequence_into_value(items: EcoVec<Self>) -> Value {
        Value::array(items)
    }
}

impl<T: IntoValue + Clone> IntoValue for &T {
    #[inline]
    fn into_value(self) -> Value {
        self.clone().into_value()
    }
}

impl IntoValue for () {
    #[inline]
    fn into_value(self) -> Value {
        Value::NIL
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    #[inline]
    fn into_value(self) -> Value {
        match self {
            Some(inner) => inner.into_value(),
            None => Value::NIL,
        }
    }
}

impl<T: IntoValue> IntoValue for Box<T> {
    #[inline]
    fn into_value(self) -> Value {
        (*self).into_value()
    }
}

impl<T: IntoValue + Clone> IntoValue for Rc<T> {
    fn into_value(self) -> Value {
        Rc::unwrap_or_clone(self).into_value()
    }
}

impl<T: IntoValue + Clone> IntoValue for Arc<T> {
    fn into_value(self) -> Value {
        Arc::unwrap_or_clone(self).into_value()
    }
}

// ============================================================================
// Scalars
// ============================================================================

impl IntoValue for bool {
    #[inline]
    fn into_value(self) -> Value {
        Value::bool(self)
    }
}

macro_rules! impl_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoValue for $ty {
                #[inline]
                fn into_value(self) -> Value {
                    Value::number(self as f64)
                }
            }
        )*
    };
}

impl_number!(i8, i16, i32, i64, i128, isize, u16, u32, u64, u128, usize, f32, f64);

impl IntoValue for u8 {
    #[inline]
    fn into_value(self) -> Value {
        Value::number(self as f64)
    }

    fn sequence_into_value<I>(items: I) -> Value
    where
        I: IntoIterator<Item = Self>,
    {
        Value::bytes(items.into_iter().collect::<EcoVec<u8>>())
    }

    fn eco_sequence_into_value(items: EcoVec<Self>) -> Value {
        Value::bytes(items)
    }
}

impl<Tz: TimeZone> IntoValue for DateTime<Tz> {
    fn into_value(self) -> Value {
        let nanos = match self.timestamp_nanos_opt() {
            Some(nanos) => nanos as f64,
            // Outside the i64 nanosecond range (before 1677 or after 2262).
            None => self.timestamp() as f64 * 1e9 + f64::from(self.timestamp_subsec_nanos()),
        };
        Value::time_from_f64(nanos)
    }
}

impl IntoValue for NaiveDateTime {
    fn into_value(self) -> Value {
        self.and_utc().into_value()
    }
}

impl IntoValue for SystemTime {
    fn into_value(self) -> Value {
        let nanos = match self.duration_since(UNIX_EPOCH) {
            Ok(after) => after.as_nanos() as f64,
            Err(before) => -(before.duration().as_nanos() as f64),
        };
        Value::time_from_f64(nanos)
    }
}

impl IntoValue for std::time::Duration {
    fn into_value(self) -> Value {
        Value::duration_from_f64(self.as_nanos() as f64)
    }
}

impl IntoValue for TimeDelta {
    fn into_value(self) -> Value {
        let nanos = match self.num_nanoseconds() {
            Some(nanos) => nanos as f64,
            None => self.num_seconds() as f64 * 1e9 + f64::from(self.subsec_nanos()),
        };
        Value::duration_from_f64(nanos)
    }
}

// ============================================================================
// Text
// ============================================================================

impl IntoValue for &str {
    #[inline]
    fn into_value(self) -> Value {
        Value::string(self)
    }
}

impl IntoValue for String {
    #[inline]
    fn into_value(self) -> Value {
        Value::string(self)
    }
}

impl IntoValue for EcoString {
    #[inline]
    fn into_value(self) -> Value {
        Value::string(self)
    }
}

impl IntoValue for Cow<'_, str> {
    #[inline]
    fn into_value(self) -> Value {
        Value::string(self.as_ref())
    }
}

impl IntoValue for char {
    #[inline]
    fn into_value(self) -> Value {
        Value::string(&*self.encode_utf8(&mut [0; 4]))
    }
}

// ============================================================================
// Sequences
// ============================================================================

impl<T: IntoValue> IntoValue for Vec<T> {
    fn into_value(self) -> Value {
        T::sequence_into_value(self)
    }
}

impl<T: IntoValue> IntoValue for VecDeque<T> {
    fn into_value(self) -> Value {
        T::sequence_into_value(self)
    }
}

impl<T: IntoValue, const N: usize> IntoValue for [T; N] {
    fn into_value(self) -> Value {
        T::sequence_into_value(self)
    }
}

impl<T: IntoValue + Clone> IntoValue for &[T] {
    fn into_value(self) -> Value {
        T::sequence_into_value(self.iter().cloned())
    }
}

impl<T: IntoValue + Clone> IntoValue for EcoVec<T> {
    fn into_value(self) -> Value {
        T::eco_sequence_into_value(self)
    }
}

// ============================================================================
// Mappings
// ============================================================================

/// Coercion of a mapping key to text.
///
/// Textual keys are taken directly; other keys use their display form.
pub trait MapKey {
    fn into_key(self) -> EcoString;
}

impl MapKey for EcoString {
    #[inline]
    fn into_key(self) -> EcoString {
        self
    }
}

impl MapKey for String {
    #[inline]
    fn into_key(self) -> EcoString {
        self.into()
    }
}

impl MapKey for &str {
    #[inline]
    fn into_key(self) -> EcoString {
        self.into()
    }
}

impl MapKey for Cow<'_, str> {
    #[inline]
    fn into_key(self) -> EcoString {
        self.as_ref().into()
    }
}

impl MapKey for char {
    #[inline]
    fn into_key(self) -> EcoString {
        EcoString::from(&*self.encode_utf8(&mut [0; 4]))
    }
}

impl MapKey for bool {
    fn into_key(self) -> EcoString {
        EcoString::from(if self { "true" } else { "false" })
    }
}

impl<K: MapKey + Clone> MapKey for &K {
    fn into_key(self) -> EcoString {
        self.clone().into_key()
    }
}

macro_rules! impl_integer_key {
    ($($ty:ty),* $(,)?) => {
        $(
            impl MapKey for $ty {
                fn into_key(self) -> EcoString {
                    eco_format!("{self}")
                }
            }
        )*
    };
}

impl_integer_key!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_float_key {
    ($($ty:ty),* $(,)?) => {
        $(
            impl MapKey for $ty {
                fn into_key(self) -> EcoString {
                    Value::number(self as f64).text().into()
                }
            }
        )*
    };
}

impl_float_key!(f32, f64);

fn collect_map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Value
where
    K: MapKey,
    V: IntoValue,
{
    let entries = entries.into_iter();
    let mut map = Map::with_capacity(entries.size_hint().0);
    for (key, value) in entries {
        map.insert(key.into_key(), value.into_value());
    }
    Value::map(map)
}

impl IntoValue for Map {
    #[inline]
    fn into_value(self) -> Value {
        Value::map(self)
    }
}

impl<K: MapKey, V: IntoValue, S> IntoValue for HashMap<K, V, S> {
    fn into_value(self) -> Value {
        collect_map(self)
    }
}

impl<K: MapKey, V: IntoValue> IntoValue for BTreeMap<K, V> {
    fn into_value(self) -> Value {
        collect_map(self)
    }
}

// ============================================================================
// Opaque
// ============================================================================

impl<T: core::any::Any + Send + Sync> IntoValue for Opaque<T> {
    fn into_value(self) -> Value {
        tracing::trace!(
            host_type = core::any::type_name::<T>(),
            "storing opaque host value"
        );
        Value::opaque(self.0)
    }
}
