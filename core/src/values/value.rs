use core::any::Any;
use core::fmt;
use std::sync::Arc;

use ecow::{EcoString, EcoVec};

use super::host::{Function, Record};
use super::kind::Kind;

/// Unordered text-keyed mapping stored in values of kind [`Kind::Map`].
pub type Map = hashbrown::HashMap<EcoString, Value>;

/// Reference storage of a [`Value`].
///
/// One case per reference kind. `Empty` is used by blank and scalar kinds,
/// and by placeholders (a reference kind whose payload was never populated).
#[derive(Clone, Default)]
pub(crate) enum Payload {
    #[default]
    Empty,
    Str(EcoString),
    Bytes(EcoVec<u8>),
    Map(Arc<Map>),
    Array(EcoVec<Value>),
    Struct(Arc<dyn Record>),
    Func(Arc<dyn Function>),
    Any(Arc<dyn Any + Send + Sync>),
}

/// The atomic runtime unit.
///
/// A `Value` keeps a discriminator, a scalar slot and a reference slot. Only
/// one of the two slots is meaningful for a given [`Kind`]:
///
/// - Number, Bool, Time and Duration live in the scalar slot (an `f64`).
/// - String, Bytes, Map, Array, Struct, Func and Any live in the reference slot.
///
/// Values are immutable. Composite payloads are reference counted and shared
/// between clones, never deep-copied, and nothing hands out mutable access to
/// them.
///
/// # Example
///
/// ```
/// use kit_core::values::{Kind, Value};
///
/// let v = Value::new(vec![1, 2, 3]);
/// assert_eq!(v.kind(), Kind::Array);
/// assert_eq!(v.index(1).as_int(), 2);
/// assert_eq!(Value::new(2.5).add(&Value::new(0.5)).text(), "3");
/// ```
#[derive(Clone)]
pub struct Value {
    // Keep these private. Use the constructors and the accessors.
    kind: Kind,
    num: f64,
    payload: Payload,
}

static_assertions::assert_impl_all!(Value: Send, Sync, Clone);
static_assertions::const_assert!(core::mem::size_of::<Value>() <= 40);

impl Default for Value {
    fn default() -> Self {
        Value::INVALID
    }
}

impl Value {
    // ============================================================================
    // Construction
    // ============================================================================

    pub const INVALID: Value = Value::scalar(Kind::Invalid, 0.0);
    pub const NIL: Value = Value::scalar(Kind::Nil, 0.0);

    #[inline]
    const fn scalar(kind: Kind, num: f64) -> Self {
        Self {
            kind,
            num,
            payload: Payload::Empty,
        }
    }

    #[inline]
    fn reference(kind: Kind, payload: Payload) -> Self {
        Self {
            kind,
            num: 0.0,
            payload,
        }
    }

    #[inline]
    pub const fn number(value: f64) -> Self {
        Self::scalar(Kind::Number, value)
    }

    #[inline]
    pub const fn bool(value: bool) -> Self {
        Self::scalar(Kind::Bool, if value { 1.0 } else { 0.0 })
    }

    /// A point in time, as nanoseconds since the Unix epoch.
    #[inline]
    pub fn time_nanos(nanos: i64) -> Self {
        Self::scalar(Kind::Time, nanos as f64)
    }

    /// A span of time in nanoseconds; negative spans are allowed.
    #[inline]
    pub fn duration_nanos(nanos: i64) -> Self {
        Self::scalar(Kind::Duration, nanos as f64)
    }

    pub(crate) fn time_from_f64(nanos: f64) -> Self {
        Self::scalar(Kind::Time, nanos)
    }

    pub(crate) fn duration_from_f64(nanos: f64) -> Self {
        Self::scalar(Kind::Duration, nanos)
    }

    pub fn string(value: impl Into<EcoString>) -> Self {
        Self::reference(Kind::String, Payload::Str(value.into()))
    }

    pub fn bytes(value: impl Into<EcoVec<u8>>) -> Self {
        Self::reference(Kind::Bytes, Payload::Bytes(value.into()))
    }

    /// An array of already-built values. Elements are taken as they are.
    pub fn array(elements: impl Into<EcoVec<Value>>) -> Self {
        Self::reference(Kind::Array, Payload::Array(elements.into()))
    }

    /// A map of already-built values. Entries are taken as they are.
    pub fn map(entries: Map) -> Self {
        Self::shared_map(Arc::new(entries))
    }

    /// A map that shares its storage with the caller.
    pub fn shared_map(entries: Arc<Map>) -> Self {
        Self::reference(Kind::Map, Payload::Map(entries))
    }

    /// Store a host record opaquely. Its fields are read on demand by [`Value::get`].
    pub fn record<R: Record>(record: R) -> Self {
        Self::reference(Kind::Struct, Payload::Struct(Arc::new(record)))
    }

    pub fn func<F: Function + 'static>(function: F) -> Self {
        Self::reference(Kind::Func, Payload::Func(Arc::new(function)))
    }

    /// Store any host value without conversion.
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Self::reference(Kind::Any, Payload::Any(Arc::new(value)))
    }

    /// A value of the given kind with both slots left empty.
    ///
    /// For reference kinds this is a placeholder: it reports the kind but
    /// [`is_object`](Value::is_object) is false.
    pub const fn placeholder(kind: Kind) -> Self {
        Self::scalar(kind, 0.0)
    }

    // ============================================================================
    // Predicates
    // ============================================================================

    #[inline]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[inline]
    pub fn is_invalid(&self) -> bool {
        self.kind == Kind::Invalid
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        self.kind == Kind::Nil
    }

    /// Invalid or Nil.
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.kind.is_blank()
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.kind.is_blank()
    }

    /// The payload lives in the scalar slot.
    #[inline]
    pub fn is_immediate(&self) -> bool {
        self.kind.is_scalar()
    }

    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.kind.is_scalar()
    }

    /// Number, Time or Duration. Bool is not numeric.
    #[inline]
    pub fn is_numeric(&self) -> bool {
        self.kind.is_numeric()
    }

    #[inline]
    pub fn is_bool(&self) -> bool {
        self.kind == Kind::Bool
    }

    #[inline]
    pub fn is_true(&self) -> bool {
        self.kind == Kind::Bool && self.num > 0.0
    }

    #[inline]
    pub fn is_string(&self) -> bool {
        self.kind == Kind::String
    }

    #[inline]
    pub fn is_bytes(&self) -> bool {
        self.kind == Kind::Bytes
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        self.kind == Kind::Array
    }

    #[inline]
    pub fn is_map(&self) -> bool {
        self.kind == Kind::Map
    }

    #[inline]
    pub fn is_struct(&self) -> bool {
        self.kind == Kind::Struct
    }

    #[inline]
    pub fn is_callable(&self) -> bool {
        self.kind == Kind::Func
    }

    #[inline]
    pub fn is_reference(&self) -> bool {
        self.kind.is_reference()
    }

    /// A reference kind whose payload is populated.
    #[inline]
    pub fn is_object(&self) -> bool {
        self.kind.is_reference() && !matches!(self.payload, Payload::Empty)
    }

    #[inline]
    pub fn is_iterable(&self) -> bool {
        self.kind.is_iterable()
    }

    /// Logical truth: scalars are true when strictly positive, references
    /// when populated, blanks never.
    #[inline]
    pub fn truthy(&self) -> bool {
        if self.kind.is_scalar() {
            return self.num > 0.0;
        }
        self.is_object()
    }

    // ============================================================================
    // Projections
    // ============================================================================

    /// The scalar slot as stored.
    #[inline]
    pub fn as_float(&self) -> f64 {
        self.num
    }

    /// The scalar slot truncated toward zero (saturating at the `i64` bounds).
    #[inline]
    pub fn as_int(&self) -> i64 {
        self.num as i64
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.payload {
            Payload::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The text of a String value, or `""` for any other kind.
    pub fn str(&self) -> &str {
        self.as_str().unwrap_or_default()
    }

    /// The buffer of a Bytes value.
    pub fn bytes_ref(&self) -> Option<&[u8]> {
        match &self.payload {
            Payload::Bytes(b) => Some(b.as_slice()),
            _ => None,
        }
    }

    /// A read-only view of a Bytes buffer or of a String's UTF-8 bytes.
    ///
    /// The view borrows from `self`; nothing is copied. Other kinds yield an
    /// empty slice.
    pub fn as_bytes(&self) -> &[u8] {
        match &self.payload {
            Payload::Bytes(b) => b.as_slice(),
            Payload::Str(s) => s.as_bytes(),
            _ => &[],
        }
    }

    /// Like [`as_bytes`](Value::as_bytes), selected by kind.
    pub fn byte_slice(&self) -> &[u8] {
        match self.kind {
            Kind::Bytes | Kind::String => self.as_bytes(),
            _ => &[],
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match &self.payload {
            Payload::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match &self.payload {
            Payload::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&dyn Record> {
        match &self.payload {
            Payload::Struct(record) => Some(record.as_ref()),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&dyn Function> {
        match &self.payload {
            Payload::Func(function) => Some(function.as_ref()),
            _ => None,
        }
    }

    /// Recover the host value stored in a Struct or Any value.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match &self.payload {
            Payload::Struct(record) => record.as_any().downcast_ref(),
            Payload::Any(any) => any.downcast_ref(),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn payload(&self) -> &Payload {
        &self.payload
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            Payload::Empty => match self.kind {
                Kind::Invalid => f.write_str("<invalid>"),
                Kind::Number | Kind::Bool | Kind::Nil | Kind::Time | Kind::Duration => {
                    fmt::Display::fmt(self, f)
                }
                kind => write!(f, "<{kind}>"),
            },
            Payload::Str(s) => write!(f, "{:?}", s.as_str()),
            Payload::Bytes(b) => write!(f, "b\"{}\"", b.escape_ascii()),
            Payload::Array(items) => f.debug_list().entries(items.iter()).finish(),
            Payload::Map(map) => {
                // Sorted so that output is stable.
                let mut entries: Vec<_> = map.iter().collect();
                entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
                f.debug_map().entries(entries).finish()
            }
            Payload::Struct(record) => write!(f, "<Struct {}>", record.type_name()),
            Payload::Func(function) => {
                let ptr = Arc::as_ptr(function) as *const ();
                write!(f, "<Func @ {ptr:p}>")
            }
            Payload::Any(_) => f.write_str("<Any>"),
        }
    }
}
