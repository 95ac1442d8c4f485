use core::fmt;

/// The discriminator of a [`Value`](super::Value).
///
/// The declaration order is part of the contract: blank kinds come first,
/// then scalars, then references, then complex kinds. Category questions are
/// answered through [`Kind::category`], which pins every kind to its group
/// explicitly so that a reordering shows up as a failing test instead of a
/// silently wrong predicate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Kind {
    /// Result of an undefined operation, or an uninitialized value.
    #[default]
    Invalid,
    /// Null / absent.
    Nil,

    /// `f64` stored in the scalar slot.
    Number,
    /// 0 or 1 stored in the scalar slot.
    Bool,
    /// Nanoseconds since the Unix epoch stored in the scalar slot.
    Time,
    /// Nanoseconds stored in the scalar slot.
    Duration,

    /// Shared text.
    String,
    /// Shared byte buffer.
    Bytes,
    /// Unordered text-keyed mapping of values.
    Map,
    /// Ordered sequence of values.
    Array,

    /// Opaque host record, fields read on demand.
    Struct,
    /// Opaque callable.
    Func,
    /// Opaque host value.
    Any,
}

/// Coarse grouping of [`Kind`]s.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Blank,
    Scalar,
    Reference,
    Complex,
}

impl Kind {
    pub const ALL: [Kind; 13] = [
        Kind::Invalid,
        Kind::Nil,
        Kind::Number,
        Kind::Bool,
        Kind::Time,
        Kind::Duration,
        Kind::String,
        Kind::Bytes,
        Kind::Map,
        Kind::Array,
        Kind::Struct,
        Kind::Func,
        Kind::Any,
    ];

    #[inline]
    pub const fn category(self) -> Category {
        match self {
            Kind::Invalid | Kind::Nil => Category::Blank,
            Kind::Number | Kind::Bool | Kind::Time | Kind::Duration => Category::Scalar,
            Kind::String | Kind::Bytes | Kind::Map | Kind::Array => Category::Reference,
            Kind::Struct | Kind::Func | Kind::Any => Category::Complex,
        }
    }

    #[inline]
    pub const fn is_blank(self) -> bool {
        matches!(self.category(), Category::Blank)
    }

    #[inline]
    pub const fn is_scalar(self) -> bool {
        matches!(self.category(), Category::Scalar)
    }

    /// Reference and complex kinds both keep their payload in the reference slot.
    #[inline]
    pub const fn is_reference(self) -> bool {
        matches!(self.category(), Category::Reference | Category::Complex)
    }

    #[inline]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Kind::Number | Kind::Time | Kind::Duration)
    }

    #[inline]
    pub const fn is_iterable(self) -> bool {
        matches!(self, Kind::Array | Kind::Map | Kind::Bytes)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Kind::Invalid => "invalid",
            Kind::Nil => "nil",
            Kind::Number => "number",
            Kind::Bool => "bool",
            Kind::Time => "time",
            Kind::Duration => "duration",
            Kind::String => "string",
            Kind::Bytes => "bytes",
            Kind::Map => "map",
            Kind::Array => "array",
            Kind::Struct => "struct",
            Kind::Func => "func",
            Kind::Any => "any",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
