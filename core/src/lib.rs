//! Dynamic values for embedding host data in templates and expressions.
//!
//! Host data is normalized once into [`Value`]s through [`IntoValue`]. After
//! that, every operation (arithmetic, comparison, navigation, text rendering)
//! is total: undefined combinations produce an Invalid value and missing data
//! produces Nil, so callers never have to handle errors mid-evaluation.

// Needed so that derive output can uniformly refer to `::kit_core` and still
// work from within this crate or a different one.
extern crate self as kit_core;

pub mod values;

pub use values::{
    ArrayBuilder, BindError, Binder, Category, Function, IntoValue, Kind, Map, MapBuilder, MapKey,
    Opaque, Record, Segment, TextOptions, TextOptionsOverride, TypeError, Value,
};
