pub mod builder;
pub mod convert;
pub mod error;
pub mod host;
pub mod kind;
pub mod navigate;
pub mod normalize;
pub mod ops;
pub mod text;
pub mod value;

pub use builder::{ArrayBuilder, Binder, MapBuilder};
pub use error::{BindError, TypeError};
pub use host::{Function, Opaque, Record};
pub use kind::{Category, Kind};
pub use navigate::Segment;
pub use normalize::{IntoValue, MapKey};
pub use text::{TextOptions, TextOptionsOverride};
pub use value::{Map, Value};

#[cfg(test)]
mod navigate_test;
#[cfg(test)]
mod text_test;
