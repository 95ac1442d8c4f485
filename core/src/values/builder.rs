use ecow::{EcoString, EcoVec};

use super::error::BindError;
use super::normalize::IntoValue;
use super::value::{Map, Value};

/// A trait for types that can be built by binding names to values.
///
/// This provides a fluent interface for constructing keyed values, such as
/// map literals, without going through an intermediate host collection.
pub trait Binder: Sized {
    /// The final, successfully built output type.
    type Output;

    /// Binds a name to a value in the builder.
    fn bind(self, name: &str, value: impl IntoValue) -> Self;

    /// Finalizes the build process.
    ///
    /// Fails if the same name was bound more than once.
    fn build(self) -> Result<Self::Output, BindError>;
}

/// Builds a Map value entry by entry.
///
/// ```
/// use kit_core::values::{Binder, MapBuilder};
///
/// let v = MapBuilder::new().bind("a", 1).bind("b", "two").build().unwrap();
/// assert_eq!(v.get("b").str(), "two");
///
/// assert!(MapBuilder::new().bind("a", 1).bind("a", 2).build().is_err());
/// ```
#[derive(Debug, Default)]
pub struct MapBuilder {
    entries: Map,
    duplicates: Vec<String>,
}

impl MapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Map::with_capacity(capacity),
            duplicates: Vec::new(),
        }
    }
}

impl Binder for MapBuilder {
    type Output = Value;

    fn bind(mut self, name: &str, value: impl IntoValue) -> Self {
        if self
            .entries
            .insert(EcoString::from(name), value.into_value())
            .is_some()
            && !self.duplicates.iter().any(|d| d == name)
        {
            self.duplicates.push(name.to_owned());
        }
        self
    }

    fn build(self) -> Result<Value, BindError> {
        if !self.duplicates.is_empty() {
            return Err(BindError::DuplicateBinding(self.duplicates));
        }
        Ok(Value::map(self.entries))
    }
}

/// Builds an Array value element by element.
#[derive(Debug, Default)]
pub struct ArrayBuilder {
    elements: EcoVec<Value>,
}

impl ArrayBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: EcoVec::with_capacity(capacity),
        }
    }

    pub fn push(mut self, value: impl IntoValue) -> Self {
        self.elements.push(value.into_value());
        self
    }

    pub fn build(self) -> Value {
        Value::array(self.elements)
    }
}
