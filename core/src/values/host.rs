//! Capabilities that host types implement to live inside a [`Value`].
//!
//! The value layer never inspects host types at runtime. Instead a host type
//! describes itself once:
//!
//! - [`Record`] exposes named fields, read lazily by [`Value::get`].
//! - [`Function`] makes a value callable through [`Value::call`].
//! - [`Opaque`] wraps anything else so it can be carried around untouched.

use core::any::Any;
use core::fmt;

use super::Value;

/// A host record whose fields can be looked up by name.
///
/// Records are stored in a [`Value`] as-is, and no field is converted at
/// construction time. A field is normalized only when navigation asks for it.
/// Implement this with `#[derive(Record)]` from the `kit-macros` crate:
///
/// ```ignore
/// #[derive(Clone, Record)]
/// struct User {
///     pub name: String,
///     pub age: u32,
///     password: String, // private fields are never exposed
/// }
///
/// let user = Value::new(User { .. });
/// assert_eq!(user.get("name").str(), "Ada");
/// assert!(user.get("password").is_nil());
/// ```
pub trait Record: Any + Send + Sync {
    /// Look up a field by name, normalizing its current value.
    ///
    /// Returns `None` for unknown or hidden fields.
    fn field(&self, name: &str) -> Option<Value>;

    /// Names of the fields that [`Record::field`] resolves.
    fn field_names(&self) -> &'static [&'static str];

    fn as_any(&self) -> &dyn Any;

    fn type_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// A callable value.
///
/// Any `Fn(&[Value]) -> Value + Send + Sync` closure is a `Function`.
pub trait Function: Send + Sync {
    fn call(&self, args: &[Value]) -> Value;
}

impl<F> Function for F
where
    F: Fn(&[Value]) -> Value + Send + Sync,
{
    #[inline]
    fn call(&self, args: &[Value]) -> Value {
        self(args)
    }
}

/// Marks a host value that should be stored without any conversion.
///
/// Normalizing an `Opaque<T>` yields a value of kind [`Any`](super::Kind::Any)
/// that can be recovered with [`Value::downcast_ref`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Opaque<T>(pub T);

impl<T> fmt::Debug for Opaque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opaque<{}>", core::any::type_name::<T>())
    }
}
