//! Procedural macros for kit values.
//!
//! - `#[derive(Record)]` - expose a struct's public fields to value navigation

extern crate proc_macro;

use proc_macro::TokenStream;

mod common;
mod record;

/// Let a struct be stored in a `Value` and navigated by field name.
///
/// The derive implements `Record` and `IntoValue` for the struct. Normalizing
/// it yields a value of kind `Struct` that holds the struct as-is; a field is
/// only converted when `Value::get` (or `at!`) asks for it. Every exposed field
/// type must implement `Clone` and `IntoValue`.
///
/// # Example
///
/// ```ignore
/// use kit_core::values::Value;
/// use kit_macros::Record;
///
/// #[derive(Clone, Record)]
/// struct User {
///     pub name: String,
///     #[record(rename = "years")]
///     pub age: u32,
///     #[record(skip)]
///     pub session: String,
///     password: String,
/// }
///
/// let user = Value::new(User { .. });
/// assert_eq!(user.get("name").str(), "Ada");
/// assert_eq!(user.get("years").as_int(), 36);
/// assert!(user.get("session").is_nil());
/// assert!(user.get("password").is_nil());
/// ```
///
/// # Visibility
///
/// Only `pub` fields are exposed. Restricted (`pub(crate)`) and private
/// fields are never reachable, and `#[record(...)]` on them is an error.
///
/// # Attributes
///
/// - `#[record(rename = "name")]` on a field: look it up under another name.
/// - `#[record(skip)]` on a field: hide a public field.
/// - `#[record(crate = "::path")]` on the struct: where the runtime crate
///   lives, for users of the `kit` facade (`#[record(crate = "::kit")]`).
///   Defaults to `::kit_core`.
///
/// # Restrictions
///
/// - Only structs with named fields (or unit structs) are supported
/// - Lifetime parameters are not supported; type parameters get
///   `Send + Sync + 'static` bounds
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(item: TokenStream) -> TokenStream {
    record::derive_record_impl(item)
}
