//! Kit - dynamic values for templates and expression engines
//!
//! # Overview
//!
//! Kit turns arbitrary host data into a single immutable [`Value`] type once,
//! up front, so that an evaluator can then compute with it without caring
//! where it came from. Common use cases include:
//!
//! - Template variables and filters
//! - Rule and expression engines
//! - Configuration lookups with safe defaults
//!
//! # Quick Start
//!
//! ```
//! use std::collections::HashMap;
//! use kit::{Value, at};
//!
//! let data = Value::new(HashMap::from([
//!     ("user", HashMap::from([("name", "Ada")])),
//! ]));
//!
//! assert_eq!(at!(data, "user", "name").text(), "Ada");
//! assert!(at!(data, "user", "email").is_nil());
//!
//! let total = Value::new(2).add(&Value::new(0.5));
//! assert_eq!(total.text(), "2.5");
//! ```
//!
//! # Failure Model
//!
//! Operations never return errors. An operation that is undefined for its
//! operand kinds yields an Invalid value; missing data (an absent key, an
//! out-of-range index, division by zero) yields Nil. Both flow through later
//! operations, so a whole expression can be evaluated and checked once with
//! [`Value::is_valid`].
//!
//! # Host Records
//!
//! With the default `derive` feature, structs can be stored as-is and
//! navigated by field name:
//!
//! ```
//! use kit::{Record, Value, at};
//!
//! #[derive(Clone, Record)]
//! #[record(crate = "::kit")]
//! struct User {
//!     pub name: String,
//!     password: String,
//! }
//!
//! let user = Value::new(User { name: "Ada".into(), password: "x".into() });
//! assert_eq!(at!(user, "name").text(), "Ada");
//! assert!(at!(user, "password").is_nil());
//! ```

pub use kit_core::*;

#[cfg(feature = "derive")]
pub use kit_macros::Record;
