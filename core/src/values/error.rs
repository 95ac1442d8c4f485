//! Errors at the typed edges of the value layer.
//!
//! Operations between values never fail; they produce Invalid or Nil. These
//! errors only appear where a caller asks for a concrete Rust type or builds a
//! literal that would break a value invariant.

use thiserror::Error;

use super::Kind;

/// Typed extraction from a value of the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error("expected {expected}, found {found}")]
    Mismatch { expected: Kind, found: Kind },

    #[error("{kind} value does not fit in {target}")]
    OutOfRange { kind: Kind, target: &'static str },
}

/// Literal construction with conflicting entries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("duplicate binding for {}", quoted(.0))]
    DuplicateBinding(Vec<String>),
}

fn quoted(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("'{name}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
