//! Arithmetic and comparison.
//!
//! Operators are total: a pair of operand kinds without a defined meaning
//! produces an Invalid value instead of failing, and Invalid or Nil operands
//! simply flow through the same per-kind rules.

use core::ops;

use super::value::Payload;
use super::{Kind, Value};

#[inline]
fn undefined(op: &'static str, a: &Value, b: &Value) -> Value {
    tracing::trace!(op, lhs = %a.kind(), rhs = %b.kind(), "operation undefined for operand kinds");
    Value::INVALID
}

#[allow(clippy::should_implement_trait)]
impl Value {
    /// Number + Number, otherwise [`extend`](Value::extend).
    pub fn add(&self, other: &Value) -> Value {
        if self.kind() == Kind::Number && other.kind() == Kind::Number {
            return Value::number(self.as_float() + other.as_float());
        }
        self.extend(other)
    }

    /// Concatenation: text of both operands when either is a String,
    /// Time + Duration as a later Time, Invalid otherwise.
    pub fn extend(&self, other: &Value) -> Value {
        if self.kind() == Kind::String || other.kind() == Kind::String {
            let mut text = String::new();
            self.append_text(&mut text);
            other.append_text(&mut text);
            return Value::string(text);
        }
        if self.kind() == Kind::Time && other.kind() == Kind::Duration {
            return Value::time_from_f64(self.as_float() + other.as_float());
        }
        undefined("extend", self, other)
    }

    pub fn sub(&self, other: &Value) -> Value {
        match (self.kind(), other.kind()) {
            (Kind::Number, Kind::Number) => Value::number(self.as_float() - other.as_float()),
            (Kind::Time, Kind::Duration) => Value::time_from_f64(self.as_float() - other.as_float()),
            _ => undefined("sub", self, other),
        }
    }

    pub fn mul(&self, other: &Value) -> Value {
        match (self.kind(), other.kind()) {
            (Kind::Number, Kind::Number) => Value::number(self.as_float() * other.as_float()),
            _ => undefined("mul", self, other),
        }
    }

    /// Number / Number. Division by zero yields Nil.
    pub fn div(&self, other: &Value) -> Value {
        match (self.kind(), other.kind()) {
            (Kind::Number, Kind::Number) if other.as_float() == 0.0 => Value::NIL,
            (Kind::Number, Kind::Number) => Value::number(self.as_float() / other.as_float()),
            _ => undefined("div", self, other),
        }
    }

    /// Deep equality.
    ///
    /// Kinds must match: Number 1 and Bool true are not equal. Arrays compare
    /// in order, maps regardless of order. Struct, Func and Any values are
    /// equal only when they share the same payload.
    pub fn equal(&self, other: &Value) -> bool {
        if self.kind() != other.kind() {
            return false;
        }
        match self.kind() {
            Kind::Number | Kind::Bool | Kind::Time | Kind::Duration => {
                self.as_float() == other.as_float()
            }
            Kind::Nil => true,
            Kind::String => self.str() == other.str(),
            Kind::Bytes => self.as_bytes() == other.as_bytes(),
            Kind::Array => {
                let a = self.as_array().unwrap_or_default();
                let b = other.as_array().unwrap_or_default();
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.equal(y))
            }
            Kind::Map => match (self.as_map(), other.as_map()) {
                (Some(a), Some(b)) => {
                    a.len() == b.len()
                        && a.iter()
                            .all(|(key, x)| b.get(key.as_str()).is_some_and(|y| x.equal(y)))
                }
                (a, b) => a.map_or(0, |m| m.len()) == b.map_or(0, |m| m.len()),
            },
            Kind::Invalid | Kind::Struct | Kind::Func | Kind::Any => {
                same_payload(self.payload(), other.payload())
            }
        }
    }

    #[inline]
    pub fn not_equal(&self, other: &Value) -> bool {
        !self.equal(other)
    }

    /// Ordering within two domains only: scalars by their scalar slot (so a
    /// Time may be compared with a Number), and Strings lexicographically.
    ///
    /// Every other pairing is unordered and returns false in both directions.
    pub fn less(&self, other: &Value) -> bool {
        if self.is_scalar() && other.is_scalar() {
            return self.as_float() < other.as_float();
        }
        if self.kind() == Kind::String && other.kind() == Kind::String {
            return self.str() < other.str();
        }
        false
    }

    #[inline]
    pub fn greater(&self, other: &Value) -> bool {
        other.less(self)
    }

    /// `!(other < self)`; true for unordered pairs.
    #[inline]
    pub fn less_equal(&self, other: &Value) -> bool {
        !other.less(self)
    }

    /// `!(self < other)`; true for unordered pairs.
    #[inline]
    pub fn greater_equal(&self, other: &Value) -> bool {
        !self.less(other)
    }
}

fn same_payload(a: &Payload, b: &Payload) -> bool {
    use std::sync::Arc;

    match (a, b) {
        (Payload::Empty, Payload::Empty) => true,
        (Payload::Struct(x), Payload::Struct(y)) => Arc::ptr_eq(x, y),
        (Payload::Func(x), Payload::Func(y)) => Arc::ptr_eq(x, y),
        (Payload::Any(x), Payload::Any(y)) => Arc::ptr_eq(x, y),
        _ => false,
    }
}

impl PartialEq for Value {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident) => {
        impl ops::$trait<&Value> for &Value {
            type Output = Value;

            #[inline]
            fn $method(self, rhs: &Value) -> Value {
                Value::$method(self, rhs)
            }
        }

        impl ops::$trait for Value {
            type Output = Value;

            #[inline]
            fn $method(self, rhs: Value) -> Value {
                Value::$method(&self, &rhs)
            }
        }
    };
}

impl_binary_op!(Add, add);
impl_binary_op!(Sub, sub);
impl_binary_op!(Mul, mul);
impl_binary_op!(Div, div);
