use core::any::Any;
use std::collections::HashMap;

use pretty_assertions::assert_eq;

use crate::at;
use crate::test_utils::init_test_logging;
use crate::values::{IntoValue, Kind, Record, Segment, Value};

#[derive(Clone)]
struct Account {
    owner: String,
    balance: f64,
    tags: Vec<&'static str>,
    parent: Option<Box<Account>>,
}

impl Record for Account {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "owner" => Some(self.owner.clone().into_value()),
            "balance" => Some(self.balance.into_value()),
            "tags" => Some(self.tags.clone().into_value()),
            "parent" => Some(self.parent.clone().map(|p| Value::record(*p)).into_value()),
            _ => None,
        }
    }

    fn field_names(&self) -> &'static [&'static str] {
        &["owner", "balance", "tags", "parent"]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn account() -> Value {
    Value::record(Account {
        owner: "ada".into(),
        balance: 12.5,
        tags: vec!["gold", "early"],
        parent: Some(Box::new(Account {
            owner: "root".into(),
            balance: 0.0,
            tags: vec![],
            parent: None,
        })),
    })
}

#[test]
fn test_get_map_key() {
    let v = Value::new(HashMap::from([("a", 1)]));
    assert_eq!(v.get("a").as_int(), 1);
    assert!(v.get("missing").is_nil());
}

#[test]
fn test_get_stored_nil_is_indistinguishable() {
    let v = Value::new(HashMap::from([("present", None::<i32>)]));
    assert!(v.get("present").is_nil());
    assert!(v.get("absent").is_nil());
}

#[test]
fn test_get_record_field() {
    init_test_logging();

    let v = account();
    assert_eq!(v.kind(), Kind::Struct);
    assert_eq!(v.get("owner").str(), "ada");
    assert_eq!(v.get("balance").as_float(), 12.5);
    assert_eq!(v.get("tags").kind(), Kind::Array);
    assert!(v.get("password").is_nil());
}

#[test]
fn test_get_on_other_kinds_is_nil() {
    assert!(Value::new("text").get("len").is_nil());
    assert!(Value::new(vec![1]).get("0").is_nil());
    assert!(Value::placeholder(Kind::Map).get("a").is_nil());
    assert!(Value::NIL.get("a").is_nil());
}

#[test]
fn test_index_array() {
    let v = Value::new(vec!["a", "b"]);
    assert_eq!(v.index(0).str(), "a");
    assert_eq!(v.index(1).str(), "b");
    assert!(v.index(2).is_nil());
}

#[test]
fn test_index_bytes() {
    let v = Value::new(b"AZ".to_vec());
    let first = v.index(0);
    assert_eq!(first.kind(), Kind::Number);
    assert_eq!(first.as_int(), 65);
    assert!(v.index(2).is_nil());
}

#[test]
fn test_index_string_is_a_byte() {
    let v = Value::new("hé");
    assert_eq!(v.index(0).str(), "h");
    assert_eq!(v.index(0).kind(), Kind::String);

    // 'é' is two bytes; each one alone is not valid text.
    assert_eq!(v.index(1).str(), "\u{FFFD}");
    assert_eq!(v.index(2).str(), "\u{FFFD}");
    assert!(v.index(3).is_nil());
}

#[test]
fn test_index_other_kinds_is_nil() {
    assert!(Value::number(1.0).index(0).is_nil());
    assert!(Value::new(HashMap::from([("0", 1)])).index(0).is_nil());
}

#[test]
fn test_at_walks_mixed_paths() {
    let v = Value::new(HashMap::from([("a", HashMap::from([("b", 5)]))]));
    assert_eq!(v.at(["a", "b"]).as_int(), 5);
    assert!(v.at(["x", "b"]).is_nil());
    assert_eq!(v.at(Vec::<&str>::new()), v);

    let users = Value::new(HashMap::from([("users", vec![vec![1, 2], vec![3]])]));
    let path = [Segment::from("users"), Segment::from(1), Segment::from(0)];
    assert_eq!(users.at(path).as_int(), 3);
}

#[test]
fn test_at_short_circuits_on_blank() {
    let v = Value::new(HashMap::from([("n", 1)]));
    let nil_then_key = v.at(["missing", "n"]);
    assert!(nil_then_key.is_nil());

    // Each step only looks at the current value, so a blank root turns Nil.
    assert!(Value::INVALID.at(["a"]).is_nil());
    assert!(Value::INVALID.at(Vec::<&str>::new()).is_invalid());
}

#[test]
fn test_at_negative_index() {
    let v = Value::new(vec![1, 2]);
    assert!(at!(v, -1).is_nil());
    assert_eq!(at!(v, 1).as_int(), 2);
}

#[test]
fn test_at_macro_through_records() {
    let v = account();
    assert_eq!(at!(v, "tags", 1).str(), "early");
    assert_eq!(at!(v, "parent", "owner").str(), "root");
    assert!(at!(v, "parent", "parent", "owner").is_nil());

    let key = String::from("owner");
    assert_eq!(at!(v, &key).str(), "ada");
}

#[test]
fn test_len() {
    assert_eq!(Value::new("héllo").len(), 6);
    assert_eq!(Value::new(vec![1, 2, 3]).len(), 3);
    assert_eq!(Value::new(HashMap::from([("a", 1)])).len(), 1);
    assert_eq!(Value::new(b"xy".to_vec()).len(), 2);
    assert_eq!(Value::number(10.0).len(), 0);
    assert!(Value::placeholder(Kind::Array).is_empty());
}

#[test]
fn test_call() {
    let sum = Value::func(|args: &[Value]| {
        Value::number(args.iter().map(Value::as_float).sum())
    });
    assert!(sum.is_callable());
    assert_eq!(sum.call(&[Value::number(1.0), Value::number(2.0)]).as_float(), 3.0);

    assert!(Value::new("f").call(&[]).is_invalid());
}

#[test]
fn test_record_introspection() {
    let v = account();
    let record = v.as_record().unwrap();
    assert_eq!(record.field_names(), &["owner", "balance", "tags", "parent"]);
    assert!(record.type_name().ends_with("Account"));
    assert_eq!(v.downcast_ref::<Account>().unwrap().owner, "ada");
    assert!(v.equal(&v.clone()));
    assert!(!v.equal(&account()));
}
