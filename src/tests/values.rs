use crate::objects::StrPool;
use crate::values::Value;

#[test]
fn values_of_different_kinds_are_never_equal() {
  assert_ne!(Value::Nil, Value::Bool(false));
  assert_ne!(Value::Number(0.0), Value::Bool(false));
  assert_ne!(Value::Number(1.0), Value::Bool(true));

  let mut pool = StrPool::default();
  assert_ne!(Value::Str(pool.intern("nil")), Value::Nil);
}

#[test]
fn equality_within_a_kind() {
  assert_eq!(Value::Nil, Value::Nil);
  assert_eq!(Value::Bool(true), Value::Bool(true));
  assert_ne!(Value::Bool(true), Value::Bool(false));
  assert_eq!(Value::Number(1.5), Value::Number(1.5));
  assert_ne!(Value::Number(1.5), Value::Number(2.5));
}

#[test]
fn nan_is_not_equal_to_itself() {
  assert_ne!(Value::Number(f64::NAN), Value::Number(f64::NAN));
}

#[test]
fn interned_strings_compare_by_pointer() {
  let mut pool = StrPool::default();

  let a = Value::Str(pool.intern("text"));
  let b = Value::Str(pool.intern("text"));
  let c = Value::Str(pool.intern("other"));

  assert_eq!(a, b);
  assert_ne!(a, c);
}

#[test]
fn only_nil_and_false_are_falsey() {
  assert!(Value::Nil.is_falsey());
  assert!(Value::Bool(false).is_falsey());

  assert!(!Value::Bool(true).is_falsey());
  assert!(!Value::Number(0.0).is_falsey());

  let mut pool = StrPool::default();
  assert!(!Value::Str(pool.intern("")).is_falsey());
}

#[test]
fn display_forms() {
  assert_eq!(Value::Nil.to_string(), "nil");
  assert_eq!(Value::Bool(true).to_string(), "true");
  assert_eq!(Value::Bool(false).to_string(), "false");
  assert_eq!(Value::Number(42.0).to_string(), "42");
  assert_eq!(Value::Number(3.25).to_string(), "3.25");

  let mut pool = StrPool::default();
  assert_eq!(Value::Str(pool.intern("raw text")).to_string(), "raw text");
}
