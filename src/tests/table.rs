use crate::objects::{hash_string, StrPool};
use crate::table::Table;
use crate::values::Value;
use std::rc::Rc;

#[test]
fn set_then_get_returns_the_value() {
  let mut pool = StrPool::default();
  let mut table = Table::default();

  let key = pool.intern("answer");
  table.set(Rc::clone(&key), Value::Number(42.0));

  assert_eq!(table.get(&key), Some(&Value::Number(42.0)));
}

#[test]
fn set_reports_new_keys() {
  let mut pool = StrPool::default();
  let mut table = Table::default();

  let key = pool.intern("a");
  assert!(table.set(Rc::clone(&key), Value::Number(1.0)));
  assert!(!table.set(Rc::clone(&key), Value::Number(2.0)));

  // The second set overwrote the binding.
  assert_eq!(table.get(&key), Some(&Value::Number(2.0)));
}

#[test]
fn get_and_delete_on_an_empty_table_are_noops() {
  let mut pool = StrPool::default();
  let mut table = Table::default();

  let key = pool.intern("missing");
  assert_eq!(table.get(&key), None);
  assert!(!table.delete(&key));
}

#[test]
fn delete_leaves_reusable_tombstones() {
  let mut pool = StrPool::default();
  let mut table = Table::default();

  let a = pool.intern("a");
  let b = pool.intern("b");
  table.set(Rc::clone(&a), Value::Number(1.0));
  table.set(Rc::clone(&b), Value::Number(2.0));

  assert!(table.delete(&a));
  assert_eq!(table.get(&a), None);
  assert!(!table.delete(&a));

  // The other binding is untouched.
  assert_eq!(table.get(&b), Some(&Value::Number(2.0)));

  // Re-inserting the deleted key is a fresh binding again.
  assert!(table.set(Rc::clone(&a), Value::Number(3.0)));
  assert_eq!(table.get(&a), Some(&Value::Number(3.0)));
}

#[test]
fn survives_growth_beyond_the_initial_capacity() {
  let mut pool = StrPool::default();
  let mut table = Table::default();

  let keys: Vec<_> = (0..64).map(|i| pool.intern(&format!("g{}", i))).collect();

  for (i, key) in keys.iter().enumerate() {
    table.set(Rc::clone(key), Value::Number(i as f64));
  }

  for (i, key) in keys.iter().enumerate() {
    assert_eq!(table.get(key), Some(&Value::Number(i as f64)));
  }
}

#[test]
fn probe_chains_stay_reachable_after_churn() {
  let mut pool = StrPool::default();
  let mut table = Table::default();

  let keys: Vec<_> = (0..48).map(|i| pool.intern(&format!("k{}", i))).collect();

  for (i, key) in keys.iter().enumerate() {
    table.set(Rc::clone(key), Value::Number(i as f64));
  }

  // Delete every other key, then re-insert half of the deleted ones.
  for key in keys.iter().step_by(2) {
    assert!(table.delete(key));
  }
  for key in keys.iter().step_by(4) {
    table.set(Rc::clone(key), Value::Bool(true));
  }

  // Every live entry must still be reachable by probing.
  for (i, key) in keys.iter().enumerate() {
    let expected = if i % 4 == 0 {
      Some(Value::Bool(true))
    } else if i % 2 == 0 {
      None
    } else {
      Some(Value::Number(i as f64))
    };

    assert_eq!(table.get(key).cloned(), expected, "key k{}", i);
  }
}

#[test]
fn add_all_copies_live_entries_only() {
  let mut pool = StrPool::default();
  let mut src = Table::default();
  let mut dst = Table::default();

  let a = pool.intern("a");
  let b = pool.intern("b");
  src.set(Rc::clone(&a), Value::Number(1.0));
  src.set(Rc::clone(&b), Value::Number(2.0));
  src.delete(&b);

  src.add_all(&mut dst);

  assert_eq!(dst.get(&a), Some(&Value::Number(1.0)));
  assert_eq!(dst.get(&b), None);
}

#[test]
fn find_string_matches_by_bytes() {
  let mut pool = StrPool::default();
  let mut table = Table::default();

  let key = pool.intern("hello");
  table.set(Rc::clone(&key), Value::Nil);

  let found = table.find_string("hello", hash_string("hello")).unwrap();
  assert!(Rc::ptr_eq(&found, &key));

  assert!(table.find_string("world", hash_string("world")).is_none());
}

#[test]
fn interning_reuses_allocations() {
  let mut pool = StrPool::default();

  let first = pool.intern("shared");
  let second = pool.intern("shared");
  let third = pool.intern_owned(String::from("shared"));

  assert!(Rc::ptr_eq(&first, &second));
  assert!(Rc::ptr_eq(&first, &third));

  let other = pool.intern("different");
  assert!(!Rc::ptr_eq(&first, &other));
}
