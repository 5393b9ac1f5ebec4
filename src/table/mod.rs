use crate::objects::StrObj;
use crate::values::Value;
use std::rc::Rc;

/// The capacity the bucket array starts out with on its first insertion.
const INITIAL_CAPACITY: usize = 8;

/// A single bucket in the table. A bucket with no key is *empty* while
/// its value is `nil`, and a *tombstone* while its value is `true`.
#[derive(Clone)]
struct Entry {
  key: Option<Rc<StrObj>>,
  value: Value,
}

/// An open-addressed, linear-probing hash table keyed by interned
/// strings. Keys compare by pointer identity, which the interning pool
/// guarantees is equivalent to byte equality.
#[derive(Default)]
pub struct Table {
  /// The number of occupied or tombstoned buckets.
  count: usize,
  /// The bucket array. Its length is the table's capacity.
  entries: Vec<Entry>,
}

impl Table {
  /// Looks up the value bound to the given key.
  pub fn get(&self, key: &Rc<StrObj>) -> Option<&Value> {
    if self.count == 0 {
      return None;
    }

    let entry = &self.entries[self.find_entry(key)];
    entry.key.as_ref()?;

    Some(&entry.value)
  }

  /// Binds a value to a key, growing the bucket array first when the
  /// insertion could push the load factor past 3/4.
  ///
  /// # Returns
  /// `bool`: True when the key was not present before this call.
  pub fn set(&mut self, key: Rc<StrObj>, value: Value) -> bool {
    if self.count + 1 > self.entries.len() * 3 / 4 {
      self.grow();
    }

    let idx = self.find_entry(&key);
    let entry = &mut self.entries[idx];
    let is_new_key = entry.key.is_none();

    // Tombstones already participate in the count, so only a truly
    // empty bucket increments it.
    if is_new_key && matches!(entry.value, Value::Nil) {
      self.count += 1;
    }

    entry.key = Some(key);
    entry.value = value;

    is_new_key
  }

  /// Unbinds a key, leaving a tombstone in its bucket so that probe
  /// chains running through it stay intact. The count is unchanged.
  ///
  /// # Returns
  /// `bool`: True when the key was present.
  pub fn delete(&mut self, key: &Rc<StrObj>) -> bool {
    if self.count == 0 {
      return false;
    }

    let idx = self.find_entry(key);
    let entry = &mut self.entries[idx];

    if entry.key.is_none() {
      return false;
    }

    entry.key = None;
    entry.value = Value::Bool(true);
    true
  }

  /// Copies every live entry of this table into `to`.
  #[allow(dead_code)]
  pub fn add_all(&self, to: &mut Table) {
    for entry in self.entries.iter() {
      if let Some(key) = &entry.key {
        to.set(Rc::clone(key), entry.value.clone());
      }
    }
  }

  /// Looks up an interned string by its bytes and hash. This is the one
  /// lookup that cannot compare keys by pointer, because it runs before
  /// the string being looked up has been interned.
  pub fn find_string(&self, chars: &str, hash: u32) -> Option<Rc<StrObj>> {
    if self.count == 0 {
      return None;
    }

    let capacity = self.entries.len();
    let mut index = (hash as usize) % capacity;

    loop {
      let entry = &self.entries[index];

      match &entry.key {
        None => {
          // An empty (non-tombstone) bucket ends the probe chain.
          if matches!(entry.value, Value::Nil) {
            return None;
          }
        }
        Some(key) => {
          if key.hash == hash && key.chars == chars {
            return Some(Rc::clone(key));
          }
        }
      }

      index = (index + 1) % capacity;
    }
  }

  /// Finds the bucket index for the given key: either the bucket that
  /// holds it, or the bucket a fresh insertion should use. An insertion
  /// reuses the earliest tombstone found on the probe chain.
  fn find_entry(&self, key: &Rc<StrObj>) -> usize {
    let capacity = self.entries.len();
    let mut index = (key.hash as usize) % capacity;
    let mut tombstone: Option<usize> = None;

    loop {
      let entry = &self.entries[index];

      match &entry.key {
        None => {
          if matches!(entry.value, Value::Nil) {
            // An empty bucket: the key is absent.
            return tombstone.unwrap_or(index);
          }

          // A tombstone: remember the first one and keep probing.
          if tombstone.is_none() {
            tombstone = Some(index);
          }
        }
        Some(found) => {
          // Keys are interned, so pointer identity decides.
          if Rc::ptr_eq(found, key) {
            return index;
          }
        }
      }

      index = (index + 1) % capacity;
    }
  }

  /// Doubles the bucket array and re-inserts every live entry.
  /// Tombstones are dropped on the way, which resets the count to the
  /// number of live entries.
  fn grow(&mut self) {
    let capacity = if self.entries.is_empty() {
      INITIAL_CAPACITY
    } else {
      self.entries.len() * 2
    };

    let old_entries = std::mem::replace(
      &mut self.entries,
      vec![Entry { key: None, value: Value::Nil }; capacity],
    );

    self.count = 0;

    for entry in old_entries {
      if let Some(key) = entry.key {
        let idx = self.find_entry(&key);
        self.entries[idx] = Entry {
          key: Some(key),
          value: entry.value,
        };
        self.count += 1;
      }
    }
  }
}
