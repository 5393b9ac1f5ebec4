use crate::table::Table;
use crate::values::Value;
use std::rc::Rc;

/// Represents a heap-allocated Lox string. Strings are immutable once
/// constructed, and every allocation path interns them, so two strings
/// with the same bytes always share one allocation.
#[derive(Debug)]
pub struct StrObj {
  /// The raw bytes of the string.
  pub chars: String,
  /// The FNV-1a hash of the bytes, computed once at allocation so that
  /// table lookups never rehash.
  pub hash: u32,
}

/// Computes the FNV-1a hash of a string.
pub fn hash_string(chars: &str) -> u32 {
  let mut hash = 2166136261u32;

  for byte in chars.as_bytes() {
    hash ^= *byte as u32;
    hash = hash.wrapping_mul(16777619);
  }

  hash
}

/// The set of every string allocated so far. The pool doubles as the
/// heap-object registry: it is owned by the VM, outlives any single
/// chunk, and releases all of its strings when the VM is dropped.
#[derive(Default)]
pub struct StrPool {
  strings: Table,
}

impl StrPool {
  /// Interns a string from borrowed bytes, copying them only when no
  /// equal string exists yet.
  pub fn intern(&mut self, chars: &str) -> Rc<StrObj> {
    let hash = hash_string(chars);

    match self.strings.find_string(chars, hash) {
      Some(existing) => existing,
      None => self.allocate(chars.to_string(), hash),
    }
  }

  /// Interns a string that already owns its bytes. This is the
  /// allocation path used by concatenation.
  pub fn intern_owned(&mut self, chars: String) -> Rc<StrObj> {
    let hash = hash_string(&chars);

    match self.strings.find_string(&chars, hash) {
      Some(existing) => existing,
      None => self.allocate(chars, hash),
    }
  }

  /// Registers a freshly allocated string in the pool.
  fn allocate(&mut self, chars: String, hash: u32) -> Rc<StrObj> {
    let obj = Rc::new(StrObj { chars, hash });
    self.strings.set(Rc::clone(&obj), Value::Nil);
    obj
  }
}
