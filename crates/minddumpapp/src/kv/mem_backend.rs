use super::backend::KvBackend;
use crate::error::{MindDumpError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory key-value backend for testing.
///
/// Uses `RefCell` for interior mutability since the store is single-threaded.
/// This keeps the `KvBackend` trait on `&self` without paying for locks.
#[derive(Default)]
pub struct MemKv {
    values: RefCell<HashMap<String, String>>,
    simulate_read_error: Cell<bool>,
    simulate_write_error: Cell<bool>,
    writes: Cell<usize>,
}

impl MemKv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw value, bypassing the write counter and error simulation.
    pub fn with_value(key: &str, value: &str) -> Self {
        let kv = Self::new();
        kv.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        kv
    }

    /// Raw stored value, for assertions.
    pub fn value(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.set(simulate);
    }

    /// Enable write error simulation for testing error handling.
    /// Affects both `write` and `remove`.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }
}

impl KvBackend for MemKv {
    fn read(&self, key: &str) -> Result<Option<String>> {
        if self.simulate_read_error.get() {
            return Err(MindDumpError::Store("Simulated read error".to_string()));
        }
        Ok(self.values.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(MindDumpError::Store("Simulated write error".to_string()));
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(MindDumpError::Store("Simulated write error".to_string()));
        }
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_write_remove() {
        let kv = MemKv::new();
        assert_eq!(kv.read("k").unwrap(), None);
        kv.write("k", "v1").unwrap();
        kv.write("k", "v2").unwrap();
        assert_eq!(kv.read("k").unwrap(), Some("v2".to_string()));
        assert_eq!(kv.write_count(), 2);
        kv.remove("k").unwrap();
        kv.remove("k").unwrap();
        assert_eq!(kv.read("k").unwrap(), None);
    }

    #[test]
    fn simulated_failures_leave_value_untouched() {
        let kv = MemKv::with_value("k", "old");
        kv.set_simulate_write_error(true);
        assert!(kv.write("k", "new").is_err());
        assert!(kv.remove("k").is_err());
        assert_eq!(kv.value("k"), Some("old".to_string()));

        kv.set_simulate_read_error(true);
        assert!(kv.read("k").is_err());
    }
}
