use super::backend::KvBackend;
use crate::error::{DraftError, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory key-value backend for testing.
///
/// Uses `RefCell` for interior mutability since sessions are single-threaded.
/// Besides storing values it records every successful `set`, so tests can assert
/// how many writes reached a key and in what order.
#[derive(Default)]
pub struct MemBackend {
    values: RefCell<HashMap<String, String>>,
    writes: RefCell<Vec<(String, String)>>,
    simulate_write_error: RefCell<bool>,
    simulate_read_error: RefCell<bool>,
    failing_suffix: RefCell<Option<String>>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation (quota exceeded, storage disabled).
    /// Affects both `set` and `remove`.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Fail `set` only for keys ending in `suffix` (`None` turns it off).
    pub fn set_failing_suffix(&self, suffix: Option<&str>) {
        *self.failing_suffix.borrow_mut() = suffix.map(str::to_string);
    }

    /// Enable read error simulation.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        *self.simulate_read_error.borrow_mut() = simulate;
    }

    /// Number of successful writes to `key`.
    pub fn write_count(&self, key: &str) -> usize {
        self.writes.borrow().iter().filter(|(k, _)| k == key).count()
    }

    /// Every successful write, oldest first.
    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.borrow().clone()
    }

    pub fn clear_write_log(&self) {
        self.writes.borrow_mut().clear();
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl KvBackend for MemBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if *self.simulate_read_error.borrow() {
            return Err(DraftError::StorageUnavailable(
                "Simulated read error".to_string(),
            ));
        }
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(DraftError::StorageUnavailable(
                "Simulated write error".to_string(),
            ));
        }
        if let Some(suffix) = self.failing_suffix.borrow().as_deref() {
            if key.ends_with(suffix) {
                return Err(DraftError::StorageUnavailable(format!(
                    "Simulated write error for {}",
                    key
                )));
            }
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes
            .borrow_mut()
            .push((key.to_string(), value.to_string()));
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(DraftError::StorageUnavailable(
                "Simulated write error".to_string(),
            ));
        }
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}
