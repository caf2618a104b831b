//! In-memory host store.
//!
//! Backs the "fixed devices" configuration: the list is seeded from
//! `[[seed_hosts]]` in the config file (or from code) and every save only
//! replaces the in-memory copy.  Nothing survives the process.
//!
//! Clones share the same underlying list, so a test can keep a handle and
//! observe what the repository saved.

use std::cell::RefCell;
use std::rc::Rc;

use wol_core::HostRecord;

use crate::application::manage_hosts::{HostStore, StorageError};

/// A non-durable [`HostStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryHostStore {
    records: Rc<RefCell<Vec<HostRecord>>>,
}

impl MemoryHostStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose first `load` returns `seed`.
    pub fn seeded(seed: Vec<HostRecord>) -> Self {
        Self {
            records: Rc::new(RefCell::new(seed)),
        }
    }

    /// Returns a copy of the current contents.
    pub fn snapshot(&self) -> Vec<HostRecord> {
        self.records.borrow().clone()
    }
}

impl HostStore for MemoryHostStore {
    fn load(&self) -> Result<Vec<HostRecord>, StorageError> {
        Ok(self.snapshot())
    }

    fn save(&mut self, records: &[HostRecord]) -> Result<(), StorageError> {
        *self.records.borrow_mut() = records.to_vec();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory (not persisted)".to_string()
    }
}
