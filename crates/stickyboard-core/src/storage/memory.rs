//! In-process key-value backend
//!
//! Nothing is durable. Writes can be switched to fail, which is how tests
//! exercise the quota-exceeded path.

use std::collections::HashMap;

use super::error::{StorageError, StorageResult};
use super::KeyValueStore;

#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: HashMap<String, String>,
    rejecting: Option<String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following `set` and `remove` fail with `reason`
    pub fn reject_writes(&mut self, reason: impl Into<String>) {
        self.rejecting = Some(reason.into());
    }

    pub fn accept_writes(&mut self) {
        self.rejecting = None;
    }

    /// Store a raw value, bypassing write rejection
    pub fn insert_raw(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    fn check_writable(&self, key: &str) -> StorageResult<()> {
        match self.rejecting {
            Some(ref reason) => Err(StorageError::WriteRejected {
                key: key.to_string(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.check_writable(key)?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.check_writable(key)?;
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_writes_leave_value_untouched() {
        let mut kv = MemoryKeyValueStore::new();
        kv.set("k", "before").unwrap();

        kv.reject_writes("quota exceeded");
        let err = kv.set("k", "after").unwrap_err();
        assert!(matches!(err, StorageError::WriteRejected { .. }));
        assert!(kv.remove("k").is_err());
        assert_eq!(kv.get("k").unwrap().as_deref(), Some("before"));

        kv.accept_writes();
        kv.set("k", "after").unwrap();
        assert_eq!(kv.get("k").unwrap().as_deref(), Some("after"));
    }
}
