use tracing::{debug, info, warn};

use crate::error::StorageError;

/// A single durable string slot. Writes replace the slot wholesale.
pub trait RecordStore {
    fn load(&self) -> Result<Option<String>, StorageError>;
    fn save(&self, value: &str) -> Result<(), StorageError>;
}

/// Wraps a [`RecordStore`] and absorbs its failures so nothing reaches the
/// core application.
pub struct PersistenceAdapter {
    store: Box<dyn RecordStore>,
}

impl PersistenceAdapter {
    pub fn new(store: Box<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Option<String> {
        match self.store.load() {
            Ok(Some(record)) => {
                info!("restored persisted body index record ({} bytes)", record.len());
                Some(record)
            }
            Ok(None) => {
                debug!("no persisted body index record");
                None
            }
            Err(error) => {
                warn!("treating persisted record as absent: {}", error);
                None
            }
        }
    }

    /// Returns whether the write reached the store.
    pub fn save(&self, value: &str) -> bool {
        match self.store.save(value) {
            Ok(()) => {
                debug!("saved body index record ({} bytes)", value.len());
                true
            }
            Err(error) => {
                warn!("dropping body index record save: {}", error);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryRecordStore;

    #[test]
    fn load_is_absent_before_any_write() {
        let adapter = PersistenceAdapter::new(Box::new(MemoryRecordStore::default()));
        assert_eq!(adapter.load(), None);
    }

    #[test]
    fn save_then_load_returns_exact_value() {
        let adapter = PersistenceAdapter::new(Box::new(MemoryRecordStore::default()));
        assert!(adapter.save(r#"{"weight":70}"#));
        assert_eq!(adapter.load().as_deref(), Some(r#"{"weight":70}"#));
    }

    #[test]
    fn second_save_overwrites_first() {
        let adapter = PersistenceAdapter::new(Box::new(MemoryRecordStore::default()));
        adapter.save(r#"{"weight":70,"height":180}"#);
        adapter.save(r#"{"weight":72}"#);
        assert_eq!(adapter.load().as_deref(), Some(r#"{"weight":72}"#));
    }

    #[test]
    fn failing_load_is_absorbed_as_absent() {
        let store = MemoryRecordStore::with_record("stale");
        store.fail_with(StorageError::Read("SecurityError".to_string()));
        let adapter = PersistenceAdapter::new(Box::new(store));
        assert_eq!(adapter.load(), None);
    }

    #[test]
    fn failing_save_is_absorbed_and_keeps_previous_value() {
        let store = MemoryRecordStore::with_record("previous");
        let handle = store.clone();
        store.fail_with(StorageError::Write("QuotaExceededError".to_string()));
        let adapter = PersistenceAdapter::new(Box::new(store));

        assert!(!adapter.save("next"));
        assert_eq!(handle.snapshot().as_deref(), Some("previous"));
    }
}
