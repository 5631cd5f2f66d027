//! Display preferences
//!
//! The dark-mode flag lives in the same key-value namespace as the widgets
//! but is independent of them: clearing the board leaves it alone.

use tracing::warn;

use crate::storage::{KeyValueStore, StorageResult, DARK_MODE_KEY};

/// Preference accessor borrowing the board's backend
pub struct Preferences<'a, B: KeyValueStore + ?Sized> {
    backend: &'a mut B,
}

impl<'a, B: KeyValueStore + ?Sized> Preferences<'a, B> {
    pub fn new(backend: &'a mut B) -> Self {
        Self { backend }
    }

    /// Stored dark-mode flag; anything but `"true"` (or an unreadable value) is off
    pub fn dark_mode(&self) -> bool {
        match self.backend.get(DARK_MODE_KEY) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(err) => {
                warn!("Failed to read dark-mode preference: {}", err);
                false
            }
        }
    }

    pub fn set_dark_mode(&mut self, enabled: bool) -> StorageResult<()> {
        self.backend
            .set(DARK_MODE_KEY, if enabled { "true" } else { "false" })
    }

    /// Flip the flag and return the new value
    pub fn toggle_dark_mode(&mut self) -> StorageResult<bool> {
        let enabled = !self.dark_mode();
        self.set_dark_mode(enabled)?;
        Ok(enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewWidget;
    use crate::storage::MemoryKeyValueStore;
    use crate::store::WidgetStore;

    #[test]
    fn test_defaults_to_light() {
        let mut backend = MemoryKeyValueStore::new();
        assert!(!Preferences::new(&mut backend).dark_mode());
    }

    #[test]
    fn test_stored_as_literal_strings() {
        let mut backend = MemoryKeyValueStore::new();

        Preferences::new(&mut backend).set_dark_mode(true).unwrap();
        assert_eq!(backend.get(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));

        Preferences::new(&mut backend).set_dark_mode(false).unwrap();
        assert_eq!(backend.get(DARK_MODE_KEY).unwrap().as_deref(), Some("false"));
    }

    #[test]
    fn test_unexpected_value_reads_as_off() {
        let mut backend = MemoryKeyValueStore::new();
        backend.insert_raw(DARK_MODE_KEY, "yes please");
        assert!(!Preferences::new(&mut backend).dark_mode());
    }

    #[test]
    fn test_toggle() {
        let mut backend = MemoryKeyValueStore::new();
        let mut prefs = Preferences::new(&mut backend);

        assert!(prefs.toggle_dark_mode().unwrap());
        assert!(prefs.dark_mode());
        assert!(!prefs.toggle_dark_mode().unwrap());
    }

    #[test]
    fn test_survives_board_clear() {
        let mut store = WidgetStore::open(MemoryKeyValueStore::new());
        store.create(NewWidget::new("A"));
        Preferences::new(store.backend_mut())
            .set_dark_mode(true)
            .unwrap();

        store.clear();

        assert!(Preferences::new(store.backend_mut()).dark_mode());
    }
}
