//! Storage layer
//!
//! A durable key-value namespace holding string values, and the codec for
//! the one structured value the board keeps in it.
//!
//! ## Keys
//!
//! - `widget-notes-data`: JSON array of widget records
//! - `widget-dark-mode`: literal `"true"` or `"false"`
//!
//! ## Backends
//!
//! - **SQLite**: one `kv` table in `stickyboard.db` (default)
//! - **File**: one file per key with atomic replace
//! - **Memory**: nothing durable, used by tests and scratch boards

pub mod error;
pub mod file;
pub mod memory;
pub mod schema;
pub mod sqlite;

use anyhow::{Context, Result};

use crate::config::{BackendKind, Config};
use crate::models::Widget;

pub use error::{StorageError, StorageResult};
pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

/// Key holding the serialized widget collection
pub const WIDGETS_KEY: &str = "widget-notes-data";

/// Key holding the dark-mode flag
pub const DARK_MODE_KEY: &str = "widget-dark-mode";

/// A durable string-to-string namespace
///
/// Each `set` replaces the whole value for a key in one step.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove a key entirely; absent keys are not an error
    fn remove(&mut self, key: &str) -> StorageResult<()>;

    fn contains(&self, key: &str) -> StorageResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

/// Open the backend selected by the configuration
pub fn open_backend(config: &Config) -> Result<Box<dyn KeyValueStore>> {
    let backend: Box<dyn KeyValueStore> = match config.backend {
        BackendKind::Sqlite => {
            let path = config.sqlite_path();
            Box::new(
                SqliteKeyValueStore::open(&path)
                    .with_context(|| format!("Failed to open SQLite database at {:?}", path))?,
            )
        }
        BackendKind::File => Box::new(FileKeyValueStore::new(config.kv_dir())),
        BackendKind::Memory => Box::new(MemoryKeyValueStore::new()),
    };
    tracing::debug!("Opened {} backend", config.backend);
    Ok(backend)
}

/// Parse the persisted widget collection
pub fn decode_widgets(raw: &str) -> StorageResult<Vec<Widget>> {
    serde_json::from_str(raw).map_err(|e| StorageError::InvalidFormat {
        key: WIDGETS_KEY.to_string(),
        details: e.to_string(),
    })
}

/// Serialize the widget collection for persistence
pub fn encode_widgets(widgets: &[Widget]) -> StorageResult<String> {
    serde_json::to_string(widgets).map_err(|e| StorageError::InvalidFormat {
        key: WIDGETS_KEY.to_string(),
        details: e.to_string(),
    })
}
