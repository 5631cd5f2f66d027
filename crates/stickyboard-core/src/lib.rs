//! stickyboard core library
//!
//! This crate provides the core functionality for stickyboard, a local-first
//! sticky-notes board: widgets (notes) placed on a canvas, tagged, stamped,
//! completed, and summarized by analytics.
//!
//! # Architecture
//!
//! - **WidgetStore**: owns the widget collection and keeps it persisted in a
//!   key-value backend, one whole-collection write per mutation
//! - **Analytics**: a pure projection over the collection, recomputed on demand
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let mut store = WidgetStore::open(open_backend(&config)?);
//!
//! let widget = store.create(NewWidget::new("Water the plants")).into_value();
//! store.update(&widget.id, &WidgetPatch::new().completed(true));
//!
//! let stats = store.analytics();
//! ```
//!
//! # Modules
//!
//! - `store`: Widget store (main entry point)
//! - `models`: Widgets, colors, creation fields and patches
//! - `analytics`: Aggregate statistics
//! - `storage`: Key-value backends and the persisted record format
//! - `preferences`: Dark-mode flag
//! - `config`: Application configuration

pub mod analytics;
pub mod config;
pub mod models;
pub mod preferences;
pub mod storage;
pub mod store;

pub use analytics::{Analytics, Tally};
pub use config::{BackendKind, Config};
pub use models::{Color, NewWidget, Widget, WidgetId, WidgetPatch, STAMP_LABELS};
pub use preferences::Preferences;
pub use storage::{
    open_backend, FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore,
    StorageError, StorageResult,
};
pub use store::{Persisted, WidgetStore};
