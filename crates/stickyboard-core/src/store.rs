//! Widget store
//!
//! The `WidgetStore` owns the board's widget collection and the key-value
//! backend it is persisted to.
//!
//! ## Persistence
//!
//! The collection is loaded once by `open`. Every mutation applies its change
//! to the collection and then writes the entire collection back under
//! `widget-notes-data` in a single `set`. There are no per-record writes.
//!
//! A failed write is logged and reported through `Persisted`, but the
//! in-memory change stands. The next successful write persists the whole
//! collection again, which brings the durable copy back in line.
//!
//! A failed or unparsable read is logged and treated as an empty board.
//!
//! ## One writer per backend
//!
//! Mutations write the session copy; they do not re-read the backend first.
//! Two stores open on the same backend therefore overwrite each other at
//! whole-collection granularity: the last write wins and the other store's
//! widgets are dropped from durable state. Call `reload` to pick up changes
//! made elsewhere before mutating.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = WidgetStore::open(SqliteKeyValueStore::open(&path)?);
//!
//! let widget = store.create(NewWidget::new("Buy milk")).into_value();
//! store.update(&widget.id, &WidgetPatch::new().completed(true));
//!
//! let stats = store.analytics();
//! ```

use tracing::{debug, info, warn};

use crate::analytics::Analytics;
use crate::models::{today, NewWidget, Widget, WidgetId, WidgetPatch};
use crate::storage::{decode_widgets, encode_widgets, KeyValueStore, StorageError, WIDGETS_KEY};

/// Outcome of a mutation: the in-memory result plus whether it reached storage
#[derive(Debug)]
pub struct Persisted<T> {
    value: T,
    failure: Option<StorageError>,
}

impl<T> Persisted<T> {
    fn new(value: T, failure: Option<StorageError>) -> Self {
        Self { value, failure }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    /// True when the change was written to the backend
    pub fn is_durable(&self) -> bool {
        self.failure.is_none()
    }

    /// The write error, if the change only exists in memory
    pub fn failure(&self) -> Option<&StorageError> {
        self.failure.as_ref()
    }

    /// Turn a failed write into an error for callers that need durability
    pub fn into_result(self) -> Result<T, StorageError> {
        match self.failure {
            None => Ok(self.value),
            Some(err) => Err(err),
        }
    }
}

/// Authoritative widget collection kept in step with a key-value backend
pub struct WidgetStore<B: KeyValueStore> {
    backend: B,
    widgets: Vec<Widget>,
}

impl<B: KeyValueStore> WidgetStore<B> {
    /// Open the store, loading whatever collection the backend holds
    pub fn open(backend: B) -> Self {
        let widgets = load_widgets(&backend);
        debug!("Loaded {} widget(s)", widgets.len());
        Self { backend, widgets }
    }

    /// The current collection, in insertion order
    pub fn list(&self) -> &[Widget] {
        &self.widgets
    }

    /// Discard the session collection and read the backend again
    pub fn reload(&mut self) -> &[Widget] {
        self.widgets = load_widgets(&self.backend);
        &self.widgets
    }

    pub fn get(&self, id: &WidgetId) -> Option<&Widget> {
        self.widgets.iter().find(|w| &w.id == id)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Create a widget from the given fields
    ///
    /// Assigns a fresh id and a stacking order equal to the collection size
    /// before insertion.
    pub fn create(&mut self, fields: NewWidget) -> Persisted<Widget> {
        let mut id = WidgetId::generate();
        while self.get(&id).is_some() {
            id = WidgetId::generate();
        }

        let widget = Widget::from_new(id, self.widgets.len() as i64, fields);
        self.widgets.push(widget.clone());
        debug!("Created widget {}", widget.id);

        Persisted::new(widget, self.persist().err())
    }

    /// Shallow-merge `patch` into the widget with `id`
    ///
    /// Returns the updated widget, or `None` without touching storage when no
    /// widget has that id.
    pub fn update(&mut self, id: &WidgetId, patch: &WidgetPatch) -> Persisted<Option<Widget>> {
        let Some(widget) = self.widgets.iter_mut().find(|w| &w.id == id) else {
            debug!("Update skipped, no widget {}", id);
            return Persisted::new(None, None);
        };

        widget.apply(patch);
        let updated = widget.clone();

        Persisted::new(Some(updated), self.persist().err())
    }

    /// Remove the widget with `id`
    ///
    /// Returns the removed widget, or `None` without touching storage when no
    /// widget has that id.
    pub fn delete(&mut self, id: &WidgetId) -> Persisted<Option<Widget>> {
        let Some(pos) = self.widgets.iter().position(|w| &w.id == id) else {
            debug!("Delete skipped, no widget {}", id);
            return Persisted::new(None, None);
        };

        let removed = self.widgets.remove(pos);
        debug!("Deleted widget {}", removed.id);

        Persisted::new(Some(removed), self.persist().err())
    }

    /// Discard every widget and erase the persisted collection key
    ///
    /// Unconditional: confirming with the user is the caller's job.
    /// Returns how many widgets were discarded.
    pub fn clear(&mut self) -> Persisted<usize> {
        let discarded = self.widgets.len();
        self.widgets.clear();
        info!("Cleared {} widget(s)", discarded);

        let failure = self.backend.remove(WIDGETS_KEY).err();
        if let Some(ref err) = failure {
            warn!("Failed to erase persisted widgets: {}", err);
        }
        Persisted::new(discarded, failure)
    }

    /// Widgets created today
    pub fn today_widgets(&self) -> Vec<Widget> {
        self.widgets_created_on(&today())
    }

    /// Widgets whose creation date equals `date` exactly
    pub fn widgets_created_on(&self, date: &str) -> Vec<Widget> {
        self.widgets
            .iter()
            .filter(|w| w.created_date == date)
            .cloned()
            .collect()
    }

    /// Widgets in render order (lowest stacking order first)
    pub fn stacked(&self) -> Vec<&Widget> {
        let mut widgets: Vec<&Widget> = self.widgets.iter().collect();
        widgets.sort_by_key(|w| w.z_index);
        widgets
    }

    /// Aggregate statistics over the current collection
    pub fn analytics(&self) -> Analytics {
        Analytics::compute(&self.widgets)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the shared backend (for keys the store doesn't own)
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Write the whole collection as one value
    fn persist(&mut self) -> Result<(), StorageError> {
        let result = encode_widgets(&self.widgets)
            .and_then(|raw| self.backend.set(WIDGETS_KEY, &raw));

        match result {
            Ok(()) => {
                debug!("Persisted {} widget(s)", self.widgets.len());
                Ok(())
            }
            Err(err) => {
                warn!(
                    "Failed to persist widgets, keeping changes in memory only: {}",
                    err
                );
                Err(err)
            }
        }
    }
}

/// Read the persisted collection, degrading to empty on any failure
fn load_widgets<B: KeyValueStore + ?Sized>(backend: &B) -> Vec<Widget> {
    let raw = match backend.get(WIDGETS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!("Failed to read widgets, starting with an empty board: {}", err);
            return Vec::new();
        }
    };

    match decode_widgets(&raw) {
        Ok(widgets) => widgets,
        Err(err) => {
            warn!("Stored widgets are unreadable, starting with an empty board: {}", err);
            Vec::new()
        }
    }
}
