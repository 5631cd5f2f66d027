//! Board analytics
//!
//! A pure projection from a widget collection to aggregate counts. It is
//! recomputed wholesale whenever the caller asks and is never persisted.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::models::{Color, Widget};

/// Counts per key, keeping keys in the order they were first seen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally<K> {
    entries: Vec<(K, usize)>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq> Tally<K> {
    pub fn increment(&mut self, key: K) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((key, 1)),
        }
    }

    /// Count for `key`, zero when never seen
    pub fn get<Q>(&self, key: &Q) -> usize
    where
        K: PartialEq<Q>,
        Q: ?Sized,
    {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map_or(0, |(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.entries.iter().map(|(k, count)| (k, *count))
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }
}

impl<K: Serialize> Serialize for Tally<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in &self.entries {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

/// Aggregate statistics over a widget collection
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub pending_tasks: usize,
    /// Percentage of completed widgets; 0 for an empty collection
    pub completion_rate: f64,
    pub widgets_by_date: Tally<String>,
    pub widgets_by_color: Tally<Color>,
}

impl Analytics {
    /// Derive statistics in a single pass over `widgets`
    pub fn compute<'a, I>(widgets: I) -> Self
    where
        I: IntoIterator<Item = &'a Widget>,
    {
        let mut stats = Analytics::default();

        for widget in widgets {
            stats.total_tasks += 1;
            if widget.completed {
                stats.completed_tasks += 1;
            }
            stats.widgets_by_date.increment(widget.created_date.clone());
            stats.widgets_by_color.increment(widget.color);
        }

        stats.pending_tasks = stats.total_tasks - stats.completed_tasks;
        stats.completion_rate = if stats.total_tasks == 0 {
            0.0
        } else {
            stats.completed_tasks as f64 / stats.total_tasks as f64 * 100.0
        };

        stats
    }
}
