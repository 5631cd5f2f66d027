//! Data models for stickyboard
//!
//! Defines the core data structures: `Widget` (a sticky note on the board),
//! its identifier, its palette color, and the two shapes used to mutate it:
//! `NewWidget` for creation and `WidgetPatch` for shallow partial updates.
//!
//! Every persisted field except `id` carries a serde default so records
//! written by older versions still load.

use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Fallback canvas coordinate for missing or non-finite positions
pub const DEFAULT_COORDINATE: f64 = 50.0;

/// Stamp labels offered by the board
pub const STAMP_LABELS: [&str; 4] = ["urgent", "important", "review", "completed"];

/// Format of `Widget::created_date`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's calendar date formatted the way widgets record it
pub fn today() -> String {
    Utc::now().date_naive().format(DATE_FORMAT).to_string()
}

/// Opaque widget identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(String);

impl WidgetId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(format!("widget-{}", Uuid::new_v4()))
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for WidgetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for WidgetId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Palette a widget can be painted with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[default]
    Yellow,
    Blue,
    Green,
    Pink,
    Purple,
    Orange,
}

impl Color {
    /// Every palette entry in display order
    pub const ALL: [Color; 6] = [
        Color::Yellow,
        Color::Blue,
        Color::Green,
        Color::Pink,
        Color::Purple,
        Color::Orange,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Color::Yellow => "yellow",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Pink => "pink",
            Color::Purple => "purple",
            Color::Orange => "orange",
        }
    }

    /// Hex swatch used when rendering
    pub fn hex(&self) -> &'static str {
        match self {
            Color::Yellow => "#FCD34D",
            Color::Blue => "#93C5FD",
            Color::Green => "#86EFAC",
            Color::Pink => "#F472B6",
            Color::Purple => "#D8B4FE",
            Color::Orange => "#FED7AA",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let wanted = s.trim();
        match Color::ALL
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
        {
            Some(color) => Ok(*color),
            None => bail!(
                "Unknown color '{}'. Choose one of: yellow, blue, green, pink, purple, orange",
                wanted
            ),
        }
    }
}

// Unknown colors fall back to the default instead of failing the whole collection
impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or_default())
    }
}

/// A sticky note on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    /// Unique identifier, fixed at creation
    pub id: WidgetId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Canvas position; may be non-finite, see `display_position`
    #[serde(default = "default_coordinate", deserialize_with = "lenient_coordinate")]
    pub x: f64,
    #[serde(default = "default_coordinate", deserialize_with = "lenient_coordinate")]
    pub y: f64,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub completed: bool,
    /// Calendar date (`YYYY-MM-DD`) fixed at creation
    #[serde(default)]
    pub created_date: String,
    /// Tag labels; order carries no meaning
    #[serde(default)]
    pub markers: Vec<String>,
    /// Last stamp toggled, independent of `markers`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stamp: Option<String>,
    /// Stacking order assigned at creation
    #[serde(default)]
    pub z_index: i64,
}

fn default_coordinate() -> f64 {
    DEFAULT_COORDINATE
}

/// serde_json writes non-finite floats as `null`; read them back as NaN
fn lenient_coordinate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.unwrap_or(f64::NAN))
}

impl Widget {
    /// Materialize a widget from creation fields plus store-assigned identity
    pub fn from_new(id: WidgetId, z_index: i64, fields: NewWidget) -> Self {
        Self {
            id,
            title: fields.title,
            content: fields.content,
            x: fields.x,
            y: fields.y,
            color: fields.color,
            completed: fields.completed,
            created_date: fields.created_date,
            markers: dedup_markers(fields.markers),
            stamp: fields.stamp,
            z_index,
        }
    }

    /// Position to render at, falling back to (50, 50) for unusable values
    pub fn display_position(&self) -> (f64, f64) {
        let fix = |v: f64| if v.is_finite() { v } else { DEFAULT_COORDINATE };
        (fix(self.x), fix(self.y))
    }

    pub fn has_marker(&self, label: &str) -> bool {
        self.markers.iter().any(|m| m == label)
    }

    /// Build the patch for toggling a stamp on this widget
    ///
    /// The label is removed from `markers` if present and appended otherwise.
    /// `stamp` is set to the label either way.
    pub fn toggle_stamp(&self, label: &str) -> WidgetPatch {
        let markers = if self.has_marker(label) {
            self.markers
                .iter()
                .filter(|m| m.as_str() != label)
                .cloned()
                .collect()
        } else {
            let mut markers = self.markers.clone();
            markers.push(label.to_string());
            markers
        };

        WidgetPatch::new().markers(markers).stamp(label)
    }

    /// Shallow-merge a patch into this widget
    pub fn apply(&mut self, patch: &WidgetPatch) {
        if let Some(ref title) = patch.title {
            self.title = title.clone();
        }
        if let Some(ref content) = patch.content {
            self.content = content.clone();
        }
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(ref markers) = patch.markers {
            self.markers = dedup_markers(markers.clone());
        }
        if let Some(ref stamp) = patch.stamp {
            self.stamp = stamp.clone();
        }
    }
}

/// Keep the first occurrence of each label
fn dedup_markers(markers: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(markers.len());
    for marker in markers {
        if !seen.contains(&marker) {
            seen.push(marker);
        }
    }
    seen
}

/// Every widget field except identity and stacking order
#[derive(Debug, Clone, PartialEq)]
pub struct NewWidget {
    pub title: String,
    pub content: String,
    pub x: f64,
    pub y: f64,
    pub color: Color,
    pub completed: bool,
    pub created_date: String,
    pub markers: Vec<String>,
    pub stamp: Option<String>,
}

impl NewWidget {
    /// Fields for a fresh, pending widget dated today
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: String::new(),
            x: DEFAULT_COORDINATE,
            y: DEFAULT_COORDINATE,
            color: Color::default(),
            completed: false,
            created_date: today(),
            markers: Vec::new(),
            stamp: None,
        }
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    pub fn created_on(mut self, date: impl Into<String>) -> Self {
        self.created_date = date.into();
        self
    }

    pub fn markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.markers = markers.into_iter().map(Into::into).collect();
        self
    }

    pub fn stamp(mut self, stamp: impl Into<String>) -> Self {
        self.stamp = Some(stamp.into());
        self
    }
}

/// A shallow partial update
///
/// Unset fields are left untouched. `markers` replaces the whole set.
/// `stamp: Some(None)` clears the stamp.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub color: Option<Color>,
    pub completed: Option<bool>,
    pub markers: Option<Vec<String>>,
    pub stamp: Option<Option<String>>,
}

impl WidgetPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when applying this patch changes nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.markers = Some(markers.into_iter().map(Into::into).collect());
        self
    }

    pub fn stamp(mut self, stamp: impl Into<String>) -> Self {
        self.stamp = Some(Some(stamp.into()));
        self
    }

    pub fn clear_stamp(mut self) -> Self {
        self.stamp = Some(None);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Widget {
        Widget::from_new(
            WidgetId::from("widget-1"),
            0,
            NewWidget::new("Groceries").created_on("2024-01-01"),
        )
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = WidgetId::generate();
        let b = WidgetId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("widget-"));
    }

    #[test]
    fn test_new_widget_defaults() {
        let fields = NewWidget::new("Title");
        assert_eq!(fields.x, DEFAULT_COORDINATE);
        assert_eq!(fields.y, DEFAULT_COORDINATE);
        assert_eq!(fields.color, Color::Yellow);
        assert!(!fields.completed);
        assert_eq!(fields.created_date, today());
        assert!(fields.markers.is_empty());
        assert!(fields.stamp.is_none());
    }

    #[test]
    fn test_from_new_dedups_markers() {
        let w = Widget::from_new(
            WidgetId::from("w"),
            3,
            NewWidget::new("t").markers(["a", "b", "a"]),
        );
        assert_eq!(w.markers, vec!["a", "b"]);
        assert_eq!(w.z_index, 3);
    }

    #[test]
    fn test_color_parse_and_display() {
        assert_eq!("Blue".parse::<Color>().unwrap(), Color::Blue);
        assert_eq!(Color::Orange.to_string(), "orange");
        assert_eq!(Color::Pink.hex(), "#F472B6");
        assert!("teal".parse::<Color>().is_err());
    }

    #[test]
    fn test_unknown_color_deserializes_to_default() {
        let color: Color = serde_json::from_str("\"magenta\"").unwrap();
        assert_eq!(color, Color::Yellow);
    }

    #[test]
    fn test_patch_is_shallow() {
        let mut w = widget();
        w.content = "milk".to_string();
        w.apply(&WidgetPatch::new().title("Shopping"));
        assert_eq!(w.title, "Shopping");
        assert_eq!(w.content, "milk");
        assert!(WidgetPatch::new().is_empty());
        assert!(!WidgetPatch::new().completed(true).is_empty());
    }

    #[test]
    fn test_patch_markers_replace_whole_set() {
        let mut w = widget();
        w.apply(&WidgetPatch::new().markers(["urgent", "review"]));
        w.apply(&WidgetPatch::new().markers(["important"]));
        assert_eq!(w.markers, vec!["important"]);
    }

    #[test]
    fn test_toggle_stamp_adds_then_removes() {
        let mut w = widget();

        let patch = w.toggle_stamp("urgent");
        w.apply(&patch);
        assert_eq!(w.markers, vec!["urgent"]);
        assert_eq!(w.stamp.as_deref(), Some("urgent"));

        let patch = w.toggle_stamp("urgent");
        w.apply(&patch);
        assert!(w.markers.is_empty());
        // Stamp still records the last toggle
        assert_eq!(w.stamp.as_deref(), Some("urgent"));
    }

    #[test]
    fn test_clear_stamp() {
        let mut w = widget();
        w.apply(&WidgetPatch::new().stamp("review"));
        w.apply(&WidgetPatch::new().clear_stamp());
        assert!(w.stamp.is_none());
    }

    #[test]
    fn test_display_position_falls_back() {
        let mut w = widget();
        w.x = f64::NAN;
        w.y = 120.0;
        assert_eq!(w.display_position(), (50.0, 120.0));
    }

    #[test]
    fn test_serialized_field_names() {
        let w = widget();
        let json = serde_json::to_value(&w).unwrap();
        assert_eq!(json["createdDate"], "2024-01-01");
        assert_eq!(json["zIndex"], 0);
        assert_eq!(json["color"], "yellow");
        assert!(json.get("stamp").is_none());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let w: Widget = serde_json::from_str(r#"{"id":"widget-1700000000000","title":"Old"}"#).unwrap();
        assert_eq!(w.id.as_str(), "widget-1700000000000");
        assert_eq!(w.title, "Old");
        assert_eq!((w.x, w.y), (50.0, 50.0));
        assert!(w.markers.is_empty());
        assert!(w.stamp.is_none());
        assert_eq!(w.z_index, 0);
    }

    #[test]
    fn test_null_coordinates_load() {
        let w: Widget = serde_json::from_str(r#"{"id":"a","x":null,"y":10}"#).unwrap();
        assert!(w.x.is_nan());
        assert_eq!(w.display_position(), (50.0, 10.0));
    }
}
