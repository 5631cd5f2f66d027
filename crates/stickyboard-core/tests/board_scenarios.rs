use stickyboard_core::storage::{decode_widgets, WIDGETS_KEY};
use stickyboard_core::{
    Analytics, Color, KeyValueStore, MemoryKeyValueStore, NewWidget, Preferences,
    SqliteKeyValueStore, WidgetId, WidgetPatch, WidgetStore,
};
use tempfile::TempDir;

#[test]
fn completion_rate_follows_every_mutation() {
    let mut store = WidgetStore::open(MemoryKeyValueStore::new());

    let a = store
        .create(NewWidget::new("A").completed(false))
        .into_value();
    assert_eq!(store.analytics().completion_rate, 0.0);

    store.update(&a.id, &WidgetPatch::new().completed(true));
    assert_eq!(store.analytics().completion_rate, 100.0);

    store.create(NewWidget::new("B").completed(false));
    let stats = store.analytics();
    assert_eq!(stats.completion_rate, 50.0);
    assert_eq!(stats.total_tasks, 2);
    assert_eq!(stats.pending_tasks, 1);
}

#[test]
fn widgets_grouped_by_creation_date() {
    let mut store = WidgetStore::open(MemoryKeyValueStore::new());
    for date in ["2024-01-01", "2024-01-01", "2024-01-02"] {
        store.create(NewWidget::new("note").created_on(date));
    }

    let stats = store.analytics();
    assert_eq!(stats.widgets_by_date.len(), 2);
    assert_eq!(stats.widgets_by_date.get("2024-01-01"), 2);
    assert_eq!(stats.widgets_by_date.get("2024-01-02"), 1);
}

#[test]
fn histograms_cover_every_widget() {
    let mut store = WidgetStore::open(MemoryKeyValueStore::new());
    let colors = [Color::Yellow, Color::Blue, Color::Blue, Color::Purple, Color::Orange];
    for (i, color) in colors.iter().enumerate() {
        store.create(
            NewWidget::new(format!("n{}", i))
                .color(*color)
                .created_on(format!("2024-02-0{}", i % 3 + 1))
                .completed(i % 2 == 0),
        );
    }

    let stats = store.analytics();
    assert_eq!(stats.total_tasks, 5);
    assert_eq!(stats.completed_tasks, 3);
    assert_eq!(stats.widgets_by_date.total(), 5);
    assert_eq!(stats.widgets_by_color.total(), 5);
    assert_eq!(stats, Analytics::compute(store.list()));
}

#[test]
fn stamp_outlives_marker_removal() {
    let mut store = WidgetStore::open(MemoryKeyValueStore::new());
    let w = store.create(NewWidget::new("Report")).into_value();

    store.update(&w.id, &WidgetPatch::new().markers(["urgent"]).stamp("urgent"));
    store.update(&w.id, &WidgetPatch::new().markers(Vec::<String>::new()));

    let w = store.get(&w.id).unwrap();
    assert!(w.markers.is_empty());
    assert_eq!(w.stamp.as_deref(), Some("urgent"));
}

#[test]
fn toggling_stamps_through_the_store() {
    let mut store = WidgetStore::open(MemoryKeyValueStore::new());
    let w = store
        .create(NewWidget::new("Review PR").markers(["review"]))
        .into_value();

    let patch = w.toggle_stamp("important");
    let w = store.update(&w.id, &patch).into_value().unwrap();
    assert_eq!(w.markers, vec!["review", "important"]);
    assert_eq!(w.stamp.as_deref(), Some("important"));

    let patch = w.toggle_stamp("review");
    let w = store.update(&w.id, &patch).into_value().unwrap();
    assert_eq!(w.markers, vec!["important"]);
    assert_eq!(w.stamp.as_deref(), Some("review"));
}

#[test]
fn clear_erases_the_durable_key_but_not_preferences() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("board.db");

    {
        let mut store = WidgetStore::open(SqliteKeyValueStore::open(&path).unwrap());
        store.create(NewWidget::new("A"));
        store.create(NewWidget::new("B"));
        Preferences::new(store.backend_mut())
            .set_dark_mode(true)
            .unwrap();

        assert!(store.clear().is_durable());
        assert!(store.list().is_empty());
    }

    let mut backend = SqliteKeyValueStore::open(&path).unwrap();
    assert!(backend.get(WIDGETS_KEY).unwrap().is_none());
    assert!(Preferences::new(&mut backend).dark_mode());
    assert!(WidgetStore::open(backend).is_empty());
}

#[test]
fn records_from_older_versions_load() {
    let mut backend = MemoryKeyValueStore::new();
    backend.insert_raw(
        WIDGETS_KEY,
        r#"[{"id":"widget-1700000000000","title":"Legacy","content":"","x":null,"y":200,
            "color":"blue","completed":false,"createdDate":"2023-11-14","markers":[],"zIndex":0}]"#,
    );

    let mut store = WidgetStore::open(backend);
    let legacy = WidgetId::from("widget-1700000000000");
    assert_eq!(store.get(&legacy).unwrap().display_position(), (50.0, 200.0));

    // Untouched fields survive a rewrite
    store.update(&legacy, &WidgetPatch::new().title("Legacy!"));
    let raw = store.backend().get(WIDGETS_KEY).unwrap().unwrap();
    let reloaded = decode_widgets(&raw).unwrap();
    assert_eq!(reloaded[0].title, "Legacy!");
    assert_eq!(reloaded[0].created_date, "2023-11-14");
    assert_eq!(reloaded[0].color, Color::Blue);
}
