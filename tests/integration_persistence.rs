use std::sync::Arc;
use std::time::{Duration, Instant};

use indoc::indoc;
use pane_wm::{
    FileStore, FixedViewport, KeyValueStore, MemoryStore, PaneId, PersistenceAdapter, Position,
    Size, WindowEvent, WindowRegistry, WmConfig,
};

const WINDOWS_KEY: &str = "pane-wm.windows";
const ACTIVE_KEY: &str = "pane-wm.active";

fn registry_with(store: impl KeyValueStore + 'static, width: i32, height: i32) -> WindowRegistry {
    let config = WmConfig::default();
    let adapter = PersistenceAdapter::new(store, &config);
    WindowRegistry::with_persistence(config, Arc::new(FixedViewport::new(width, height)), adapter)
}

fn after_debounce() -> Instant {
    Instant::now() + Duration::from_millis(301)
}

#[test]
fn burst_of_mutations_writes_once() {
    let store = MemoryStore::new();
    let mut reg = registry_with(store.clone(), 1600, 1000);
    let a = reg.create_window("a", "a", None);
    for step in 0..20 {
        reg.update_position(&a, f64::from(step * 10), 200.0);
    }
    assert!(reg.has_pending_save());
    assert!(!reg.tick(Instant::now()));
    assert_eq!(store.write_count(), 0);

    assert!(reg.tick(after_debounce()));
    // one write per key
    assert_eq!(store.write_count(), 2);
    assert!(!reg.has_pending_save());
    assert!(!reg.tick(after_debounce() + Duration::from_secs(5)));
    assert_eq!(store.write_count(), 2);
}

#[test]
fn layout_survives_restart() {
    let store = MemoryStore::new();
    {
        let mut reg = registry_with(store.clone(), 1600, 1000);
        let a = reg.create_window("a", "Alpha", Some(Position::new(10, 90)));
        let b = reg.create_window("b", "Beta", None);
        reg.create_window("c", "Gamma", None);
        reg.update_size(&b, 700, 500);
        reg.toggle_maximize(&b);
        reg.activate_window(&a);
        reg.toggle_minimize(&PaneId::from("c"));
        reg.flush().unwrap();
    }

    let mut reg = registry_with(store, 1600, 1000);
    let stack: Vec<&str> = reg.z_order().iter().map(PaneId::as_str).collect();
    assert_eq!(stack, vec!["c", "b", "a"]);
    assert_eq!(reg.active_window_id(), Some(&PaneId::from("a")));
    let b = reg.pane(&PaneId::from("b")).unwrap();
    assert_eq!(b.size(), Size::new(700, 500));
    assert!(b.is_maximized);
    assert_eq!(b.title, "Beta");
    assert!(reg.pane(&PaneId::from("c")).unwrap().is_minimized);
    assert!(matches!(
        reg.take_events().as_slice(),
        [WindowEvent::Restored { panes: 3 }]
    ));

    // the counter continues above every restored z-index
    let top = reg.z_index(&PaneId::from("a")).unwrap();
    reg.activate_window(&PaneId::from("c"));
    assert!(reg.z_index(&PaneId::from("c")).unwrap() > top);
}

#[test]
fn iteration_order_survives_restart() {
    let store = MemoryStore::new();
    {
        let mut reg = registry_with(store.clone(), 1600, 1000);
        for id in ["z", "m", "a"] {
            reg.create_window(id, id, None);
        }
        reg.flush().unwrap();
    }
    let reg = registry_with(store, 1600, 1000);
    let order: Vec<&str> = reg.panes().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(order, vec!["z", "m", "a"]);
}

#[test]
fn corrupt_snapshot_starts_empty() {
    let store = MemoryStore::new();
    store.insert_raw(WINDOWS_KEY, "{\"version\": 1, \"windows\": [");
    store.insert_raw(ACTIVE_KEY, "\"a\"");
    let reg = registry_with(store, 1000, 800);
    assert!(reg.is_empty());
    assert_eq!(reg.active_window_id(), None);
}

#[test]
fn restored_records_are_sanitized() {
    let store = MemoryStore::new();
    store.insert_raw(
        WINDOWS_KEY,
        indoc! {r#"
            [
              {"id": "a", "x": 1900, "y": 5, "width": 50, "height": 50, "zIndex": 1010},
              {"id": "b", "x": 10, "y": 10, "width": 400, "height": 600, "zIndex": 1020,
               "isMinimized": true},
              {"id": "a", "x": 0, "y": 0, "width": 999, "height": 999, "zIndex": 1030}
            ]
        "#},
    );
    store.insert_raw(ACTIVE_KEY, "\"ghost\"");
    let reg = registry_with(store, 1000, 800);

    assert_eq!(reg.len(), 2);
    let a = reg.pane(&PaneId::from("a")).unwrap();
    assert_eq!(a.size(), Size::new(300, 400));
    assert_eq!(a.position(), Position::new(700, 5));
    // ghost does not exist and b is minimized, so a takes over
    assert_eq!(reg.active_window_id(), Some(&PaneId::from("a")));
}

#[test]
fn failed_write_is_retried() {
    let store = MemoryStore::new();
    let mut reg = registry_with(store.clone(), 1000, 800);
    reg.create_window("a", "a", None);

    store.set_fail_writes(true);
    let first = after_debounce();
    assert!(!reg.tick(first));
    assert!(reg.has_pending_save());
    assert!(reg.flush().is_err());

    store.set_fail_writes(false);
    assert!(reg.tick(first + Duration::from_millis(301)));
    assert!(store.raw(WINDOWS_KEY).is_some());
}

#[test]
fn file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut reg = registry_with(FileStore::new(dir.path()), 1280, 800);
        reg.create_window("conv-1", "Support", None);
        reg.create_window("conv-2", "Sales", None);
        reg.close_window(&PaneId::from("conv-2"));
        reg.flush().unwrap();
    }
    assert!(dir.path().join("pane-wm.windows.json").exists());
    assert!(dir.path().join("pane-wm.active.json").exists());

    let reg = registry_with(FileStore::new(dir.path()), 1280, 800);
    assert_eq!(reg.len(), 1);
    assert_eq!(reg.active_window_id(), Some(&PaneId::from("conv-1")));
}

#[test]
fn custom_key_prefix_is_used() {
    let store = MemoryStore::new();
    let config = WmConfig {
        storage_key_prefix: "chat-canvas".to_string(),
        ..WmConfig::default()
    };
    let adapter = PersistenceAdapter::new(store.clone(), &config);
    let mut reg =
        WindowRegistry::with_persistence(config, Arc::new(FixedViewport::new(1000, 800)), adapter);
    reg.create_window("a", "a", None);
    reg.flush().unwrap();
    assert!(store.raw("chat-canvas.windows").is_some());
    assert_eq!(store.raw(WINDOWS_KEY), None);
}
