#![allow(clippy::float_cmp)]

use super::*;
use crate::camera::Point;
use crate::geometry::Size;

#[test]
fn key_is_scoped_per_project() {
    assert_eq!(snapshot_key("landing"), "enigma-project-landing");
}

#[test]
fn missing_snapshot_loads_defaults() {
    let store = MemoryStore::new();
    let registry = load_registry(&store, "fresh");
    assert!(registry.get("button-001").is_some());
    assert_eq!(registry.len(), 1);
}

#[test]
fn saved_snapshot_is_restored() {
    let mut store = MemoryStore::new();
    let mut registry = Registry::with_defaults();
    registry.set_geometry("button-001", Point::new(115.0, 95.0), Size::new(90.0, 70.0));
    save_registry(&mut store, "p", &registry.snapshot()).unwrap();

    let restored = load_registry(&store, "p");
    let button = restored.get("button-001").unwrap();
    assert_eq!(button.position, Point::new(115.0, 95.0));
    assert_eq!(button.size, Size::new(90.0, 70.0));
}

#[test]
fn projects_do_not_share_snapshots() {
    let mut store = MemoryStore::new();
    save_registry(&mut store, "a", &RegistrySnapshot::default()).unwrap();
    assert!(load_registry(&store, "a").is_empty());
    assert_eq!(load_registry(&store, "b").len(), 1);
}

#[test]
fn corrupt_snapshot_falls_back_to_defaults() {
    let mut store = MemoryStore::new();
    store.save(&snapshot_key("p"), "{not json").unwrap();
    let registry = load_registry(&store, "p");
    assert!(registry.get("button-001").is_some());
}
