//! Repository Integration Tests
//!
//! Tests for ListRepository with in-memory SQLite and map backends.

use std::collections::BTreeSet;

use crate::domain::{DomainError, Entity, FoodType, GroceryItem, SelectionSet, StoreConfig};
use crate::repository::{
    KeyValueStore, ListRepository, MemoryKvStore, SqliteKvStore, ITEMS_KEY, SELECTION_KEY,
    STORE_LABELS_KEY,
};

fn setup_test_db() -> ListRepository<SqliteKvStore> {
    let kv = SqliteKvStore::open_in_memory().expect("Failed to init test DB");
    ListRepository::new(kv)
}

fn item(name: &str, stores: &[&str]) -> GroceryItem {
    GroceryItem::new(
        name,
        FoodType::default(),
        stores.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
    )
}

#[test]
fn test_empty_database_loads_defaults() {
    let repo = setup_test_db();
    assert!(repo.load_items().is_empty());
    assert!(repo.load_selection().is_empty());
    assert_eq!(repo.load_store_config(), StoreConfig::default());
    assert!(repo.try_load_items().unwrap().is_none());
}

#[test]
fn test_save_and_load_items() {
    let mut repo = setup_test_db();
    let items = vec![item("Banana", &["Aldi"]), item("apple", &["Target"])];

    repo.save_items(&items).expect("Failed to save");

    assert_eq!(repo.load_items(), items);
}

#[test]
fn test_save_and_load_selection() {
    let mut repo = setup_test_db();
    let items = vec![item("Banana", &[]), item("apple", &[])];
    let selection: SelectionSet = items.iter().map(Entity::id).collect();

    repo.save_selection(&selection).unwrap();

    assert_eq!(repo.load_selection(), selection);
}

#[test]
fn test_save_and_load_store_labels() {
    let mut repo = setup_test_db();
    let config = StoreConfig::new(["Aldi", "", "Target", "", ""].map(String::from));

    repo.save_store_config(&config).unwrap();

    assert_eq!(repo.load_store_config(), config);
    let raw = repo.backend().get(STORE_LABELS_KEY).unwrap().unwrap();
    assert_eq!(raw, br#"["Aldi","","Target","",""]"#.to_vec());
}

#[test]
fn test_corrupt_values_fall_back_to_defaults() {
    let kv = MemoryKvStore::new()
        .with_entry(ITEMS_KEY, "{ broken")
        .with_entry(SELECTION_KEY, "[1, 2]")
        .with_entry(STORE_LABELS_KEY, r#"["only", "three", "labels"]"#);
    let repo = ListRepository::new(kv);

    assert!(repo.load_items().is_empty());
    assert!(repo.load_selection().is_empty());
    assert_eq!(repo.load_store_config(), StoreConfig::default());

    assert!(matches!(
        repo.try_load_items(),
        Err(DomainError::Serialization { ref key, .. }) if key == ITEMS_KEY
    ));
}

#[test]
fn test_one_corrupt_aggregate_does_not_affect_others() {
    let mut repo = ListRepository::new(MemoryKvStore::new());
    let items = vec![item("Eggs", &[])];
    repo.save_items(&items).unwrap();
    repo.backend_mut().set(SELECTION_KEY, b"garbage").unwrap();

    assert_eq!(repo.load_items(), items);
    assert!(repo.load_selection().is_empty());
}

#[test]
fn test_later_save_overwrites() {
    let mut repo = setup_test_db();
    repo.save_items(&[item("Old", &[])]).unwrap();
    let newer = vec![item("New", &[])];
    repo.save_items(&newer).unwrap();
    assert_eq!(repo.load_items(), newer);
}
