//! End-to-end behaviour of the file-backed favorites store.

mod common;

use std::fs;

use common::init_tracing;
use favorites::{Config, Envelope, Favorite, FavoriteError, FavoritesStore, ItemType};
use serde_json::Value;
use tempfile::TempDir;

fn setup_store() -> (TempDir, FavoritesStore) {
    init_tracing();
    let tmp = TempDir::new().expect("failed to create temp dir");
    let store = FavoritesStore::open(tmp.path().join("local_db.json")).unwrap();
    (tmp, store)
}

fn find(favorites: &[Favorite], kind: ItemType, id: u64) -> Option<&Favorite> {
    favorites
        .iter()
        .find(|f| f.item_type() == kind && f.item_id() == id)
}

#[test]
fn complete_workflow() {
    let (_tmp, store) = setup_store();

    store.add("person", 1, "Luke").unwrap().unwrap();
    store.add("planet", 1, "Tatooine").unwrap().unwrap();
    store.add("starship", 9, "Death Star").unwrap().unwrap();
    assert_eq!(store.list(None).unwrap().count, 3);

    store
        .update_notes("person", 1, "Luke - Jedi Master")
        .unwrap()
        .unwrap();
    let listing = store.list(None).unwrap();
    let luke = find(&listing.favorites, ItemType::Person, 1).unwrap();
    assert_eq!(luke.notes(), "Luke - Jedi Master");
    assert!(luke.updated_at().is_some());

    store.remove("person", 1).unwrap().unwrap();
    assert_eq!(store.list(None).unwrap().count, 2);
    assert_eq!(store.search("Jedi").unwrap().count, 0);
}

#[test]
fn repeated_adds_never_duplicate() {
    let (_tmp, store) = setup_store();

    for round in 0..3 {
        for kind in ItemType::ALL {
            for id in 1..=4 {
                let result = store.add(kind.as_str(), id, "again").unwrap();
                if round == 0 {
                    assert!(result.is_ok());
                } else {
                    assert_eq!(
                        result.unwrap_err(),
                        FavoriteError::DuplicateEntry {
                            item_type: kind.to_string(),
                            item_id: id
                        }
                    );
                }
            }
        }
    }

    let favorites = store.list(None).unwrap().favorites;
    assert_eq!(favorites.len(), 16);
    for (i, a) in favorites.iter().enumerate() {
        for b in &favorites[i + 1..] {
            assert!((a.item_type(), a.item_id()) != (b.item_type(), b.item_id()));
        }
    }
}

#[test]
fn envelopes_have_uniform_shape() {
    let (_tmp, store) = setup_store();

    let added = Envelope::from(store.add("film", 1, "A New Hope").unwrap());
    let value = serde_json::to_value(&added).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["favorite"]["type"], "film");

    let rejected = Envelope::from(store.add("film", 1, "again").unwrap());
    assert!(rejected.is_error());
    let value = serde_json::to_value(&rejected).unwrap();
    assert_eq!(value["error"], "Already exists");
    assert_eq!(value["message"], "Film with ID 1 is already in favorites");

    let invalid = Envelope::from(store.add("vehicle", 4, "").unwrap());
    let value = serde_json::to_value(&invalid).unwrap();
    assert_eq!(value["error"], "Invalid item type");

    let missing = Envelope::from(store.remove("planet", 42).unwrap());
    let value = serde_json::to_value(&missing).unwrap();
    assert_eq!(value["error"], "Not found");
    assert_eq!(value["message"], "Planet with ID 42 not found in favorites");

    let listing: Envelope<_> = Envelope::Success(store.list(Some("film")).unwrap());
    let json = listing.to_json().unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["count"], 1);
    assert_eq!(value["favorites"][0]["notes"], "A New Hope");

    let results: Envelope<_> = Envelope::Success(store.search("hope").unwrap());
    let value = serde_json::to_value(&results).unwrap();
    assert_eq!(value["query"], "hope");
    assert_eq!(value["count"], 1);
    assert_eq!(value["matches"][0]["id"], 1);
}

#[test]
fn corruption_is_recovered_silently() {
    let (_tmp, store) = setup_store();
    store.add("person", 1, "Luke").unwrap().unwrap();

    fs::write(store.path(), "{ invalid json }").unwrap();

    assert_eq!(store.list(None).unwrap().count, 0);
    assert_eq!(store.search("").unwrap().count, 0);
}

#[test]
fn reads_documents_written_by_earlier_versions() {
    let (_tmp, store) = setup_store();
    fs::write(
        store.path(),
        r#"{
  "favorites": [
    {
      "type": "person",
      "id": 1,
      "notes": "Luke",
      "added_at": "2024-05-04T10:15:30.123456"
    },
    {
      "type": "planet",
      "id": 1,
      "notes": "Tatooine",
      "added_at": "2024-05-04T10:16:00.000001",
      "updated_at": "2024-05-05T09:00:00.5"
    }
  ]
}"#,
    )
    .unwrap();

    let listing = store.list(None).unwrap();
    assert_eq!(listing.count, 2);
    assert!(listing.favorites[1].updated_at().is_some());

    store.add("person", 1, "dup").unwrap().unwrap_err();
    store.update_notes("person", 1, "Luke Skywalker").unwrap().unwrap();

    let on_disk: Value = serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(on_disk["favorites"][0]["notes"], "Luke Skywalker");
    assert_eq!(on_disk["favorites"][1]["notes"], "Tatooine");
}

#[test]
fn store_opens_from_config() {
    init_tracing();
    let tmp = TempDir::new().unwrap();
    let mut config = Config::default();
    config.set_database("favorites/mine.json");

    let store = FavoritesStore::from_config(&config, tmp.path()).unwrap();
    store.add("starship", 10, "Millennium Falcon").unwrap().unwrap();

    let reopened = FavoritesStore::open(tmp.path().join("favorites").join("mine.json")).unwrap();
    assert!(reopened.contains("starship", 10).unwrap());
}

#[test]
fn clear_is_total() {
    let (_tmp, store) = setup_store();
    for id in 1..=10 {
        store.add("person", id, "clone").unwrap().unwrap();
    }

    store.clear_all().unwrap();

    assert_eq!(store.list(None).unwrap().count, 0);
    assert_eq!(store.list(Some("person")).unwrap().count, 0);
    assert!(store.add("person", 1, "fresh").unwrap().is_ok());
}
