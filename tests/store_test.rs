use coleccion::management::{FileStore, KeyValueStore, MemoryStore};
use tempfile::tempdir;

#[tokio::test]
async fn test_file_store_missing_file_reads_as_empty() {
    let dir = tempdir().unwrap();
    let store = FileStore::new(dir.path().join("store.json"));

    assert_eq!(store.get("spotify_access_token").await.unwrap(), None);
    // Removing from a missing file is not an error
    store.remove("spotify_access_token").await.unwrap();
}

#[tokio::test]
async fn test_file_store_survives_new_instance() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested/coleccion/store.json");

    let store = FileStore::new(path.clone());
    store.set("spotify_access_token", "abc").await.unwrap();
    store.set("spotify_token_expires", "1700000000000").await.unwrap();
    assert!(path.is_file());

    let reopened = FileStore::new(path);
    assert_eq!(
        reopened.get("spotify_access_token").await.unwrap().as_deref(),
        Some("abc")
    );
    assert_eq!(
        reopened.get("spotify_token_expires").await.unwrap().as_deref(),
        Some("1700000000000")
    );
}

#[tokio::test]
async fn test_file_store_remove_keeps_other_keys() {
    let dir = tempdir().unwrap();
    let store = FileStore::new(dir.path().join("store.json"));

    store.set("a", "1").await.unwrap();
    store.set("b", "2").await.unwrap();
    store.remove("a").await.unwrap();

    assert_eq!(store.get("a").await.unwrap(), None);
    assert_eq!(store.get("b").await.unwrap().as_deref(), Some("2"));
}

#[tokio::test]
async fn test_file_store_reports_corrupt_content() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, "not json").unwrap();

    let store = FileStore::new(path);
    assert!(store.get("a").await.is_err());
}

#[tokio::test]
async fn test_memory_store() {
    let store = MemoryStore::new();
    assert!(store.is_empty());

    store.set("a", "1").await.unwrap();
    store.set("a", "2").await.unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("a").await.unwrap().as_deref(), Some("2"));

    store.remove("a").await.unwrap();
    assert!(store.is_empty());
}
