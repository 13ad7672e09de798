#[path = "testutils/mod.rs"]
mod testutils;

use testutils::test_fixture::TestFixture;

use doclite::catalog::{bootstrap, SchemaCatalog};
use doclite::index::IndexSpec;
use doclite::profiler::ProfilingLevel;
use doclite::store::{Collation, Document, Store};
use uuid::Uuid;

#[test]
fn bootstrap_creates_declared_collections_and_indexes() {
    let store = Store::new();
    let report = bootstrap(&store, &SchemaCatalog::movies_platform())
        .expect("bootstrap should succeed on an empty store");

    assert_eq!(
        store.list_collections(),
        vec!["bookmarks", "comments", "likes", "movies", "users"]
    );
    assert_eq!(report.collections_created.len(), 5);
    assert!(report.indexes_existing.is_empty());

    let movies = store.collection("movies").unwrap();
    assert!(movies.has_index("movies_title_idx"));
    assert!(movies.has_index("movies_likes_idx"));
    assert!(movies.has_index("movies_id_likes"));

    let users = store.collection("users").unwrap();
    assert!(users.has_index("users_username_idx"));
    assert!(users.has_index("users_likes_idx"));
}

#[test]
fn bootstrap_is_idempotent() {
    let store = Store::new();
    let catalog = SchemaCatalog::movies_platform();
    bootstrap(&store, &catalog).expect("first bootstrap should succeed");

    let report = bootstrap(&store, &catalog).expect("re-running bootstrap should succeed");
    assert!(report.collections_created.is_empty());
    assert!(report.indexes_created.is_empty());
    assert_eq!(report.indexes_existing.len(), 8);
}

#[test]
fn bootstrap_sets_slow_only_profiling_at_50ms() {
    let fixture = TestFixture::new();
    let stats = fixture.store().profiler_stats();
    assert_eq!(stats.level, ProfilingLevel::SlowOnly);
    assert_eq!(stats.slow_threshold_ms, 50);
}

#[test]
fn conflicting_index_redeclaration_is_an_error() {
    let fixture = TestFixture::new();

    // Same name, different definition: not unique, no collation
    let conflicting = IndexSpec::on("users_username_idx", "username");
    let err = fixture
        .collection("users")
        .create_index(conflicting)
        .unwrap_err();
    assert!(err.to_string().contains("different definition"), "{}", err);
}

#[test]
fn bootstrap_surfaces_uniqueness_violations_in_existing_data() {
    let store = Store::new();
    let users = store.create_collection("users");
    users
        .insert(
            Document::new()
                .with("_id", Uuid::new_v4())
                .with("username", "Alice"),
        )
        .unwrap();
    users
        .insert(
            Document::new()
                .with("_id", Uuid::new_v4())
                .with("username", "alice"),
        )
        .unwrap();

    let err = bootstrap(&store, &SchemaCatalog::movies_platform())
        .expect_err("bootstrap over duplicate usernames must fail");
    assert!(err.is_duplicate(), "unexpected error: {}", err);

    // The failed unique index must not have been installed
    assert!(!store
        .collection("users")
        .unwrap()
        .has_index("users_username_idx"));
}

#[test]
fn catalog_round_trips_through_json() {
    let catalog = SchemaCatalog::movies_platform();
    let json = serde_json::to_string(&catalog).expect("catalog serializes");
    let restored: SchemaCatalog = serde_json::from_str(&json).expect("catalog deserializes");

    assert_eq!(restored.collections.len(), catalog.collections.len());
    let users = restored
        .collections
        .iter()
        .find(|c| c.name == "users")
        .unwrap();
    let username = users
        .indexes
        .iter()
        .find(|i| i.name == "users_username_idx")
        .unwrap();
    assert_eq!(username.collation, Some(Collation::en_secondary()));
}
