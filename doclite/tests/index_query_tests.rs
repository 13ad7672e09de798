#[path = "testutils/mod.rs"]
mod testutils;

use testutils::test_fixture::TestFixture;

use doclite::index::IndexSpec;
use doclite::query::{Filter, FindOptions, QueryPlan, SortOrder};
use doclite::store::{Document, Value};
use std::ops::Bound;
use uuid::Uuid;

fn movie_doc(title: &str, likes_count: i64) -> Document {
    Document::new()
        .with("_id", Uuid::new_v4())
        .with("title", title)
        .with("likes_count", likes_count)
}

#[test]
fn likes_count_range_is_served_by_the_declared_index() {
    let fixture = TestFixture::new();
    let movies = fixture.collection("movies");

    for (title, count) in [("A", 1i64), ("B", 5), ("C", 9), ("D", 20)] {
        movies.insert(movie_doc(title, count)).unwrap();
    }

    let filter = Filter::between("likes_count", 2i64, 10i64);
    let plan = movies.explain(&filter);
    assert_eq!(plan.index_name(), Some("movies_likes_idx"));

    let results = movies.find(&filter, &FindOptions::default());
    let titles: Vec<&str> = results
        .iter()
        .map(|doc| doc.get("title").unwrap().as_string().unwrap())
        .collect();
    assert_eq!(titles, vec!["B", "C"]);
}

#[test]
fn title_equality_is_served_by_the_collated_index() {
    let fixture = TestFixture::new();
    let movies = fixture.collection("movies");
    movies.insert(movie_doc("Matrix", 3)).unwrap();

    let filter = Filter::eq("title", "MATRIX");
    assert_eq!(movies.explain(&filter).index_name(), Some("movies_title_idx"));

    // A collated index serves lookups under its collation
    let results = movies.find(&filter, &FindOptions::default());
    assert_eq!(results.len(), 1);
}

#[test]
fn compound_index_serves_id_plus_likes_count() {
    let fixture = TestFixture::new();
    let movies = fixture.collection("movies");

    let id = Uuid::new_v4();
    movies
        .insert(
            Document::new()
                .with("_id", id)
                .with("title", "Matrix")
                .with("likes_count", 7i64),
        )
        .unwrap();

    let filter = Filter::and(vec![
        Filter::eq("_id", id),
        Filter::range(
            "likes_count",
            Bound::Included(Value::Integer(5)),
            Bound::Unbounded,
        ),
    ]);
    let plan = movies.explain(&filter);
    assert_eq!(plan.index_name(), Some("movies_id_likes"));

    assert_eq!(movies.find(&filter, &FindOptions::default()).len(), 1);
}

#[test]
fn unindexed_fields_fall_back_to_collection_scan() {
    let fixture = TestFixture::new();
    let movies = fixture.collection("movies");
    movies.insert(movie_doc("Matrix", 0)).unwrap();

    let plan = movies.explain(&Filter::eq("director", "Wachowski"));
    assert_eq!(plan, QueryPlan::CollectionScan);
}

#[test]
fn multikey_likes_index_finds_users_by_reference() {
    let fixture = TestFixture::new();
    let users = fixture.collection("users");

    let movie = Uuid::new_v4();
    let other = Uuid::new_v4();
    users
        .insert(
            Document::new()
                .with("_id", Uuid::new_v4())
                .with("username", "alice")
                .with("likes", vec![Value::Uuid(movie), Value::Uuid(other)]),
        )
        .unwrap();
    users
        .insert(
            Document::new()
                .with("_id", Uuid::new_v4())
                .with("username", "bob")
                .with("likes", vec![Value::Uuid(other)]),
        )
        .unwrap();

    let filter = Filter::eq("likes", movie);
    assert_eq!(users.explain(&filter).index_name(), Some("users_likes_idx"));

    let results = users.find(&filter, &FindOptions::default());
    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].get("username").unwrap().as_string(),
        Some("alice")
    );
}

#[test]
fn index_scan_deduplicates_multikey_matches() {
    let fixture = TestFixture::new();
    let users = fixture.collection("users");

    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    users
        .insert(
            Document::new()
                .with("_id", Uuid::new_v4())
                .with("username", "carol")
                .with("likes", vec![Value::Uuid(a), Value::Uuid(b)]),
        )
        .unwrap();

    // Both array elements fall inside an unbounded scan of the index;
    // the document must still come back once
    let filter = Filter::range("likes", Bound::Unbounded, Bound::Unbounded);
    let results = users.find(&filter, &FindOptions::default());
    assert_eq!(results.len(), 1);
}

#[test]
fn sort_and_limit_apply_after_the_scan() {
    let fixture = TestFixture::new();
    let movies = fixture.collection("movies");

    for (title, count) in [("A", 3i64), ("B", 1), ("C", 2)] {
        movies.insert(movie_doc(title, count)).unwrap();
    }

    let options = FindOptions {
        sort: Some(("likes_count".to_string(), SortOrder::Descending)),
        limit: Some(2),
    };
    let results = movies.find(&Filter::All, &options);
    let titles: Vec<&str> = results
        .iter()
        .map(|doc| doc.get("title").unwrap().as_string().unwrap())
        .collect();
    assert_eq!(titles, vec!["A", "C"]);
}

#[test]
fn creating_a_unique_index_over_violating_data_fails_and_installs_nothing() {
    let fixture = TestFixture::empty();
    let ratings = fixture.store().create_collection("ratings");

    for value in [5i64, 5] {
        ratings
            .insert(Document::new().with("_id", Uuid::new_v4()).with("stars", value))
            .unwrap();
    }

    let err = ratings
        .create_index(IndexSpec::on("ratings_stars_idx", "stars").unique())
        .expect_err("duplicate data must fail the build");
    assert!(err.is_duplicate());
    assert!(!ratings.has_index("ratings_stars_idx"));

    // A non-unique index over the same data is fine
    assert!(ratings
        .create_index(IndexSpec::on("ratings_stars_nonunique", "stars"))
        .unwrap());
}
