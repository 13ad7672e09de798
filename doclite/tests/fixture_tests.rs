#[path = "testutils/mod.rs"]
mod testutils;

use testutils::test_fixture::TestFixture;

use doclite::query::Filter;
use doclite::store::Value;
use doclite::ugc::{load_sample_data, LikeService, RatingsService, UgcError};
use uuid::uuid;

#[test]
fn sample_data_loads_the_expected_counts() {
    let (fixture, report) = TestFixture::with_sample_data();

    assert_eq!(report.users, 3);
    assert_eq!(report.movies, 3);
    assert_eq!(report.likes, 4);
    assert_eq!(report.bookmarks, 3);
    assert_eq!(report.comments, 2);

    assert_eq!(fixture.collection("likes").len(), 4);
    assert_eq!(fixture.collection("bookmarks").len(), 3);
    assert_eq!(fixture.collection("comments").len(), 2);
}

#[test]
fn reloading_fixtures_fails_with_a_duplicate_error() {
    let (fixture, _) = TestFixture::with_sample_data();

    let err = load_sample_data(fixture.store()).expect_err("re-load must not silently skip");
    assert!(matches!(err, UgcError::Duplicate(_)), "{}", err);
}

#[test]
fn fixture_likes_keep_counters_consistent_with_references() {
    let (fixture, _) = TestFixture::with_sample_data();
    let ratings = RatingsService::new(fixture.store()).unwrap();

    // Every movie's counter equals the number of users referencing it
    let movies = fixture.collection("movies").scan();
    for doc in movies {
        let id = doc.get("_id").unwrap().as_uuid().unwrap();
        let count = doc.get("likes_count").unwrap().as_integer().unwrap();
        let fans = ratings.users_who_like(id).unwrap();
        assert_eq!(fans.len() as i64, count, "movie {} counter drifted", id);
    }

    // Inception is liked by both fixture users who rated it
    let inception = uuid!("c9d4c530-7657-4ca3-bc8d-0b888e65000b");
    assert_eq!(ratings.get_movie(inception).unwrap().likes_count, 2);
}

#[test]
fn fixture_rates_stay_in_range_and_average() {
    let (fixture, _) = TestFixture::with_sample_data();
    let likes = LikeService::new(fixture.store()).unwrap();

    let inception = uuid!("c9d4c530-7657-4ca3-bc8d-0b888e65000b");
    // Rates 10 and 5 from the fixture set
    assert_eq!(likes.average_rate(inception).unwrap(), Some(7.5));
}

#[test]
fn fixture_comments_are_searchable() {
    let (fixture, _) = TestFixture::with_sample_data();

    let comments = fixture.collection("comments");
    let matching = comments.find(
        &Filter::eq(
            "_id",
            Value::Uuid(uuid!("12d4c8f9-82a1-4d61-b964-5298d9f321b3")),
        ),
        &Default::default(),
    );
    assert_eq!(matching.len(), 1);
    assert_eq!(
        matching[0].get("text").unwrap().as_string(),
        Some("your state proud of words")
    );
}
