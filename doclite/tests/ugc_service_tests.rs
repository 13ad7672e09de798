#[path = "testutils/mod.rs"]
mod testutils;

use testutils::test_fixture::TestFixture;

use chrono::{TimeZone, Utc};
use doclite::ugc::{
    Bookmark, BookmarkService, Comment, CommentPatch, CommentService, Like, LikePatch,
    LikeService, Movie, RatingsService, UgcError, User,
};
use uuid::Uuid;

fn ts(day: u32, hour: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 1, day, hour, 0, 0).unwrap()
}

#[test]
fn likes_insert_update_delete_round_trip() {
    let fixture = TestFixture::new();
    let service = LikeService::new(fixture.store()).unwrap();

    let like = Like::new(Uuid::new_v4(), Uuid::new_v4(), ts(1, 10), 5).unwrap();
    let id = like.id;
    service.insert(vec![like]).unwrap();

    let updated = service
        .update(LikePatch {
            id,
            rate: Some(9),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(updated.rate, 9);

    let deleted = service.delete(vec![id]).unwrap();
    assert_eq!(deleted, vec![id]);
    assert_eq!(service.count(), 0);
}

#[test]
fn duplicate_user_content_pair_is_rejected() {
    let fixture = TestFixture::new();
    let service = LikeService::new(fixture.store()).unwrap();

    let user = Uuid::new_v4();
    let content = Uuid::new_v4();
    service
        .insert(vec![Like::new(user, content, ts(1, 10), 5).unwrap()])
        .unwrap();

    let err = service
        .insert(vec![Like::new(user, content, ts(2, 10), 10).unwrap()])
        .unwrap_err();
    assert!(matches!(err, UgcError::Duplicate(ref c) if c == "likes"), "{}", err);
}

#[test]
fn deleting_unknown_ids_reports_the_missing_keys() {
    let fixture = TestFixture::new();
    let service = BookmarkService::new(fixture.store()).unwrap();

    let known = Bookmark::new(Uuid::new_v4(), Uuid::new_v4(), ts(1, 10));
    let known_id = known.id;
    service.insert(vec![known]).unwrap();

    let missing = Uuid::new_v4();
    let err = service.delete(vec![known_id, missing]).unwrap_err();
    match err {
        UgcError::NotFoundKeys(keys) => assert_eq!(keys, vec![missing]),
        other => panic!("expected NotFoundKeys, got {}", other),
    }

    // Nothing was deleted
    assert_eq!(service.count(), 1);
}

#[test]
fn reads_by_user_content_and_timerange() {
    let fixture = TestFixture::new();
    let service = LikeService::new(fixture.store()).unwrap();

    let user_a = Uuid::new_v4();
    let user_b = Uuid::new_v4();
    let content = Uuid::new_v4();

    service
        .insert(vec![
            Like::new(user_a, content, ts(1, 10), 5).unwrap(),
            Like::new(user_a, Uuid::new_v4(), ts(2, 10), 10).unwrap(),
            Like::new(user_b, content, ts(3, 10), 10).unwrap(),
        ])
        .unwrap();

    assert_eq!(service.get_by_user(user_a).unwrap().len(), 2);
    assert_eq!(service.get_by_content(content).unwrap().len(), 2);

    let in_range = service.get_by_timerange(ts(2, 0), ts(3, 23)).unwrap();
    assert_eq!(in_range.len(), 2);
}

#[test]
fn average_rate_over_content_likes() {
    let fixture = TestFixture::new();
    let service = LikeService::new(fixture.store()).unwrap();

    let content = Uuid::new_v4();
    assert_eq!(service.average_rate(content).unwrap(), None);

    service
        .insert(vec![
            Like::new(Uuid::new_v4(), content, ts(1, 10), 5).unwrap(),
            Like::new(Uuid::new_v4(), content, ts(1, 11), 10).unwrap(),
        ])
        .unwrap();
    assert_eq!(service.average_rate(content).unwrap(), Some(7.5));
}

#[test]
fn comment_text_search_is_case_insensitive() {
    let fixture = TestFixture::new();
    let service = CommentService::new(fixture.store()).unwrap();

    service
        .insert(vec![
            Comment::new(Uuid::new_v4(), Uuid::new_v4(), ts(1, 10), "Proud words here"),
            Comment::new(Uuid::new_v4(), Uuid::new_v4(), ts(1, 11), "unrelated text"),
        ])
        .unwrap();

    let matches = service.search_text("proud").unwrap();
    assert_eq!(matches.len(), 1);
    assert!(matches[0].text.contains("Proud"));

    // Regex metacharacters in the term are taken literally
    assert!(service.search_text("proud (words").unwrap().is_empty());
}

#[test]
fn comment_patch_updates_text() {
    let fixture = TestFixture::new();
    let service = CommentService::new(fixture.store()).unwrap();

    let comment = Comment::new(Uuid::new_v4(), Uuid::new_v4(), ts(1, 10), "before");
    let id = comment.id;
    service.insert(vec![comment]).unwrap();

    let updated = service
        .update(CommentPatch {
            id,
            text: Some("after".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(updated.text, "after");
    assert_eq!(updated.created_at, ts(1, 10));
}

#[test]
fn register_like_maintains_user_references_and_movie_counter() {
    let fixture = TestFixture::new();
    let ratings = RatingsService::new(fixture.store()).unwrap();

    let user = User::new("alice");
    let movie = Movie::new("Matrix");
    ratings.add_user(&user).unwrap();
    ratings.add_movie(&movie).unwrap();

    assert!(ratings.register_like(user.id, movie.id).unwrap());
    // Registering the same like again changes nothing
    assert!(!ratings.register_like(user.id, movie.id).unwrap());

    let stored_user = ratings.get_user(user.id).unwrap();
    assert_eq!(stored_user.likes, vec![movie.id]);
    assert_eq!(ratings.get_movie(movie.id).unwrap().likes_count, 1);

    let fans = ratings.users_who_like(movie.id).unwrap();
    assert_eq!(fans.len(), 1);
    assert_eq!(fans[0].username, "alice");

    assert!(ratings.unregister_like(user.id, movie.id).unwrap());
    assert_eq!(ratings.get_movie(movie.id).unwrap().likes_count, 0);
    assert!(ratings.get_user(user.id).unwrap().likes.is_empty());
}

#[test]
fn register_like_for_unknown_movie_reports_the_key() {
    let fixture = TestFixture::new();
    let ratings = RatingsService::new(fixture.store()).unwrap();

    let user = User::new("bob");
    ratings.add_user(&user).unwrap();

    let missing = Uuid::new_v4();
    let err = ratings.register_like(user.id, missing).unwrap_err();
    assert!(matches!(err, UgcError::NotFoundKeys(ref keys) if keys == &vec![missing]));
}

#[test]
fn movie_lookup_by_title_uses_the_collation() {
    let fixture = TestFixture::new();
    let ratings = RatingsService::new(fixture.store()).unwrap();

    ratings.add_movie(&Movie::new("Amélie")).unwrap();
    let found = ratings.movie_by_title("AMELIE").unwrap();
    assert_eq!(found.map(|m| m.title), Some("Amélie".to_string()));
}

#[test]
fn movies_with_likes_between_orders_by_counter() {
    let fixture = TestFixture::new();
    let ratings = RatingsService::new(fixture.store()).unwrap();

    let titles = [("A", 3), ("B", 1), ("C", 7)];
    for (title, count) in titles {
        let mut movie = Movie::new(title);
        movie.likes_count = count;
        ratings.add_movie(&movie).unwrap();
    }

    let in_range = ratings.movies_with_likes_between(1, 5).unwrap();
    let titles: Vec<&str> = in_range.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["B", "A"]);
}

#[test]
fn duplicate_username_is_a_domain_error() {
    let fixture = TestFixture::new();
    let ratings = RatingsService::new(fixture.store()).unwrap();

    ratings.add_user(&User::new("Dave")).unwrap();
    let err = ratings.add_user(&User::new("dave")).unwrap_err();
    assert!(matches!(err, UgcError::Duplicate(ref c) if c == "users"), "{}", err);
}
