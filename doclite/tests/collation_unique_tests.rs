#[path = "testutils/mod.rs"]
mod testutils;

use testutils::test_fixture::TestFixture;

use doclite::store::Document;
use uuid::Uuid;

fn movie_doc(title: &str) -> Document {
    Document::new()
        .with("_id", Uuid::new_v4())
        .with("title", title)
        .with("likes_count", 0i64)
}

fn user_doc(username: &str) -> Document {
    Document::new()
        .with("_id", Uuid::new_v4())
        .with("username", username)
        .with("likes", Vec::<doclite::Value>::new())
}

#[test]
fn movie_titles_collide_case_insensitively() {
    let fixture = TestFixture::new();
    let movies = fixture.collection("movies");

    movies
        .insert(movie_doc("Matrix"))
        .expect("first title should insert");

    let err = movies
        .insert(movie_doc("matrix"))
        .expect_err("collation-insensitive collision must fail");
    assert!(err.is_duplicate(), "unexpected error: {}", err);

    movies
        .insert(movie_doc("Matrix 2"))
        .expect("distinct title should insert");
    assert_eq!(movies.len(), 2);
}

#[test]
fn usernames_collide_case_insensitively() {
    let fixture = TestFixture::new();
    let users = fixture.collection("users");

    users.insert(user_doc("Alice")).expect("Alice inserts");
    let err = users
        .insert(user_doc("alice"))
        .expect_err("alice collides with Alice");
    assert!(err.is_duplicate());
}

#[test]
fn accented_titles_collide_under_strength_two() {
    let fixture = TestFixture::new();
    let movies = fixture.collection("movies");

    movies.insert(movie_doc("Amélie")).expect("Amélie inserts");
    let err = movies
        .insert(movie_doc("amelie"))
        .expect_err("accent-insensitive collision must fail");
    assert!(err.is_duplicate());
}

#[test]
fn failed_insert_leaves_collection_unchanged() {
    let fixture = TestFixture::new();
    let movies = fixture.collection("movies");

    movies.insert(movie_doc("Matrix")).unwrap();
    let before = movies.len();

    movies.insert(movie_doc("MATRIX")).unwrap_err();
    assert_eq!(movies.len(), before);
}

#[test]
fn reinserting_an_existing_id_fails() {
    let fixture = TestFixture::new();
    let likes = fixture.collection("likes");

    let id = Uuid::new_v4();
    let doc = Document::new()
        .with("_id", id)
        .with("user_id", Uuid::new_v4())
        .with("content_id", Uuid::new_v4());
    likes.insert(doc.clone()).expect("fresh _id inserts");

    let err = likes.insert(doc).expect_err("same _id must fail");
    assert!(err.is_duplicate());
    assert!(err.to_string().contains("_id_"), "{}", err);
}

#[test]
fn unique_pair_allows_same_user_on_different_content() {
    let fixture = TestFixture::new();
    let likes = fixture.collection("likes");

    let user = Uuid::new_v4();
    let content_a = Uuid::new_v4();
    let content_b = Uuid::new_v4();

    let like = |content: Uuid| {
        Document::new()
            .with("_id", Uuid::new_v4())
            .with("user_id", user)
            .with("content_id", content)
    };

    likes.insert(like(content_a)).expect("first pair inserts");
    likes.insert(like(content_b)).expect("different content inserts");
    let err = likes
        .insert(like(content_a))
        .expect_err("repeated (user, content) pair must fail");
    assert!(err.to_string().contains("likes_user_content_idx"), "{}", err);
}
