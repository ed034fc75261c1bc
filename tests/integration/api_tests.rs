//! API integration tests

use axum::http::StatusCode;
use serde_json::json;

use crate::common::TestApp;

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::empty();

    let (status, body) = app.get("/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = app.get("/api/v1/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_root_redirects_to_docs() {
    let app = TestApp::empty();

    let (status, _) = app.get("/").await;
    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn test_register_then_login() {
    let app = TestApp::empty();

    let (status, body) = app
        .post_json("/api/v1/auth/register", json!({"username": "alice", "password": "secret1"}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().expect("No user ID");

    let (status, body) = app
        .post_json("/api/v1/auth/login", json!({"username": "alice", "password": "secret1"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"].as_i64(), Some(id));
    assert_eq!(body["username"], "alice");
    assert!(body.get("password").is_none());

    let (status, body) = app
        .post_json("/api/v1/auth/login", json!({"username": "alice", "password": "wrong"}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");

    let (status, _) = app
        .post_json("/api/v1/auth/login", json!({"username": "bob", "password": "secret1"}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::empty();
    let creds = json!({"username": "alice", "password": "secret1"});

    let (status, _) = app.post_json("/api/v1/auth/register", creds.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .post_json("/api/v1/auth/register", json!({"username": "alice", "password": "other-pass"}))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Username already exists");

    // The original password still works, the rejected one does not
    let (status, _) = app.post_json("/api/v1/auth/login", creds).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .post_json("/api/v1/auth/login", json!({"username": "alice", "password": "other-pass"}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_validation() {
    let app = TestApp::empty();

    let (status, body) = app
        .post_json("/api/v1/auth/register", json!({"username": "alice"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "All fields are required");

    let (status, body) = app
        .post_json("/api/v1/auth/register", json!({"username": "al", "password": "secret1"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Username must be at least 3 characters long");

    let (status, body) = app
        .post_json("/api/v1/auth/register", json!({"username": "alice", "password": "short"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Password must be at least 6 characters long");

    // Nothing was persisted by the failed attempts
    let (status, _) = app
        .post_json("/api/v1/auth/register", json!({"username": "alice", "password": "secret1"}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_register_both_fields_too_short() {
    let app = TestApp::empty();

    let (status, body) = app
        .post_json("/api/v1/auth/register", json!({"username": "al", "password": "short"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Password must be at least 6 characters long");
}

#[tokio::test]
async fn test_malformed_bodies_get_json_errors() {
    let app = TestApp::empty();
    let creds = r#"{"username": "alice", "password": "secret1"}"#;

    for uri in ["/api/v1/auth/register", "/api/v1/auth/login"] {
        let (status, body) = app.post_text(uri, creds).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri={}", uri);
        assert_eq!(body["code"], 4);
        assert_eq!(body["message"], "Expected a JSON request body");
    }

    let (status, body) = app
        .post_json("/api/v1/auth/register", json!({"username": 5, "password": "secret1"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
    assert_eq!(body["message"], "Malformed JSON request body");

    // Nothing was registered by the rejected requests
    let (status, _) = app
        .post_json("/api/v1/auth/login", json!({"username": "alice", "password": "secret1"}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_catalog_with_filters() {
    let app = TestApp::seeded().await;

    let (status, body) = app.get("/api/v1/books").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(3));

    let (status, body) = app.get("/api/v1/books?genre=Science").await;
    assert_eq!(status, StatusCode::OK);
    let books = body.as_array().expect("array");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], "Book 3");

    let (_, body) = app.get("/api/v1/books?author=Author%201&year=2020").await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let (_, body) = app.get("/api/v1/books?author=Author%201&year=2018").await;
    assert_eq!(body.as_array().map(Vec::len), Some(0));

    let (_, body) = app.get("/api/v1/books?author=author%201").await;
    assert_eq!(body.as_array().map(Vec::len), Some(0));

    let (status, body) = app.get("/api/v1/books?author=&genre=&year=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_list_catalog_invalid_year() {
    let app = TestApp::seeded().await;

    for year in ["1499", "abc", "99999"] {
        let (status, body) = app.get(&format!("/api/v1/books?year={}", year)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "year={}", year);
        assert_eq!(body["message"], "Invalid year filter");
    }

    let (status, body) = app.get("/api/v1/books?year=2020&year=2021").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 9);
    assert_eq!(body["message"], "Invalid year filter");

    let (status, body) = app.get("/api/v1/books?year=1500").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_seed_is_idempotent() {
    let app = TestApp::seeded().await;
    assert_eq!(app.books.len(), 3);

    let inserted = app.services.catalog.seed_demo_books().await.unwrap();
    assert_eq!(inserted, 0);
    assert_eq!(app.books.len(), 3);
}

#[tokio::test]
async fn test_rent_book_once() {
    let app = TestApp::seeded().await;

    let (status, body) = app.post("/api/v1/books/1/rent").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["action"], "rent");
    assert_eq!(body["message"], "Book rented");
    assert!(!app.books.snapshot(1).unwrap().is_available);

    let (status, body) = app.get("/api/v1/books/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_available"], false);

    let (status, body) = app.post("/api/v1/books/1/rent").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Book is already rented");
}

#[tokio::test]
async fn test_buy_removes_book() {
    let app = TestApp::seeded().await;

    // A rented book can still be bought
    let (status, _) = app.post("/api/v1/books/2/rent").await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = app.post("/api/v1/books/2/buy").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["action"], "buy");
    assert_eq!(body["message"], "Book purchased");
    assert!(app.books.snapshot(2).is_none());

    for action in ["rent", "buy", "dance"] {
        let (status, body) = app.post(&format!("/api/v1/books/2/{}", action)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "action={}", action);
        assert_eq!(body["message"], "Book not found");
    }

    let (_, body) = app.get("/api/v1/books").await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_invalid_action_leaves_book_unchanged() {
    let app = TestApp::seeded().await;
    let before = app.books.snapshot(3).unwrap();

    let (status, body) = app.post("/api/v1/books/3/dance").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid action");

    assert_eq!(app.books.snapshot(3).unwrap(), before);
}

#[tokio::test]
async fn test_unknown_book_ids() {
    let app = TestApp::seeded().await;

    let (status, _) = app.get("/api/v1/books/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.post("/api/v1/books/not-an-id/rent").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Book not found");
}

#[tokio::test]
async fn test_concurrent_rent_has_single_winner() {
    let app = TestApp::seeded().await;
    let catalog = app.services.catalog.clone();

    let attempts: Vec<_> = (0..8)
        .map(|_| {
            let catalog = catalog.clone();
            tokio::spawn(async move { catalog.apply_action(1, "rent").await })
        })
        .collect();

    let mut successes = 0;
    for attempt in attempts {
        if attempt.await.unwrap().is_ok() {
            successes += 1;
        }
    }
    assert_eq!(successes, 1);
}
