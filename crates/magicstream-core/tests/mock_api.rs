//! Mock server tests for the Magic Stream client library.
//!
//! These tests use wiremock to simulate the API server and exercise the
//! cookie-based login flow, the session store, and the credential renewal
//! pipeline without network access or real credentials.

use magicstream_core::{ApiClient, ApiError, AuthedClient, Session, SessionStore};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Session descriptor body as the server returns it from login and renewal.
fn user_body(credential: &str) -> serde_json::Value {
    json!({
        "user_id": "u1",
        "first_name": "Ann",
        "last_name": "Example",
        "email": "ann@example.com",
        "role": "USER",
        "token": credential,
        "refresh_token": "r1",
        "favourite_genres": [{"genre_id": 18, "genre_name": "Drama"}]
    })
}

fn session_with_credential(credential: &str) -> Session {
    Session::from_user(serde_json::from_value(user_body(credential)).unwrap())
}

/// Hydrated store + clients pointed at the mock server. The tempdir must
/// stay alive as long as the store does.
fn harness(server: &MockServer) -> (tempfile::TempDir, SessionStore, AuthedClient) {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().to_path_buf());
    store.hydrate();
    let api = ApiClient::new(&server.uri()).unwrap();
    let authed = AuthedClient::new(api, store.clone());
    (dir, store, authed)
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_sets_cookie_used_by_later_requests() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({
            "email": "ann@example.com",
            "password": "secret123"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(user_body("c1"))
                .append_header("set-cookie", "access_token=cookie-a1; Path=/; HttpOnly"),
        )
        .mount(&server)
        .await;

    // The protected endpoint only answers when the login cookie arrives
    Mock::given(method("GET"))
        .and(path("/recommendedMovies"))
        .and(header("cookie", "access_token=cookie-a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    // Login client and authed client must share one cookie store, exactly
    // as the app wires them.
    let _dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(_dir.path().to_path_buf());
    store.hydrate();
    let api = ApiClient::new(&server.uri()).unwrap();
    let authed = AuthedClient::new(api.clone(), store.clone());

    let user = api.login("ann@example.com", "secret123").await.unwrap();
    store.set(Some(Session::from_user(user)));

    let movies = authed.fetch_recommended().await.unwrap();
    assert!(movies.is_empty());
    assert_eq!(store.current().unwrap().credential, "c1");
}

#[tokio::test]
async fn test_login_rejected_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "invalid email or password"
        })))
        .mount(&server)
        .await;

    let api = ApiClient::new(&server.uri()).unwrap();
    let result = api.login("ann@example.com", "wrong").await;
    assert!(matches!(result, Err(ApiError::Unauthorized)));
}

#[tokio::test]
async fn test_register_conflict_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": "email already registered"
        })))
        .mount(&server)
        .await;

    let api = ApiClient::new(&server.uri()).unwrap();
    let request = magicstream_core::models::RegisterRequest {
        first_name: "Ann".to_string(),
        last_name: "Example".to_string(),
        email: "ann@example.com".to_string(),
        password: "secret123".to_string(),
        role: magicstream_core::models::Role::User,
        favourite_genres: vec![],
    };
    let result = api.register(&request).await;
    assert!(matches!(result, Err(ApiError::Conflict(msg)) if msg == "email already registered"));
}

// ============================================================================
// Credential renewal pipeline
// ============================================================================

#[tokio::test]
async fn test_expired_session_renews_once_and_retries_once() {
    let server = MockServer::start().await;

    // First catalog call hits the expired credential
    Mock::given(method("GET"))
        .and(path("/recommendedMovies"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "token expired"
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    // Renewal rotates the cookies and returns a fresh descriptor
    Mock::given(method("POST"))
        .and(path("/user/refresh-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(user_body("c2"))
                .append_header("set-cookie", "access_token=cookie-a2; Path=/; HttpOnly"),
        )
        .expect(1)
        .mount(&server)
        .await;

    // The single retry succeeds
    Mock::given(method("GET"))
        .and(path("/recommendedMovies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "imdb_id": "tt0111161",
            "title": "The Shawshank Redemption"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, store, authed) = harness(&server);
    store.set(Some(session_with_credential("c1")));

    let movies = authed.fetch_recommended().await.unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].imdb_id, "tt0111161");

    // The store observed the renewal through its single write path
    assert_eq!(store.current().unwrap().credential, "c2");
}

#[tokio::test]
async fn test_renewal_with_message_only_body_keeps_session_and_retries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recommendedMovies"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "token expired"
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    // The production server rotates the cookies and answers with a plain
    // message envelope, no session descriptor
    Mock::given(method("POST"))
        .and(path("/user/refresh-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "Tokens refreshed"}))
                .append_header("set-cookie", "access_token=cookie-a2; Path=/; HttpOnly"),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/recommendedMovies"))
        .and(header("cookie", "access_token=cookie-a2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, store, authed) = harness(&server);
    store.set(Some(session_with_credential("c1")));

    let movies = authed.fetch_recommended().await.unwrap();
    assert!(movies.is_empty());

    // No descriptor in the renewal answer: the stored identity stays put
    assert_eq!(store.current().unwrap().credential, "c1");
}

#[tokio::test]
async fn test_renewal_failure_signs_out_and_surfaces_original_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recommendedMovies"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "token expired"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/user/refresh-token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "refresh token expired"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (dir, store, authed) = harness(&server);
    store.set(Some(session_with_credential("c1")));
    assert!(dir.path().join("user.json").exists());

    let result = authed.fetch_recommended().await;
    assert!(matches!(result, Err(ApiError::Unauthorized)));

    // Forced logout: memory and snapshot both cleared
    assert!(store.current().is_none());
    assert!(!dir.path().join("user.json").exists());
}

#[tokio::test]
async fn test_second_rejection_after_renewal_is_a_hard_failure() {
    let server = MockServer::start().await;

    // Both the original request and the single retry are rejected
    Mock::given(method("GET"))
        .and(path("/movie/tt0111161"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "token expired"
        })))
        .expect(2)
        .mount(&server)
        .await;

    // Renewal itself succeeds, and must happen exactly once
    Mock::given(method("POST"))
        .and(path("/user/refresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body("c2")))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, store, authed) = harness(&server);
    store.set(Some(session_with_credential("c1")));

    let result = authed.fetch_movie("tt0111161").await;
    assert!(matches!(result, Err(ApiError::Unauthorized)));

    // The renewed session stays; only a failed renewal forces sign-out
    assert_eq!(store.current().unwrap().credential, "c2");
}

#[tokio::test]
async fn test_anonymous_401_passes_through_without_renewal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movie/tt0111161"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "authorization required"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/user/refresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body("c2")))
        .expect(0)
        .mount(&server)
        .await;

    let (_dir, store, authed) = harness(&server);
    assert!(store.current().is_none());

    let result = authed.fetch_movie("tt0111161").await;
    assert!(matches!(result, Err(ApiError::Unauthorized)));
}

#[tokio::test]
async fn test_non_auth_errors_are_not_interpreted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recommendedMovies"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "database unavailable"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/user/refresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body("c2")))
        .expect(0)
        .mount(&server)
        .await;

    let (_dir, store, authed) = harness(&server);
    store.set(Some(session_with_credential("c1")));

    let result = authed.fetch_recommended().await;
    assert!(matches!(result, Err(ApiError::ServerError(msg)) if msg == "database unavailable"));
    // Session untouched
    assert_eq!(store.current().unwrap().credential, "c1");
}

// ============================================================================
// Protected writes
// ============================================================================

#[tokio::test]
async fn test_admin_review_update_renews_expired_session() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/movie/tt0111161/review"))
        .and(body_json(json!({"admin_review": "A timeless story of hope."})))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "token expired"
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/user/refresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body("c2")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/movie/tt0111161/review"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ranking_name": "Must Watch",
            "admin_review": "A timeless story of hope."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, store, authed) = harness(&server);
    store.set(Some(session_with_credential("c1")));

    let outcome = authed
        .update_admin_review("tt0111161", "A timeless story of hope.")
        .await
        .unwrap();
    assert_eq!(outcome.ranking_name, "Must Watch");
    assert_eq!(store.current().unwrap().credential, "c2");
}
