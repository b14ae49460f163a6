//! Endpoint Security Tests
//!
//! Bearer token enforcement and per-owner isolation across the note routes.

mod common;

use axum::http::{header::AUTHORIZATION, HeaderValue};
use chrono::Duration;
use common::{bearer_auth, build_test_app, create_note, signup, TEST_SECRET};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};

fn forge_token(secret: &str, sub: &str, exp_offset: Duration) -> String {
    let now = chrono::Utc::now();
    encode(
        &Header::default(),
        &json!({"sub": sub, "iat": now.timestamp(), "exp": (now + exp_offset).timestamp()}),
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_notes_require_token() {
    let server = build_test_app().await;

    let response = server.get("/notes").await;

    response.assert_status_unauthorized();
    assert_eq!(
        response.header("www-authenticate"),
        HeaderValue::from_static("Bearer")
    );
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_every_protected_route_rejects_missing_token() {
    let server = build_test_app().await;
    let id = uuid::Uuid::new_v4();

    server.get("/notes").await.assert_status_unauthorized();
    server
        .post("/notes")
        .json(&json!({"title": "T", "content": "C"}))
        .await
        .assert_status_unauthorized();
    server
        .get(&format!("/notes/{}", id))
        .await
        .assert_status_unauthorized();
    server
        .put(&format!("/notes/{}", id))
        .json(&json!({"title": "x"}))
        .await
        .assert_status_unauthorized();
    server
        .delete(&format!("/notes/{}", id))
        .await
        .assert_status_unauthorized();
    server
        .post(&format!("/notes/{}/share", id))
        .json(&json!({}))
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn test_bad_tokens_are_rejected() {
    let server = build_test_app().await;
    let token = signup(&server, "a@x.com").await;

    // Sanity check that a real token passes.
    server
        .get("/notes")
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .await
        .assert_status_ok();

    let user_id = uuid::Uuid::new_v4().to_string();
    let bad_tokens = [
        "garbage".to_string(),
        forge_token("wrong-secret", &user_id, Duration::minutes(5)),
        forge_token(TEST_SECRET, &user_id, Duration::minutes(5)),
        forge_token(TEST_SECRET, "not-a-uuid", Duration::minutes(5)),
    ];

    for bad in bad_tokens {
        server
            .get("/notes")
            .add_header(AUTHORIZATION, bearer_auth(&bad))
            .await
            .assert_status_unauthorized();
    }
}

#[tokio::test]
async fn test_bearer_scheme_is_case_insensitive() {
    let server = build_test_app().await;
    let token = signup(&server, "a@x.com").await;

    server
        .get("/notes")
        .add_header(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("bearer {}", token)).unwrap(),
        )
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let server = build_test_app().await;
    let token = signup(&server, "a@x.com").await;

    // Reuse the real subject with an expiry in the past.
    let payload = token.split('.').nth(1).unwrap();
    let claims: Value = {
        use base64::Engine;
        let raw = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(payload)
            .unwrap();
        serde_json::from_slice(&raw).unwrap()
    };
    let expired = forge_token(
        TEST_SECRET,
        claims["sub"].as_str().unwrap(),
        Duration::seconds(-5),
    );

    server
        .get("/notes")
        .add_header(AUTHORIZATION, bearer_auth(&expired))
        .await
        .assert_status_unauthorized();
}

// ============================================================================
// Isolation Tests
// ============================================================================

#[tokio::test]
async fn test_foreign_notes_are_not_found() {
    let server = build_test_app().await;
    let alice = signup(&server, "alice@x.com").await;
    let bob = signup(&server, "bob@x.com").await;
    let id = create_note(&server, &alice, "Private").await;

    server
        .get(&format!("/notes/{}", id))
        .add_header(AUTHORIZATION, bearer_auth(&bob))
        .await
        .assert_status_not_found();
    server
        .put(&format!("/notes/{}", id))
        .add_header(AUTHORIZATION, bearer_auth(&bob))
        .json(&json!({"title": "hijacked"}))
        .await
        .assert_status_not_found();
    server
        .delete(&format!("/notes/{}", id))
        .add_header(AUTHORIZATION, bearer_auth(&bob))
        .await
        .assert_status_not_found();
    server
        .post(&format!("/notes/{}/share", id))
        .add_header(AUTHORIZATION, bearer_auth(&bob))
        .json(&json!({}))
        .await
        .assert_status_not_found();

    let bob_notes: Value = server
        .get("/notes")
        .add_header(AUTHORIZATION, bearer_auth(&bob))
        .await
        .json();
    assert_eq!(bob_notes, json!([]));

    // Alice's note is untouched.
    let note: Value = server
        .get(&format!("/notes/{}", id))
        .add_header(AUTHORIZATION, bearer_auth(&alice))
        .await
        .json();
    assert_eq!(note["title"], "Private");
    assert_eq!(note["version"], 1);
}

#[tokio::test]
async fn test_malformed_note_id_is_bad_request() {
    let server = build_test_app().await;
    let token = signup(&server, "a@x.com").await;

    let response = server
        .get("/notes/123")
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_deleted_note_share_link_stops_resolving() {
    let server = build_test_app().await;
    let token = signup(&server, "a@x.com").await;
    let id = create_note(&server, &token, "Shared").await;

    let share_url = server
        .post(&format!("/notes/{}/share", id))
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .json(&json!({}))
        .await
        .json::<Value>()["shareUrl"]
        .as_str()
        .unwrap()
        .to_string();
    let share_path = format!("/shared/{}", common::share_token(&share_url));

    server.get(&share_path).await.assert_status_ok();

    server
        .delete(&format!("/notes/{}", id))
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .await
        .assert_status_ok();

    server.get(&share_path).await.assert_status_not_found();
}
