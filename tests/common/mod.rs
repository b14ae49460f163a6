//! Common test utilities and helpers.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use axum_test::TestServer;
use jsonwebtoken::Algorithm;
use notevault::api;
use notevault::config::{
    AuthConfig, Config, DatabaseConfig, LogFormat, LoggingConfig, NotesConfig, PasswordConfig,
    ServerConfig, SharingConfig,
};
use notevault::db::{self, SqliteStore};
use notevault::AppState;
use serde_json::{json, Value};

pub const TEST_SECRET: &str = "integration-test-secret";
#[allow(dead_code)]
pub const SHARE_BASE: &str = "http://notes.test";

/// Configuration with cheap password hashing and a fixed signing secret.
pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            path: ":memory:".to_string(),
        },
        auth: AuthConfig {
            jwt_secret: TEST_SECRET.to_string(),
            jwt_algorithm: Algorithm::HS256,
            token_ttl_minutes: 30,
            password: PasswordConfig {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            },
        },
        notes: NotesConfig::default(),
        sharing: SharingConfig {
            base_url: SHARE_BASE.to_string(),
        },
        logging: LoggingConfig {
            format: LogFormat::Pretty,
        },
    }
}

/// Build the full router over a fresh in-memory database.
pub async fn build_test_app() -> TestServer {
    let pool = db::init_pool(":memory:")
        .await
        .expect("Failed to create test database");
    db::initialize_schema(&pool)
        .await
        .expect("Failed to initialize schema");

    let state = AppState::from_parts(Arc::new(SqliteStore::new(pool)), &test_config())
        .expect("Failed to build app state");

    let app = Router::new()
        .merge(api::routes(state.clone()))
        .with_state(state);

    TestServer::new(app).expect("Failed to create test server")
}

/// Helper function to create a Bearer Authorization header value
pub fn bearer_auth(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
}

/// Sign up a user and return its access token.
pub async fn signup(server: &TestServer, email: &str) -> String {
    let response = server
        .post("/auth/signup")
        .json(&json!({
            "email": email,
            "password": "correct horse",
            "name": "Test User"
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    body["access_token"]
        .as_str()
        .expect("signup returned no token")
        .to_string()
}

/// Create a note and return its id.
#[allow(dead_code)]
pub async fn create_note(server: &TestServer, token: &str, title: &str) -> String {
    let response = server
        .post("/notes")
        .add_header(axum::http::header::AUTHORIZATION, bearer_auth(token))
        .json(&json!({
            "title": title,
            "content": "body",
            "tags": ["t"]
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    let body: Value = response.json();
    body["_id"].as_str().expect("create returned no id").to_string()
}

/// Last path segment of a share URL.
#[allow(dead_code)]
pub fn share_token(share_url: &str) -> &str {
    share_url.rsplit('/').next().unwrap_or_default()
}
