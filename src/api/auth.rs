//! Auth Routes
//!
//! Routes:
//! - POST /auth/signup - Create an account and return an access token
//! - POST /auth/login - Exchange credentials for an access token

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::{AppState, Result};

/// Build auth routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Bearer token issued on signup and login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

impl TokenResponse {
    fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer",
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Register a new account.
///
/// POST /auth/signup
///
/// Returns 409 if the email is already registered.
#[axum::debug_handler]
async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<TokenResponse>> {
    let token = state
        .auth
        .signup(&request.email, &request.password, &request.name)
        .await?;

    Ok(Json(TokenResponse::bearer(token)))
}

/// Log in with email and password.
///
/// POST /auth/login
///
/// Returns 401 with the same body for an unknown email and a wrong password.
#[axum::debug_handler]
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    let token = state.auth.login(&request.email, &request.password).await?;

    Ok(Json(TokenResponse::bearer(token)))
}
