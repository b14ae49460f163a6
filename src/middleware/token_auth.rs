//! Bearer token authentication middleware.
//!
//! Reads `Authorization: Bearer {token}`, resolves it to a user through the
//! auth service and injects [`AuthUser`] into request extensions. Handlers
//! behind this layer take the identity with `Extension<AuthUser>`.

use axum::{
    body::Body,
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::models::User;
use crate::{error::Error, AppState};

/// Identity of the caller, resolved once per request.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: String,
    pub email: String,
    pub name: String,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        AuthUser {
            user_id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

/// Extract the token from an `Authorization: Bearer {token}` header.
///
/// The scheme name is matched case-insensitively.
fn bearer_token(req: &Request<Body>) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim_start().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Middleware that requires a valid bearer token.
///
/// # Errors
///
/// Returns 401 Unauthorized if the header is missing, the token does not
/// validate, or its user no longer exists.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, middleware};
/// use notevault::middleware::require_auth;
///
/// let app = Router::new()
///     .route("/notes", get(list_notes))
///     .layer(middleware::from_fn_with_state(state.clone(), require_auth));
/// ```
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Error> {
    let Some(token) = bearer_token(&req) else {
        debug!("Missing bearer token");
        return Err(Error::Unauthenticated);
    };

    let user = state.auth.resolve(token).await?;
    req.extensions_mut().insert(AuthUser::from(user));

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn request(header: Option<&str>) -> Request<Body> {
        let mut builder = axum::http::Request::builder().uri("/notes");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[rstest]
    #[case::canonical("Bearer abc.def.ghi")]
    #[case::lowercase("bearer abc.def.ghi")]
    #[case::uppercase("BEARER abc.def.ghi")]
    fn test_bearer_token_extracted(#[case] header: &str) {
        let req = request(Some(header));
        assert_eq!(bearer_token(&req), Some("abc.def.ghi"));
    }

    #[rstest]
    #[case::missing(None)]
    #[case::empty(Some("Bearer "))]
    #[case::wrong_scheme(Some("Basic dXNlcjpwYXNz"))]
    #[case::no_scheme(Some("abc.def.ghi"))]
    fn test_bearer_token_rejected(#[case] header: Option<&str>) {
        assert_eq!(bearer_token(&request(header)), None);
    }
}
