//! services/api/src/web/middleware.rs
//!
//! Authentication middleware for protecting routes.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

use crate::web::state::AppState;

/// The identity attached to a request once its session cookie validates.
///
/// The session id rides along because campaign drafts are keyed by it, not by
/// the user id: two logins of the same account each get their own wizard.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub session_id: String,
}

/// Extracts the session id from a `Cookie` header value, if present.
pub fn session_id_from_cookies(cookie_header: &str) -> Option<&str> {
    cookie_header.split(';').find_map(|c| {
        let c = c.trim();
        c.strip_prefix("session=")
    })
}

/// Middleware that validates the auth session cookie and extracts the caller.
///
/// If valid, inserts an [`AuthContext`] into request extensions for handlers to use.
/// If invalid or missing, returns 401 Unauthorized.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // 1. Extract cookie header
    let cookie_header = req
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // 2. Parse session ID from cookie
    let auth_session_id =
        session_id_from_cookies(cookie_header).ok_or(StatusCode::UNAUTHORIZED)?;

    // 3. Validate auth session in the record store, get user_id
    let user_id = state
        .store
        .validate_auth_session(auth_session_id)
        .await
        .map_err(|e| {
            error!("Failed to validate auth session: {:?}", e);
            StatusCode::UNAUTHORIZED
        })?;

    // 4. Insert the caller's identity into request extensions
    let auth = AuthContext {
        user_id,
        session_id: auth_session_id.to_string(),
    };
    req.extensions_mut().insert(auth);

    // 5. Continue to the handler
    Ok(next.run(req).await)
}
