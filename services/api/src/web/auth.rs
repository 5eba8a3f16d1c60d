//! services/api/src/web/auth.rs
//!
//! Authentication endpoints for account registration, login, and logout.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use callhub_core::domain::UserProfile;
use callhub_core::ports::PortError;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::web::middleware::session_id_from_cookies;
use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct AuthResponse {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
}

fn session_cookie(session_id: &str, max_age_secs: i64) -> String {
    format!(
        "session={}; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age={}",
        session_id, max_age_secs
    )
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /auth/register - Create a new account
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created and logged in", body = AuthResponse),
        (status = 400, description = "Password confirmation does not match"),
        (status = 409, description = "An account with this email already exists"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    // 1. Reject a mismatched confirmation before anything is stored
    if req.password != req.confirm_password {
        return Err((
            StatusCode::BAD_REQUEST,
            "Passwords do not match".to_string(),
        ));
    }

    // 2. Hash the password
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| {
            error!("Failed to hash password: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to hash password".to_string(),
            )
        })?
        .to_string();

    // 3. Create the user in the record store
    let profile = UserProfile {
        name: req.name,
        email: req.email,
        phone: req.phone,
        company: req.company,
    };
    let user = state
        .store
        .create_user(profile, &password_hash)
        .await
        .map_err(|e| match e {
            PortError::Conflict(_) => (
                StatusCode::CONFLICT,
                "An account with this email already exists".to_string(),
            ),
            other => {
                error!("Failed to create user: {:?}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to create user".to_string(),
                )
            }
        })?;

    // 4. Registration doubles as login: create the auth session right away
    let auth_session_id = Uuid::new_v4().to_string();
    let ttl = Duration::days(state.config.session_ttl_days);
    let expires_at = Utc::now() + ttl;

    state
        .store
        .create_auth_session(&auth_session_id, user.id, expires_at)
        .await
        .map_err(|e| {
            error!("Failed to create auth session: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create session".to_string(),
            )
        })?;

    let cookie = session_cookie(&auth_session_id, ttl.num_seconds());
    let response = AuthResponse {
        user_id: user.id,
        name: user.name,
        email: user.email,
    };

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(response),
    ))
}

/// POST /auth/login - Login with an existing account
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    // 1. Get user by email. Unknown email and wrong password produce the
    //    same response.
    let creds = state.store.get_user_by_email(&req.email).await.map_err(|_| {
        (
            StatusCode::UNAUTHORIZED,
            "Invalid email or password".to_string(),
        )
    })?;

    // 2. Verify password
    let parsed_hash = PasswordHash::new(&creds.password_hash).map_err(|e| {
        error!("Failed to parse password hash: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Authentication error".to_string(),
        )
    })?;

    let valid = Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .is_ok();

    if !valid {
        return Err((
            StatusCode::UNAUTHORIZED,
            "Invalid email or password".to_string(),
        ));
    }

    // 3. Create the auth session
    let auth_session_id = Uuid::new_v4().to_string();
    let ttl = Duration::days(state.config.session_ttl_days);
    let expires_at = Utc::now() + ttl;

    state
        .store
        .create_auth_session(&auth_session_id, creds.user_id, expires_at)
        .await
        .map_err(|e| {
            error!("Failed to create auth session: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create session".to_string(),
            )
        })?;

    // 4. Look the user back up for the response body
    let user = state.store.get_user(creds.user_id).await.map_err(|e| {
        error!("Failed to load user after login: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Authentication error".to_string(),
        )
    })?;

    let cookie = session_cookie(&auth_session_id, ttl.num_seconds());
    let response = AuthResponse {
        user_id: user.id,
        name: user.name,
        email: user.email,
    };

    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)], Json(response)))
}

/// POST /auth/logout - Logout and invalidate the session
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Logout successful"),
        (status = 401, description = "No active session")
    )
)]
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    headers: axum::http::HeaderMap,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    // 1. Extract the session cookie
    let cookie_header = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .ok_or((StatusCode::UNAUTHORIZED, "No session found".to_string()))?;

    let auth_session_id = session_id_from_cookies(cookie_header)
        .ok_or((StatusCode::UNAUTHORIZED, "No session found".to_string()))?;

    // 2. Delete the session unconditionally and drop any draft it was building
    state
        .store
        .delete_auth_session(auth_session_id)
        .await
        .map_err(|e| {
            error!("Failed to delete auth session: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to logout".to_string(),
            )
        })?;
    state.drafts.discard(auth_session_id).await;

    // 3. Clear the cookie
    let cookie = "session=; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age=0";

    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie.to_string())]))
}
