//! services/api/src/web/account.rs
//!
//! Profile and preference endpoints for the logged-in user.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use callhub_core::domain::{Language, Settings, User, UserProfile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::web::middleware::AuthContext;
use crate::web::port_error_response;
use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Serialize, ToSchema)]
pub struct ProfileView {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for ProfileView {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            company: user.company.clone(),
            role: user.role.clone(),
            created_at: user.created_at,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SettingsView {
    pub language: String,
    pub notifications: bool,
    pub email_updates: bool,
    pub sms_alerts: bool,
}

impl From<&Settings> for SettingsView {
    fn from(settings: &Settings) -> Self {
        Self {
            language: settings.language.to_string(),
            notifications: settings.notifications,
            email_updates: settings.email_updates,
            sms_alerts: settings.sms_alerts,
        }
    }
}

//=========================================================================================
// Handlers
//=========================================================================================

/// GET /account/profile - The caller's profile
#[utoipa::path(
    get,
    path = "/account/profile",
    responses(
        (status = 200, description = "Profile", body = ProfileView),
        (status = 401, description = "Not logged in"),
        (status = 404, description = "User record is gone")
    )
)]
pub async fn get_profile_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<ProfileView>, (StatusCode, String)> {
    let user = state
        .store
        .get_user(auth.user_id)
        .await
        .map_err(port_error_response)?;
    Ok(Json(ProfileView::from(&user)))
}

/// PUT /account/profile - Update the caller's profile
#[utoipa::path(
    put,
    path = "/account/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileView),
        (status = 401, description = "Not logged in"),
        (status = 404, description = "User record is gone")
    )
)]
pub async fn update_profile_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileView>, (StatusCode, String)> {
    let profile = UserProfile {
        name: req.name,
        email: req.email,
        phone: req.phone,
        company: req.company,
    };
    let user = state
        .store
        .update_profile(auth.user_id, profile)
        .await
        .map_err(|e| {
            error!("Failed to update profile: {:?}", e);
            port_error_response(e)
        })?;
    Ok(Json(ProfileView::from(&user)))
}

/// GET /account/settings - The caller's preferences (defaults until saved)
#[utoipa::path(
    get,
    path = "/account/settings",
    responses(
        (status = 200, description = "Preferences", body = SettingsView),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn get_settings_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<SettingsView>, (StatusCode, String)> {
    let settings = state
        .store
        .get_settings(auth.user_id)
        .await
        .map_err(port_error_response)?;
    Ok(Json(SettingsView::from(&settings)))
}

/// PUT /account/settings - Replace the caller's preferences
#[utoipa::path(
    put,
    path = "/account/settings",
    request_body = SettingsView,
    responses(
        (status = 200, description = "Saved preferences", body = SettingsView),
        (status = 400, description = "Unrecognized language"),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn update_settings_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<SettingsView>,
) -> Result<Json<SettingsView>, (StatusCode, String)> {
    let language = req.language.parse::<Language>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            format!("'{}' is not a valid language", req.language),
        )
    })?;
    let settings = Settings {
        language,
        notifications: req.notifications,
        email_updates: req.email_updates,
        sms_alerts: req.sms_alerts,
    };
    let saved = state
        .store
        .update_settings(auth.user_id, settings)
        .await
        .map_err(|e| {
            error!("Failed to save settings: {:?}", e);
            port_error_response(e)
        })?;
    Ok(Json(SettingsView::from(&saved)))
}

/// POST /account/api-keys - API key generation stub
#[utoipa::path(
    post,
    path = "/account/api-keys",
    responses(
        (status = 501, description = "API key management is not implemented"),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn create_api_key_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_IMPLEMENTED,
        "API key management is not implemented yet".to_string(),
    )
}
