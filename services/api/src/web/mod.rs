pub mod account;
pub mod analytics;
pub mod auth;
pub mod campaigns;
pub mod middleware;
pub mod rest;
pub mod state;

pub use middleware::require_auth;
pub use rest::ApiDoc;

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware as axum_middleware;
use axum::routing::{get, post};
use axum::Router;
use callhub_core::ports::PortError;
use state::AppState;
use std::sync::Arc;

/// Maps a port failure onto the transient response the client sees. Details
/// of unexpected failures stay in the logs, not in the response body.
pub(crate) fn port_error_response(e: PortError) -> (StatusCode, String) {
    match e {
        PortError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        PortError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        PortError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
        PortError::Cancelled => (
            StatusCode::SERVICE_UNAVAILABLE,
            "Server is shutting down".to_string(),
        ),
        PortError::Unexpected(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "An internal error occurred".to_string(),
        ),
    }
}

/// Builds the API router: public auth routes plus the cookie-protected
/// application surface. The Swagger UI and the CORS layer are attached by the
/// server binary so tests can drive this router directly.
pub fn api_router(state: Arc<AppState>) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/auth/register", post(auth::register_handler))
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/logout", post(auth::logout_handler));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route(
            "/campaigns/draft",
            get(campaigns::get_draft_handler).put(campaigns::update_draft_handler),
        )
        .route(
            "/campaigns/draft/advance",
            post(campaigns::advance_draft_handler),
        )
        .route("/campaigns/draft/back", post(campaigns::back_draft_handler))
        .route(
            "/campaigns/draft/contacts",
            post(campaigns::upload_contacts_handler),
        )
        .route(
            "/campaigns/draft/script",
            post(campaigns::generate_script_handler),
        )
        .route(
            "/campaigns",
            post(campaigns::save_campaign_handler).get(campaigns::list_campaigns_handler),
        )
        .route("/campaigns/launch", post(campaigns::launch_campaign_handler))
        .route("/campaigns/{id}", get(campaigns::get_campaign_handler))
        .route("/analytics", get(analytics::summary_handler))
        .route("/analytics/export", post(analytics::export_report_handler))
        .route(
            "/account/profile",
            get(account::get_profile_handler).put(account::update_profile_handler),
        )
        .route(
            "/account/settings",
            get(account::get_settings_handler).put(account::update_settings_handler),
        )
        .route("/account/api-keys", post(account::create_api_key_handler))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .with_state(state)
}
