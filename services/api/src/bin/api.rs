//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{FixtureContactParser, JsonStoreAdapter, SimulatedDialer, TemplateScriptAdapter},
    config::Config,
    error::ApiError,
    web::{self, rest::ApiDoc, state::AppState, state::DraftRegistry},
};
use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Open the Record Store ---
    info!("Opening record store at {}...", config.store_path.display());
    let store = Arc::new(JsonStoreAdapter::open(&config.store_path).await?);

    // --- 3. Initialize Service Adapters ---
    let contacts = Arc::new(FixtureContactParser);
    let dialer = Arc::new(SimulatedDialer::new(Duration::from_millis(
        config.dial_delay_ms,
    )));
    let scripts = Arc::new(TemplateScriptAdapter);

    // --- 4. Build the Shared AppState ---
    let shutdown = CancellationToken::new();
    let app_state = Arc::new(AppState {
        store,
        contacts,
        dialer,
        scripts,
        config: config.clone(),
        drafts: Arc::new(DraftRegistry::default()),
        shutdown: shutdown.clone(),
    });

    let cors_origin = config.cors_origin.parse::<HeaderValue>().map_err(|e| {
        ApiError::Internal(format!(
            "Invalid CORS_ORIGIN '{}': {}",
            config.cors_origin, e
        ))
    })?;
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // --- 5. Create the Web Router ---
    let api_router = web::api_router(app_state).layer(cors);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for the shutdown signal: {}", e);
            }
            info!("Shutdown signal received; cancelling in-flight work.");
            shutdown.cancel();
        })
        .await?;

    Ok(())
}
