//! services/api/src/web/analytics.rs
//!
//! Read-only reporting over the stored campaigns. The numbers come straight
//! from the core aggregator; nothing here is computed ahead of time or cached.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use callhub_core::stats;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::web::middleware::AuthContext;
use crate::web::port_error_response;
use crate::web::state::AppState;

/// No call durations are recorded anywhere; the dashboard shows this fixed
/// placeholder instead.
const AVG_CALL_DURATION: &str = "2:34";

#[derive(Deserialize)]
pub struct AnalyticsQuery {
    pub campaign_id: Option<Uuid>,
    /// Accepted for parity with the dashboard's range selector; no
    /// time-windowing is applied.
    #[allow(dead_code)]
    pub range: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct SummaryView {
    pub total_calls: u64,
    pub successful_calls: u64,
    pub total_contacts: u64,
    pub active_campaigns: usize,
    pub success_rate: u32,
    pub avg_call_duration: String,
}

/// GET /analytics - Summary counters, optionally narrowed to one campaign
#[utoipa::path(
    get,
    path = "/analytics",
    params(
        ("campaign_id" = Option<Uuid>, Query, description = "Narrow the summary to one campaign"),
        ("range" = Option<String>, Query, description = "Ignored; the range selector is decorative")
    ),
    responses(
        (status = 200, description = "Aggregated campaign metrics", body = SummaryView),
        (status = 401, description = "Not logged in"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn summary_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<SummaryView>, (StatusCode, String)> {
    let campaigns = state
        .store
        .list_campaigns(auth.user_id)
        .await
        .map_err(|e| {
            error!("Failed to load campaigns for analytics: {:?}", e);
            port_error_response(e)
        })?;

    let summary = stats::summarize(&campaigns, query.campaign_id);
    Ok(Json(SummaryView {
        total_calls: summary.total_calls,
        successful_calls: summary.successful_calls,
        total_contacts: summary.total_contacts,
        active_campaigns: summary.active_campaigns,
        success_rate: summary.success_rate,
        avg_call_duration: AVG_CALL_DURATION.to_string(),
    }))
}

/// POST /analytics/export - Report export stub
#[utoipa::path(
    post,
    path = "/analytics/export",
    responses(
        (status = 501, description = "Report export is not implemented"),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn export_report_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_IMPLEMENTED,
        "Report export is not implemented yet".to_string(),
    )
}
