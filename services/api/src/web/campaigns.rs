//! services/api/src/web/campaigns.rs
//!
//! The campaign surface: the draft wizard endpoints that accumulate an
//! in-memory draft across the four builder steps, and the endpoints that
//! finalize a draft into the record store, either saved for later or launched
//! through the dial simulator.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use callhub_core::domain::{
    Campaign, CampaignStatus, CampaignType, Contact, DialReport, Language, Tone,
};
use callhub_core::stats;
use callhub_core::wizard::{CampaignDraft, DraftWizard};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::web::middleware::AuthContext;
use crate::web::port_error_response;
use crate::web::state::AppState;

/// What `generate_script` falls back to while no campaign type is chosen.
const GENERIC_SCRIPT: &str = "Hello {name}, thank you for your time.";

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

#[derive(Serialize, ToSchema)]
pub struct ContactView {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl From<&Contact> for ContactView {
    fn from(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            phone: contact.phone.clone(),
            email: contact.email.clone(),
        }
    }
}

/// The wizard as clients see it: current position plus the accumulated draft.
#[derive(Serialize, ToSchema)]
pub struct DraftView {
    pub step: u8,
    pub step_title: String,
    pub name: String,
    #[serde(rename = "type")]
    pub campaign_type: Option<String>,
    pub language: String,
    pub tone: String,
    pub script: String,
    pub schedule: String,
    pub contacts: Vec<ContactView>,
    pub contact_count: usize,
}

impl From<&DraftWizard> for DraftView {
    fn from(wizard: &DraftWizard) -> Self {
        let draft = &wizard.draft;
        Self {
            step: wizard.step().number(),
            step_title: wizard.step().title().to_string(),
            name: draft.name.clone(),
            campaign_type: draft.campaign_type.map(|t| t.to_string()),
            language: draft.language.to_string(),
            tone: draft.tone.to_string(),
            script: draft.script.clone(),
            schedule: draft.schedule.clone(),
            contacts: draft.contacts.iter().map(ContactView::from).collect(),
            contact_count: draft.contacts.len(),
        }
    }
}

/// A partial update; only the supplied fields change.
#[derive(Deserialize, ToSchema)]
pub struct UpdateDraftRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub campaign_type: Option<String>,
    pub language: Option<String>,
    pub tone: Option<String>,
    pub script: Option<String>,
    pub schedule: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct CampaignView {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub campaign_type: String,
    pub language: String,
    pub tone: String,
    pub script: String,
    pub schedule: String,
    pub contacts: u32,
    pub status: String,
    pub calls_made: u32,
    pub successful: u32,
    pub success_rate: u32,
    pub created_at: DateTime<Utc>,
}

impl From<&Campaign> for CampaignView {
    fn from(campaign: &Campaign) -> Self {
        Self {
            id: campaign.id,
            name: campaign.name.clone(),
            campaign_type: campaign.campaign_type.to_string(),
            language: campaign.language.to_string(),
            tone: campaign.tone.to_string(),
            script: campaign.script.clone(),
            schedule: campaign.schedule.clone(),
            contacts: campaign.contact_count,
            status: campaign.status.to_string(),
            calls_made: campaign.calls_made,
            successful: campaign.successful,
            success_rate: stats::campaign_rate(campaign),
            created_at: campaign.created_at,
        }
    }
}

fn parse_wire<T>(field: &str, raw: &str) -> Result<T, (StatusCode, String)>
where
    T: std::str::FromStr,
{
    raw.parse::<T>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            format!("'{}' is not a valid {}", raw, field),
        )
    })
}

fn campaign_from_draft(
    owner: Uuid,
    draft: &CampaignDraft,
    status: CampaignStatus,
    report: DialReport,
) -> Campaign {
    Campaign {
        id: Uuid::new_v4(),
        owner,
        name: draft.name.clone(),
        // validate_for_save ran before this point, so the type is present.
        campaign_type: draft.campaign_type.unwrap_or(CampaignType::Sales),
        language: draft.language,
        tone: draft.tone,
        script: draft.script.clone(),
        schedule: draft.schedule.clone(),
        contact_count: draft.contacts.len() as u32,
        status,
        calls_made: report.calls_made,
        successful: report.successful,
        created_at: Utc::now(),
    }
}

//=========================================================================================
// Draft Wizard Handlers
//=========================================================================================

/// GET /campaigns/draft - The caller's wizard state
#[utoipa::path(
    get,
    path = "/campaigns/draft",
    responses(
        (status = 200, description = "Current draft", body = DraftView),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn get_draft_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Json<DraftView> {
    let wizard = state.drafts.snapshot(&auth.session_id).await;
    Json(DraftView::from(&wizard))
}

/// PUT /campaigns/draft - Update draft fields
#[utoipa::path(
    put,
    path = "/campaigns/draft",
    request_body = UpdateDraftRequest,
    responses(
        (status = 200, description = "Updated draft", body = DraftView),
        (status = 400, description = "Unrecognized type, language, or tone"),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn update_draft_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<UpdateDraftRequest>,
) -> Result<Json<DraftView>, (StatusCode, String)> {
    // Parse everything up front so a bad value changes nothing at all.
    let campaign_type = req
        .campaign_type
        .as_deref()
        .map(|raw| parse_wire::<CampaignType>("campaign type", raw))
        .transpose()?;
    let language = req
        .language
        .as_deref()
        .map(|raw| parse_wire::<Language>("language", raw))
        .transpose()?;
    let tone = req
        .tone
        .as_deref()
        .map(|raw| parse_wire::<Tone>("tone", raw))
        .transpose()?;

    let view = state
        .drafts
        .with_draft(&auth.session_id, |wizard| {
            let draft = &mut wizard.draft;
            if let Some(name) = req.name {
                draft.name = name;
            }
            if let Some(t) = campaign_type {
                draft.campaign_type = Some(t);
            }
            if let Some(l) = language {
                draft.language = l;
            }
            if let Some(t) = tone {
                draft.tone = t;
            }
            if let Some(script) = req.script {
                draft.script = script;
            }
            if let Some(schedule) = req.schedule {
                draft.schedule = schedule;
            }
            DraftView::from(&*wizard)
        })
        .await;
    Ok(Json(view))
}

/// POST /campaigns/draft/advance - One step forward, clamped at Review
pub async fn advance_draft_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Json<DraftView> {
    let view = state
        .drafts
        .with_draft(&auth.session_id, |wizard| {
            wizard.advance();
            DraftView::from(&*wizard)
        })
        .await;
    Json(view)
}

/// POST /campaigns/draft/back - One step back, clamped at Details
pub async fn back_draft_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Json<DraftView> {
    let view = state
        .drafts
        .with_draft(&auth.session_id, |wizard| {
            wizard.back();
            DraftView::from(&*wizard)
        })
        .await;
    Json(view)
}

/// Attach a contact list to the draft by uploading a contact file.
///
/// Accepts a multipart/form-data request with a single file part. The file is
/// handed to the contact-parser port; the shipped adapter substitutes a fixed
/// mock list regardless of content.
#[utoipa::path(
    post,
    path = "/campaigns/draft/contacts",
    request_body(content_type = "multipart/form-data", description = "The contact file to upload."),
    responses(
        (status = 200, description = "Contacts attached to the draft", body = DraftView),
        (status = 400, description = "Multipart form did not include a file"),
        (status = 401, description = "Not logged in"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn upload_contacts_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    mut multipart: Multipart,
) -> Result<Json<DraftView>, (StatusCode, String)> {
    let (file_name, payload) = if let Some(field) = multipart.next_field().await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to read multipart data: {}", e),
        )
    })? {
        let name = field.file_name().unwrap_or("contacts.csv").to_string();
        let data = field.bytes().await.map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to read file bytes: {}", e),
            )
        })?;
        (name, data)
    } else {
        return Err((
            StatusCode::BAD_REQUEST,
            "Multipart form must include a file".to_string(),
        ));
    };

    let contacts = state
        .contacts
        .parse(&file_name, &payload)
        .await
        .map_err(|e| {
            error!("Failed to parse contact file: {:?}", e);
            port_error_response(e)
        })?;

    let view = state
        .drafts
        .with_draft(&auth.session_id, |wizard| {
            wizard.draft.contacts = contacts;
            DraftView::from(&*wizard)
        })
        .await;
    Ok(Json(view))
}

/// POST /campaigns/draft/script - Fill the draft's script from its type
#[utoipa::path(
    post,
    path = "/campaigns/draft/script",
    responses(
        (status = 200, description = "Script written into the draft", body = DraftView),
        (status = 401, description = "Not logged in"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn generate_script_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<DraftView>, (StatusCode, String)> {
    let campaign_type = state
        .drafts
        .snapshot(&auth.session_id)
        .await
        .draft
        .campaign_type;

    // With no type chosen yet the draft gets the generic greeting, matching
    // the builder's behavior rather than failing the request.
    let script = match campaign_type {
        Some(t) => state.scripts.generate(t).await.map_err(|e| {
            error!("Failed to generate script: {:?}", e);
            port_error_response(e)
        })?,
        None => GENERIC_SCRIPT.to_string(),
    };

    let view = state
        .drafts
        .with_draft(&auth.session_id, |wizard| {
            wizard.draft.script = script;
            DraftView::from(&*wizard)
        })
        .await;
    Ok(Json(view))
}

//=========================================================================================
// Campaign Lifecycle Handlers
//=========================================================================================

/// POST /campaigns - Persist the draft with status `draft`
#[utoipa::path(
    post,
    path = "/campaigns",
    responses(
        (status = 201, description = "Draft saved", body = CampaignView),
        (status = 400, description = "Draft is missing its name or type"),
        (status = 401, description = "Not logged in"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn save_campaign_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let wizard = state.drafts.snapshot(&auth.session_id).await;
    wizard
        .draft
        .validate_for_save()
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let campaign = campaign_from_draft(
        auth.user_id,
        &wizard.draft,
        CampaignStatus::Draft,
        DialReport {
            calls_made: 0,
            successful: 0,
        },
    );
    let saved = state
        .store
        .insert_campaign(campaign)
        .await
        .map_err(port_error_response)?;

    info!("Campaign '{}' saved as a draft", saved.name);
    Ok((StatusCode::CREATED, Json(CampaignView::from(&saved))))
}

/// POST /campaigns/launch - Run the draft through the dialer and persist it
#[utoipa::path(
    post,
    path = "/campaigns/launch",
    responses(
        (status = 201, description = "Campaign launched", body = CampaignView),
        (status = 400, description = "Draft is incomplete"),
        (status = 401, description = "Not logged in"),
        (status = 503, description = "Server is shutting down"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn launch_campaign_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let wizard = state.drafts.snapshot(&auth.session_id).await;
    wizard
        .draft
        .validate_for_launch()
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    // The run is tied to the server-wide shutdown token: teardown cancels it
    // rather than letting it complete against a closing store.
    let report = state
        .dialer
        .run_campaign(&wizard.draft.contacts, state.shutdown.child_token())
        .await
        .map_err(|e| {
            error!("Dial run failed: {:?}", e);
            port_error_response(e)
        })?;

    let campaign = campaign_from_draft(auth.user_id, &wizard.draft, CampaignStatus::Active, report);
    let saved = state
        .store
        .insert_campaign(campaign)
        .await
        .map_err(port_error_response)?;

    // The wizard is spent once its campaign is running.
    state.drafts.discard(&auth.session_id).await;

    info!(
        "Campaign '{}' launched: {} calls made, {} successful",
        saved.name, saved.calls_made, saved.successful
    );
    Ok((StatusCode::CREATED, Json(CampaignView::from(&saved))))
}

/// GET /campaigns - The caller's campaigns with per-campaign success rates
#[utoipa::path(
    get,
    path = "/campaigns",
    responses(
        (status = 200, description = "Campaign listing", body = [CampaignView]),
        (status = 401, description = "Not logged in"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_campaigns_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Vec<CampaignView>>, (StatusCode, String)> {
    let campaigns = state
        .store
        .list_campaigns(auth.user_id)
        .await
        .map_err(|e| {
            error!("Failed to list campaigns: {:?}", e);
            port_error_response(e)
        })?;
    Ok(Json(campaigns.iter().map(CampaignView::from).collect()))
}

/// GET /campaigns/{id} - One campaign
#[utoipa::path(
    get,
    path = "/campaigns/{id}",
    params(("id" = Uuid, Path, description = "Campaign id")),
    responses(
        (status = 200, description = "The campaign", body = CampaignView),
        (status = 401, description = "Not logged in"),
        (status = 404, description = "No such campaign"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_campaign_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<CampaignView>, (StatusCode, String)> {
    let campaign = state
        .store
        .get_campaign(auth.user_id, id)
        .await
        .map_err(port_error_response)?;
    Ok(Json(CampaignView::from(&campaign)))
}
