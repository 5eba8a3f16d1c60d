//! services/api/src/web/rest.rs
//!
//! The master definition for the OpenAPI specification.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::auth::register_handler,
        crate::web::auth::login_handler,
        crate::web::auth::logout_handler,
        crate::web::campaigns::get_draft_handler,
        crate::web::campaigns::update_draft_handler,
        crate::web::campaigns::upload_contacts_handler,
        crate::web::campaigns::generate_script_handler,
        crate::web::campaigns::save_campaign_handler,
        crate::web::campaigns::launch_campaign_handler,
        crate::web::campaigns::list_campaigns_handler,
        crate::web::campaigns::get_campaign_handler,
        crate::web::analytics::summary_handler,
        crate::web::analytics::export_report_handler,
        crate::web::account::get_profile_handler,
        crate::web::account::update_profile_handler,
        crate::web::account::get_settings_handler,
        crate::web::account::update_settings_handler,
        crate::web::account::create_api_key_handler,
    ),
    components(schemas(
        crate::web::auth::RegisterRequest,
        crate::web::auth::LoginRequest,
        crate::web::auth::AuthResponse,
        crate::web::campaigns::ContactView,
        crate::web::campaigns::DraftView,
        crate::web::campaigns::UpdateDraftRequest,
        crate::web::campaigns::CampaignView,
        crate::web::analytics::SummaryView,
        crate::web::account::ProfileView,
        crate::web::account::UpdateProfileRequest,
        crate::web::account::SettingsView,
    )),
    tags(
        (name = "CallHub API", description = "API endpoints for the AI call automation dashboard.")
    )
)]
pub struct ApiDoc;
