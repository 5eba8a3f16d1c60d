//! crates/callhub_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of specific external implementations. Every
//! collaborator the product pretends to have - persistent storage, a
//! contact-file parser, a telephony dialer, a script generator - is a port
//! here, so a real backend can replace the shipped simulation adapters
//! without touching the handlers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::domain::{
    Campaign, CampaignType, Contact, DialReport, Settings, User, UserCredentials, UserProfile,
};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., storage).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Already exists: {0}")]
    Conflict(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Operation cancelled")]
    Cancelled,
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The injected repository replacing the ambient key-value store of the demo.
///
/// Opened once at startup and shared behind `Arc<dyn RecordStore>`. The
/// contract is deliberately loose: no transactions, no cross-collection
/// integrity (an auth session may outlive its user).
#[async_trait]
pub trait RecordStore: Send + Sync {
    // --- User Management ---
    /// Creates a user. Fails with [`PortError::Conflict`] when a user with
    /// the same email already exists.
    async fn create_user(&self, profile: UserProfile, password_hash: &str) -> PortResult<User>;

    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials>;

    async fn get_user(&self, user_id: Uuid) -> PortResult<User>;

    async fn update_profile(&self, user_id: Uuid, profile: UserProfile) -> PortResult<User>;

    // --- Auth Sessions ---
    async fn create_auth_session(
        &self,
        session_id: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> PortResult<()>;

    async fn validate_auth_session(&self, session_id: &str) -> PortResult<Uuid>;

    /// Deletes a session unconditionally; deleting an unknown session is not
    /// an error.
    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()>;

    // --- Campaigns ---
    async fn insert_campaign(&self, campaign: Campaign) -> PortResult<Campaign>;

    async fn list_campaigns(&self, owner: Uuid) -> PortResult<Vec<Campaign>>;

    async fn get_campaign(&self, owner: Uuid, campaign_id: Uuid) -> PortResult<Campaign>;

    // --- Settings ---
    /// Returns the stored preferences, or the defaults when the user has
    /// never saved any.
    async fn get_settings(&self, user_id: Uuid) -> PortResult<Settings>;

    async fn update_settings(&self, user_id: Uuid, settings: Settings) -> PortResult<Settings>;
}

/// Parses an uploaded contact file (CSV/XLSX/TXT/JSON) into a contact list.
#[async_trait]
pub trait ContactListParser: Send + Sync {
    async fn parse(&self, file_name: &str, payload: &[u8]) -> PortResult<Vec<Contact>>;
}

/// Dispatches a campaign's calls and reports the outcome.
///
/// The run honours the supplied [`CancellationToken`]: an implementation must
/// abandon in-flight work with [`PortError::Cancelled`] once the token fires,
/// so a server teardown never leaves a half-finished run writing state.
#[async_trait]
pub trait CallDispatchService: Send + Sync {
    async fn run_campaign(
        &self,
        contacts: &[Contact],
        cancel: CancellationToken,
    ) -> PortResult<DialReport>;
}

/// Produces a call script for a campaign type.
#[async_trait]
pub trait ScriptGenerationService: Send + Sync {
    async fn generate(&self, campaign_type: CampaignType) -> PortResult<String>;
}
