//! services/api/src/adapters/store.rs
//!
//! This module contains the record-store adapter, which is the concrete
//! implementation of the `RecordStore` port from the `core` crate. It keeps
//! every collection in a single JSON document on disk: loaded once when the
//! store is opened, rewritten whole on every mutation. In-process access goes
//! through an async `RwLock`; across processes the file is last-writer-wins
//! with no coordination, which is acceptable for disposable demo state.

use async_trait::async_trait;
use callhub_core::domain::{
    Campaign, CampaignStatus, CampaignType, Language, Settings, Tone, User, UserCredentials,
    UserProfile,
};
use callhub_core::ports::{PortError, PortResult, RecordStore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A file-backed adapter that implements the `RecordStore` port.
pub struct JsonStoreAdapter {
    path: PathBuf,
    data: RwLock<StoreData>,
}

impl JsonStoreAdapter {
    /// Opens the store at `path`, loading the existing document or starting
    /// from an empty one when the file does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> PortResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| PortError::Unexpected(e.to_string()))?;
            }
        }

        let data = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| PortError::Unexpected(format!("corrupt store file: {}", e)))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoreData::default(),
            Err(e) => return Err(PortError::Unexpected(e.to_string())),
        };

        info!("Record store opened at {}", path.display());
        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    /// Rewrites the whole document. Must be called with the write lock held
    /// so a concurrent mutation cannot interleave within this process.
    async fn persist(&self, data: &StoreData) -> PortResult<()> {
        let bytes = serde_json::to_vec_pretty(data)
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))
    }
}

//=========================================================================================
// "Impure" Storage Record Structs
//=========================================================================================

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreData {
    #[serde(default)]
    users: Vec<UserRecord>,
    #[serde(default)]
    auth_sessions: Vec<AuthSessionRecord>,
    #[serde(default)]
    campaigns: Vec<CampaignRecord>,
    #[serde(default)]
    settings: Vec<SettingsRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserRecord {
    id: Uuid,
    name: String,
    email: String,
    phone: String,
    company: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl UserRecord {
    fn to_domain(&self) -> User {
        User {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            company: self.company.clone(),
            role: self.role.clone(),
            created_at: self.created_at,
        }
    }

    fn to_credentials(&self) -> UserCredentials {
        UserCredentials {
            user_id: self.id,
            email: self.email.clone(),
            password_hash: self.password_hash.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AuthSessionRecord {
    id: String,
    user_id: Uuid,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CampaignRecord {
    id: Uuid,
    owner: Uuid,
    name: String,
    #[serde(rename = "type")]
    campaign_type: String,
    language: String,
    tone: String,
    script: String,
    schedule: String,
    contacts: u32,
    status: String,
    calls_made: u32,
    successful: u32,
    created_at: DateTime<Utc>,
}

impl CampaignRecord {
    fn from_domain(campaign: &Campaign) -> Self {
        Self {
            id: campaign.id,
            owner: campaign.owner,
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
            created_at: campaign.created_at,
        }
    }

    fn to_domain(&self) -> PortResult<Campaign> {
        Ok(Campaign {
            id: self.id,
            owner: self.owner,
            name: self.name.clone(),
            campaign_type: parse_field::<CampaignType>(self.id, "type", &self.campaign_type)?,
            language: parse_field::<Language>(self.id, "language", &self.language)?,
            tone: parse_field::<Tone>(self.id, "tone", &self.tone)?,
            script: self.script.clone(),
            schedule: self.schedule.clone(),
            contact_count: self.contacts,
            status: parse_field::<CampaignStatus>(self.id, "status", &self.status)?,
            calls_made: self.calls_made,
            successful: self.successful,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SettingsRecord {
    user_id: Uuid,
    language: String,
    notifications: bool,
    email_updates: bool,
    sms_alerts: bool,
}

impl SettingsRecord {
    fn from_domain(user_id: Uuid, settings: &Settings) -> Self {
        Self {
            user_id,
            language: settings.language.to_string(),
            notifications: settings.notifications,
            email_updates: settings.email_updates,
            sms_alerts: settings.sms_alerts,
        }
    }

    fn to_domain(&self) -> PortResult<Settings> {
        Ok(Settings {
            language: parse_field::<Language>(self.user_id, "language", &self.language)?,
            notifications: self.notifications,
            email_updates: self.email_updates,
            sms_alerts: self.sms_alerts,
        })
    }
}

fn parse_field<T>(record_id: Uuid, field: &str, raw: &str) -> PortResult<T>
where
    T: std::str::FromStr,
{
    raw.parse::<T>().map_err(|_| {
        PortError::Unexpected(format!(
            "stored record {} has an unrecognized {}: '{}'",
            record_id, field, raw
        ))
    })
}

//=========================================================================================
// `RecordStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl RecordStore for JsonStoreAdapter {
    async fn create_user(&self, profile: UserProfile, password_hash: &str) -> PortResult<User> {
        let mut data = self.data.write().await;

        if data.users.iter().any(|u| u.email == profile.email) {
            return Err(PortError::Conflict(format!(
                "A user with email {} already exists",
                profile.email
            )));
        }

        let record = UserRecord {
            id: Uuid::new_v4(),
            name: profile.name,
            email: profile.email,
            phone: profile.phone,
            company: profile.company,
            password_hash: password_hash.to_string(),
            role: "user".to_string(),
            created_at: Utc::now(),
        };
        let user = record.to_domain();
        data.users.push(record);
        self.persist(&data).await?;
        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials> {
        let data = self.data.read().await;
        data.users
            .iter()
            .find(|u| u.email == email)
            .map(UserRecord::to_credentials)
            .ok_or_else(|| PortError::NotFound(format!("No user with email {}", email)))
    }

    async fn get_user(&self, user_id: Uuid) -> PortResult<User> {
        let data = self.data.read().await;
        data.users
            .iter()
            .find(|u| u.id == user_id)
            .map(UserRecord::to_domain)
            .ok_or_else(|| PortError::NotFound(format!("User {} not found", user_id)))
    }

    async fn update_profile(&self, user_id: Uuid, profile: UserProfile) -> PortResult<User> {
        let mut data = self.data.write().await;
        let record = data
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| PortError::NotFound(format!("User {} not found", user_id)))?;

        record.name = profile.name;
        record.email = profile.email;
        record.phone = profile.phone;
        record.company = profile.company;
        let user = record.to_domain();

        self.persist(&data).await?;
        Ok(user)
    }

    async fn create_auth_session(
        &self,
        session_id: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> PortResult<()> {
        let mut data = self.data.write().await;
        data.auth_sessions.push(AuthSessionRecord {
            id: session_id.to_string(),
            user_id,
            expires_at,
        });
        self.persist(&data).await
    }

    async fn validate_auth_session(&self, session_id: &str) -> PortResult<Uuid> {
        let data = self.data.read().await;
        let session = data
            .auth_sessions
            .iter()
            .find(|s| s.id == session_id)
            .ok_or(PortError::Unauthorized)?;

        if session.expires_at < Utc::now() {
            return Err(PortError::Unauthorized);
        }
        Ok(session.user_id)
    }

    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()> {
        let mut data = self.data.write().await;
        data.auth_sessions.retain(|s| s.id != session_id);
        self.persist(&data).await
    }

    async fn insert_campaign(&self, campaign: Campaign) -> PortResult<Campaign> {
        let mut data = self.data.write().await;
        data.campaigns.push(CampaignRecord::from_domain(&campaign));
        self.persist(&data).await?;
        Ok(campaign)
    }

    async fn list_campaigns(&self, owner: Uuid) -> PortResult<Vec<Campaign>> {
        let data = self.data.read().await;
        data.campaigns
            .iter()
            .filter(|c| c.owner == owner)
            .map(CampaignRecord::to_domain)
            .collect()
    }

    async fn get_campaign(&self, owner: Uuid, campaign_id: Uuid) -> PortResult<Campaign> {
        let data = self.data.read().await;
        data.campaigns
            .iter()
            .find(|c| c.owner == owner && c.id == campaign_id)
            .ok_or_else(|| PortError::NotFound(format!("Campaign {} not found", campaign_id)))?
            .to_domain()
    }

    async fn get_settings(&self, user_id: Uuid) -> PortResult<Settings> {
        let data = self.data.read().await;
        match data.settings.iter().find(|s| s.user_id == user_id) {
            Some(record) => record.to_domain(),
            None => Ok(Settings::default()),
        }
    }

    async fn update_settings(&self, user_id: Uuid, settings: Settings) -> PortResult<Settings> {
        let mut data = self.data.write().await;
        let record = SettingsRecord::from_domain(user_id, &settings);
        match data.settings.iter().position(|s| s.user_id == user_id) {
            Some(index) => data.settings[index] = record,
            None => data.settings.push(record),
        }
        self.persist(&data).await?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use callhub_core::domain::DialReport;
    use chrono::Duration;

    fn profile(email: &str) -> UserProfile {
        UserProfile {
            name: "Asha Rao".to_string(),
            email: email.to_string(),
            phone: "+919876543210".to_string(),
            company: "Acme Widgets".to_string(),
        }
    }

    fn campaign(owner: Uuid, report: DialReport) -> Campaign {
        Campaign {
            id: Uuid::new_v4(),
            owner,
            name: "Diwali sale".to_string(),
            campaign_type: CampaignType::Sales,
            language: Language::Hinglish,
            tone: Tone::Friendly,
            script: "Hello {name}".to_string(),
            schedule: "immediate".to_string(),
            contact_count: 3,
            status: CampaignStatus::Active,
            calls_made: report.calls_made,
            successful: report.successful,
            created_at: Utc::now(),
        }
    }

    async fn open_store(dir: &tempfile::TempDir) -> JsonStoreAdapter {
        JsonStoreAdapter::open(dir.path().join("store.json"))
            .await
            .expect("store should open")
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        store.create_user(profile("asha@example.com"), "hash").await.unwrap();
        let err = store
            .create_user(profile("asha@example.com"), "other-hash")
            .await
            .unwrap_err();
        assert!(matches!(err, PortError::Conflict(_)));
    }

    #[tokio::test]
    async fn credentials_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        let user = store.create_user(profile("asha@example.com"), "hash").await.unwrap();
        let creds = store.get_user_by_email("asha@example.com").await.unwrap();
        assert_eq!(creds.user_id, user.id);
        assert_eq!(creds.password_hash, "hash");

        let missing = store.get_user_by_email("nobody@example.com").await;
        assert!(matches!(missing, Err(PortError::NotFound(_))));
    }

    #[tokio::test]
    async fn auth_sessions_validate_and_expire() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;
        let user_id = Uuid::new_v4();

        store
            .create_auth_session("live", user_id, Utc::now() + Duration::days(1))
            .await
            .unwrap();
        store
            .create_auth_session("stale", user_id, Utc::now() - Duration::minutes(1))
            .await
            .unwrap();

        assert_eq!(store.validate_auth_session("live").await.unwrap(), user_id);
        assert!(matches!(
            store.validate_auth_session("stale").await,
            Err(PortError::Unauthorized)
        ));
        assert!(matches!(
            store.validate_auth_session("unknown").await,
            Err(PortError::Unauthorized)
        ));

        store.delete_auth_session("live").await.unwrap();
        assert!(store.validate_auth_session("live").await.is_err());
        // Deleting a session that is already gone is still fine.
        store.delete_auth_session("live").await.unwrap();
    }

    #[tokio::test]
    async fn campaigns_are_scoped_to_their_owner() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let mine = store
            .insert_campaign(campaign(alice, DialReport { calls_made: 2, successful: 1 }))
            .await
            .unwrap();
        store
            .insert_campaign(campaign(bob, DialReport { calls_made: 1, successful: 0 }))
            .await
            .unwrap();

        let listed = store.list_campaigns(alice).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, mine.id);

        assert!(store.get_campaign(alice, mine.id).await.is_ok());
        assert!(matches!(
            store.get_campaign(bob, mine.id).await,
            Err(PortError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn settings_default_until_saved() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;
        let user_id = Uuid::new_v4();

        assert_eq!(store.get_settings(user_id).await.unwrap(), Settings::default());

        let custom = Settings {
            language: Language::Hindi,
            notifications: false,
            email_updates: true,
            sms_alerts: true,
        };
        store.update_settings(user_id, custom.clone()).await.unwrap();
        assert_eq!(store.get_settings(user_id).await.unwrap(), custom);
    }

    #[tokio::test]
    async fn data_survives_a_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let user = {
            let store = JsonStoreAdapter::open(&path).await.unwrap();
            let user = store.create_user(profile("asha@example.com"), "hash").await.unwrap();
            store
                .insert_campaign(campaign(user.id, DialReport { calls_made: 2, successful: 2 }))
                .await
                .unwrap();
            user
        };

        let reopened = JsonStoreAdapter::open(&path).await.unwrap();
        assert_eq!(reopened.get_user(user.id).await.unwrap().email, user.email);
        assert_eq!(reopened.list_campaigns(user.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn profile_update_rewrites_the_stored_user() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        let user = store.create_user(profile("asha@example.com"), "hash").await.unwrap();
        let updated = store
            .update_profile(
                user.id,
                UserProfile {
                    name: "Asha R.".to_string(),
                    email: "asha@acme.example".to_string(),
                    phone: user.phone.clone(),
                    company: "Acme Widgets Pvt Ltd".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.email, "asha@acme.example");
        assert_eq!(store.get_user(user.id).await.unwrap().company, "Acme Widgets Pvt Ltd");
        // The old address is free again, the new one resolves.
        assert!(store.get_user_by_email("asha@example.com").await.is_err());
        assert!(store.get_user_by_email("asha@acme.example").await.is_ok());
    }
}
