//! crates/callhub_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any storage or serialization format.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Error returned when parsing an enum-like field from its wire form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized value: {0}")]
pub struct UnknownVariant(pub String);

// Represents a registered account - used throughout the app
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// The editable subset of a user record.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
}

// Only used internally for login - contains sensitive data
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user_id: Uuid,
    pub email: String,
    pub password_hash: String,
}

// Represents a login session (auth cookie)
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub id: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// A single entry of a campaign's contact list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignType {
    Sales,
    Recovery,
    Survey,
    Reminder,
}

impl fmt::Display for CampaignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CampaignType::Sales => "sales",
            CampaignType::Recovery => "recovery",
            CampaignType::Survey => "survey",
            CampaignType::Reminder => "reminder",
        };
        f.write_str(s)
    }
}

impl FromStr for CampaignType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sales" => Ok(CampaignType::Sales),
            "recovery" => Ok(CampaignType::Recovery),
            "survey" => Ok(CampaignType::Survey),
            "reminder" => Ok(CampaignType::Reminder),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Hindi,
    Hinglish,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Language::English => "english",
            Language::Hindi => "hindi",
            Language::Hinglish => "hinglish",
        };
        f.write_str(s)
    }
}

impl FromStr for Language {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "english" => Ok(Language::English),
            "hindi" => Ok(Language::Hindi),
            "hinglish" => Ok(Language::Hinglish),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Professional,
    Friendly,
    Casual,
    Urgent,
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Tone::Professional => "professional",
            Tone::Friendly => "friendly",
            Tone::Casual => "casual",
            Tone::Urgent => "urgent",
        };
        f.write_str(s)
    }
}

impl FromStr for Tone {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "professional" => Ok(Tone::Professional),
            "friendly" => Ok(Tone::Friendly),
            "casual" => Ok(Tone::Casual),
            "urgent" => Ok(Tone::Urgent),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignStatus {
    Draft,
    Active,
    Completed,
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CampaignStatus::Draft => "draft",
            CampaignStatus::Active => "active",
            CampaignStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

impl FromStr for CampaignStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(CampaignStatus::Draft),
            "active" => Ok(CampaignStatus::Active),
            "completed" => Ok(CampaignStatus::Completed),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// A finalized campaign as it lives in the record store.
///
/// `calls_made` and `successful` are filled in once when the campaign is
/// launched and never updated afterwards; there is no execution loop behind
/// them. `successful` is not guaranteed to be less than or equal to
/// `calls_made` - the two are independent draws from the dial simulator.
#[derive(Debug, Clone)]
pub struct Campaign {
    pub id: Uuid,
    pub owner: Uuid,
    pub name: String,
    pub campaign_type: CampaignType,
    pub language: Language,
    pub tone: Tone,
    pub script: String,
    pub schedule: String,
    pub contact_count: u32,
    pub status: CampaignStatus,
    pub calls_made: u32,
    pub successful: u32,
    pub created_at: DateTime<Utc>,
}

/// Per-user notification preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub language: Language,
    pub notifications: bool,
    pub email_updates: bool,
    pub sms_alerts: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: Language::English,
            notifications: true,
            email_updates: true,
            sms_alerts: false,
        }
    }
}

/// The outcome of one simulated campaign run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialReport {
    pub calls_made: u32,
    pub successful: u32,
}
