pub mod domain;
pub mod ports;
pub mod stats;
pub mod wizard;

pub use domain::{
    AuthSession, Campaign, CampaignStatus, CampaignType, Contact, DialReport, Language, Settings,
    Tone, User, UserCredentials, UserProfile,
};
pub use ports::{
    CallDispatchService, ContactListParser, PortError, PortResult, RecordStore,
    ScriptGenerationService,
};
pub use stats::{summarize, CampaignSummary};
pub use wizard::{CampaignDraft, DraftError, DraftWizard, WizardStep};
