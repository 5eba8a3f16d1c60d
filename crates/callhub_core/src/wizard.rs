//! crates/callhub_core/src/wizard.rs
//!
//! The campaign draft builder: a four-step linear wizard accumulating an
//! in-memory draft until it is saved or launched. The draft never touches the
//! record store while it is being built.

use crate::domain::{CampaignType, Contact, Language, Tone};

/// The wizard's position. Transitions are manual and clamped to the
/// `Details..=Review` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum WizardStep {
    #[default]
    Details,
    Contacts,
    Script,
    Review,
}

impl WizardStep {
    /// The 1-based step number shown to clients.
    pub fn number(self) -> u8 {
        match self {
            WizardStep::Details => 1,
            WizardStep::Contacts => 2,
            WizardStep::Script => 3,
            WizardStep::Review => 4,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Details => "Campaign Details",
            WizardStep::Contacts => "Upload Contacts",
            WizardStep::Script => "Configure Script",
            WizardStep::Review => "Review & Launch",
        }
    }

    fn forward(self) -> Self {
        match self {
            WizardStep::Details => WizardStep::Contacts,
            WizardStep::Contacts => WizardStep::Script,
            WizardStep::Script | WizardStep::Review => WizardStep::Review,
        }
    }

    fn backward(self) -> Self {
        match self {
            WizardStep::Details | WizardStep::Contacts => WizardStep::Details,
            WizardStep::Script => WizardStep::Contacts,
            WizardStep::Review => WizardStep::Script,
        }
    }
}

/// Why a draft cannot be persisted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("Campaign name and type are required")]
    MissingDetails,
    #[error("Campaign needs at least one contact")]
    NoContacts,
}

/// An in-progress campaign configuration.
#[derive(Debug, Clone)]
pub struct CampaignDraft {
    pub name: String,
    pub campaign_type: Option<CampaignType>,
    pub language: Language,
    pub tone: Tone,
    pub script: String,
    pub schedule: String,
    pub contacts: Vec<Contact>,
}

impl Default for CampaignDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            campaign_type: None,
            language: Language::default(),
            tone: Tone::default(),
            script: String::new(),
            schedule: "immediate".to_string(),
            contacts: Vec::new(),
        }
    }
}

impl CampaignDraft {
    /// A draft may be saved once it carries a name and a type.
    pub fn validate_for_save(&self) -> Result<(), DraftError> {
        if self.name.trim().is_empty() || self.campaign_type.is_none() {
            return Err(DraftError::MissingDetails);
        }
        Ok(())
    }

    /// Launching additionally requires a non-empty contact list.
    pub fn validate_for_launch(&self) -> Result<(), DraftError> {
        self.validate_for_save()?;
        if self.contacts.is_empty() {
            return Err(DraftError::NoContacts);
        }
        Ok(())
    }
}

/// A draft together with the wizard position it is being edited at.
#[derive(Debug, Clone, Default)]
pub struct DraftWizard {
    pub draft: CampaignDraft,
    step: WizardStep,
}

impl DraftWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Moves one step forward, stopping at `Review`.
    pub fn advance(&mut self) -> WizardStep {
        self.step = self.step.forward();
        self.step
    }

    /// Moves one step back, stopping at `Details`.
    pub fn back(&mut self) -> WizardStep {
        self.step = self.step.backward();
        self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> Contact {
        Contact {
            name: "John Doe".to_string(),
            phone: "+1234567890".to_string(),
            email: "john@example.com".to_string(),
        }
    }

    #[test]
    fn advance_clamps_at_review() {
        let mut wizard = DraftWizard::new();
        assert_eq!(wizard.step(), WizardStep::Details);
        assert_eq!(wizard.advance(), WizardStep::Contacts);
        assert_eq!(wizard.advance(), WizardStep::Script);
        assert_eq!(wizard.advance(), WizardStep::Review);
        assert_eq!(wizard.advance(), WizardStep::Review);
        assert_eq!(wizard.step().number(), 4);
    }

    #[test]
    fn back_clamps_at_details() {
        let mut wizard = DraftWizard::new();
        assert_eq!(wizard.back(), WizardStep::Details);
        wizard.advance();
        wizard.advance();
        assert_eq!(wizard.back(), WizardStep::Contacts);
        assert_eq!(wizard.back(), WizardStep::Details);
        assert_eq!(wizard.back(), WizardStep::Details);
    }

    #[test]
    fn save_requires_name_and_type() {
        let mut draft = CampaignDraft::default();
        assert_eq!(draft.validate_for_save(), Err(DraftError::MissingDetails));

        draft.name = "Festive outreach".to_string();
        assert_eq!(draft.validate_for_save(), Err(DraftError::MissingDetails));

        draft.campaign_type = Some(CampaignType::Sales);
        assert_eq!(draft.validate_for_save(), Ok(()));
    }

    #[test]
    fn whitespace_name_is_rejected() {
        let draft = CampaignDraft {
            name: "   ".to_string(),
            campaign_type: Some(CampaignType::Survey),
            ..CampaignDraft::default()
        };
        assert_eq!(draft.validate_for_save(), Err(DraftError::MissingDetails));
    }

    #[test]
    fn launch_requires_contacts() {
        let mut draft = CampaignDraft {
            name: "Renewals".to_string(),
            campaign_type: Some(CampaignType::Reminder),
            ..CampaignDraft::default()
        };
        assert_eq!(draft.validate_for_launch(), Err(DraftError::NoContacts));

        draft.contacts.push(contact());
        assert_eq!(draft.validate_for_launch(), Ok(()));
    }

    #[test]
    fn draft_defaults_match_the_form() {
        let draft = CampaignDraft::default();
        assert_eq!(draft.language, Language::English);
        assert_eq!(draft.tone, Tone::Professional);
        assert_eq!(draft.schedule, "immediate");
        assert!(draft.contacts.is_empty());
    }
}
