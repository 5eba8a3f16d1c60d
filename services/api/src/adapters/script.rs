//! services/api/src/adapters/script.rs
//!
//! Canned call-script "generation": one fixed template per campaign type,
//! with a `{name}` placeholder for per-contact personalization. The port is
//! where a real voice-AI backend would plug in.

use async_trait::async_trait;
use callhub_core::domain::CampaignType;
use callhub_core::ports::{PortResult, ScriptGenerationService};

const SALES_TEMPLATE: &str = "Hello {name}, this is an automated call from CallHub. We have an exciting offer on our premium services that might interest you. Would you like to hear more about our special discount?";
const RECOVERY_TEMPLATE: &str = "Hello {name}, this is a friendly reminder about your pending payment. We understand that sometimes things can be overlooked. Could we discuss a convenient payment arrangement?";
const SURVEY_TEMPLATE: &str = "Hello {name}, we value your opinion! We're conducting a brief survey to improve our services. Would you have 2 minutes to share your feedback with us?";
const REMINDER_TEMPLATE: &str = "Hello {name}, this is a reminder about your upcoming appointment scheduled for tomorrow. Please confirm your attendance or let us know if you need to reschedule.";

pub struct TemplateScriptAdapter;

#[async_trait]
impl ScriptGenerationService for TemplateScriptAdapter {
    async fn generate(&self, campaign_type: CampaignType) -> PortResult<String> {
        let script = match campaign_type {
            CampaignType::Sales => SALES_TEMPLATE,
            CampaignType::Recovery => RECOVERY_TEMPLATE,
            CampaignType::Survey => SURVEY_TEMPLATE,
            CampaignType::Reminder => REMINDER_TEMPLATE,
        };
        Ok(script.to_string())
    }
}
