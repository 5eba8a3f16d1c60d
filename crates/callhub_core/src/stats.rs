//! crates/callhub_core/src/stats.rs
//!
//! Pure aggregation over the campaign collection. Everything here is plain
//! arithmetic; the interesting part is the guarded division, which pins the
//! success rate to 0 whenever no calls were made.

use uuid::Uuid;

use crate::domain::{Campaign, CampaignStatus};

/// Summary counters for a set of campaigns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CampaignSummary {
    pub total_calls: u64,
    pub successful_calls: u64,
    pub total_contacts: u64,
    pub active_campaigns: usize,
    /// Percentage of successful calls across the set, rounded to the nearest
    /// integer. May exceed 100 when stored records carry more successes than
    /// calls; that inconsistency is preserved, not repaired.
    pub success_rate: u32,
}

/// Reduces the campaign collection to summary counters, optionally narrowed
/// to a single campaign id.
pub fn summarize(campaigns: &[Campaign], filter: Option<Uuid>) -> CampaignSummary {
    let mut summary = CampaignSummary::default();
    let selected = campaigns
        .iter()
        .filter(|c| filter.map_or(true, |id| c.id == id));

    for campaign in selected {
        summary.total_calls += u64::from(campaign.calls_made);
        summary.successful_calls += u64::from(campaign.successful);
        summary.total_contacts += u64::from(campaign.contact_count);
        if campaign.status == CampaignStatus::Active {
            summary.active_campaigns += 1;
        }
    }

    summary.success_rate = guarded_rate(summary.successful_calls, summary.total_calls);
    summary
}

/// A campaign's own success rate for the listing view, guarded the same way
/// as the aggregate.
pub fn campaign_rate(campaign: &Campaign) -> u32 {
    guarded_rate(
        u64::from(campaign.successful),
        u64::from(campaign.calls_made),
    )
}

/// `round(100 * part / whole)`, or 0 when `whole` is 0.
pub fn guarded_rate(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}
