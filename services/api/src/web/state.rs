//! services/api/src/web/state.rs
//!
//! Defines the application's shared state and the in-memory draft registry.

use crate::config::Config;
use callhub_core::ports::{
    CallDispatchService, ContactListParser, RecordStore, ScriptGenerationService,
};
use callhub_core::wizard::DraftWizard;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

//=========================================================================================
// AppState (Shared Across All Connections)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub contacts: Arc<dyn ContactListParser>,
    pub dialer: Arc<dyn CallDispatchService>,
    pub scripts: Arc<dyn ScriptGenerationService>,
    pub config: Arc<Config>,
    pub drafts: Arc<DraftRegistry>,
    /// Cancelled when the server begins shutting down, so in-flight simulated
    /// dial runs are abandoned instead of finishing against a closing store.
    pub shutdown: CancellationToken,
}

//=========================================================================================
// DraftRegistry (Per-Login Wizard State)
//=========================================================================================

/// Campaign drafts under construction, keyed by auth session id.
///
/// Drafts live only in memory: they are dropped when their campaign launches,
/// when their session logs out, and when the process exits. They are never
/// written to the record store.
#[derive(Default)]
pub struct DraftRegistry {
    inner: RwLock<HashMap<String, DraftWizard>>,
}

impl DraftRegistry {
    /// Runs `f` against the session's wizard, creating a fresh one on first use.
    pub async fn with_draft<T>(
        &self,
        session_id: &str,
        f: impl FnOnce(&mut DraftWizard) -> T,
    ) -> T {
        let mut map = self.inner.write().await;
        let wizard = map.entry(session_id.to_string()).or_default();
        f(wizard)
    }

    /// A point-in-time copy of the session's wizard.
    pub async fn snapshot(&self, session_id: &str) -> DraftWizard {
        let map = self.inner.read().await;
        map.get(session_id).cloned().unwrap_or_default()
    }

    pub async fn discard(&self, session_id: &str) {
        self.inner.write().await.remove(session_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use callhub_core::wizard::WizardStep;

    #[tokio::test]
    async fn drafts_are_isolated_per_session() {
        let registry = DraftRegistry::default();

        registry
            .with_draft("session-a", |w| {
                w.draft.name = "Outreach".to_string();
                w.advance()
            })
            .await;

        let a = registry.snapshot("session-a").await;
        let b = registry.snapshot("session-b").await;
        assert_eq!(a.draft.name, "Outreach");
        assert_eq!(a.step(), WizardStep::Contacts);
        assert_eq!(b.draft.name, "");
        assert_eq!(b.step(), WizardStep::Details);
    }

    #[tokio::test]
    async fn discard_resets_the_wizard() {
        let registry = DraftRegistry::default();
        registry
            .with_draft("session-a", |w| w.draft.name = "Outreach".to_string())
            .await;
        registry.discard("session-a").await;
        assert_eq!(registry.snapshot("session-a").await.draft.name, "");
    }
}
