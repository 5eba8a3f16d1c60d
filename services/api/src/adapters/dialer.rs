//! services/api/src/adapters/dialer.rs
//!
//! The simulated telephony backend. There is no real dialing anywhere in
//! this product: a launch sleeps for a configured delay (the demo's fake
//! network latency) and then fabricates call metrics from random draws.
//! Keeping the fabrication behind the `CallDispatchService` port means a
//! genuine dispatcher can replace it without touching any handler.

use async_trait::async_trait;
use callhub_core::domain::{Contact, DialReport};
use callhub_core::ports::{CallDispatchService, PortError, PortResult};
use rand::Rng;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub struct SimulatedDialer {
    run_delay: Duration,
}

impl SimulatedDialer {
    pub fn new(run_delay: Duration) -> Self {
        Self { run_delay }
    }
}

#[async_trait]
impl CallDispatchService for SimulatedDialer {
    async fn run_campaign(
        &self,
        contacts: &[Contact],
        cancel: CancellationToken,
    ) -> PortResult<DialReport> {
        let contact_count = contacts.len() as u32;
        if contact_count == 0 {
            return Ok(DialReport {
                calls_made: 0,
                successful: 0,
            });
        }

        tokio::select! {
            _ = cancel.cancelled() => {
                info!("Dial run cancelled before completion.");
                return Err(PortError::Cancelled);
            }
            _ = tokio::time::sleep(self.run_delay) => {}
        }

        let mut rng = rand::thread_rng();
        let calls_made = rng.gen_range(0..contact_count);
        // `successful` is an independent draw bounded by half the contact
        // list; it is NOT bounded by `calls_made`, so a report can claim more
        // successes than calls. Known inconsistency in the fabricated data,
        // preserved as-is.
        let successful = rng.gen_range(0..(contact_count + 1) / 2);

        info!(
            "Simulated dial run finished: {} calls, {} successful out of {} contacts",
            calls_made, successful, contact_count
        );
        Ok(DialReport {
            calls_made,
            successful,
        })
    }
}
