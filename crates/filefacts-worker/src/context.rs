//! Outcome reporting trait
//!
//! The dispatcher hands every finished outcome to an [`OutcomeReporter`]. In
//! production this is the HTTP [`CallbackClient`].

use async_trait::async_trait;
use filefacts_core::models::TaskOutcome;
use filefacts_infra::CallbackClient;

#[async_trait]
pub trait OutcomeReporter: Send + Sync {
    /// Report `outcome` to `callback_url`. Must not fail; delivery errors are the
    /// implementation's to log.
    async fn report(&self, callback_url: &str, outcome: &TaskOutcome);
}

#[async_trait]
impl OutcomeReporter for CallbackClient {
    async fn report(&self, callback_url: &str, outcome: &TaskOutcome) {
        self.deliver(callback_url, outcome).await;
    }
}
