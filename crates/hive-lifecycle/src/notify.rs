//! Orchestration notification collaborator.
//!
//! After a bot is created or flagged for removal, the orchestration system
//! is poked over HTTP with the bot's identifier so it can provision or tear
//! down the actual infrastructure. Notification failures are logged by the
//! caller and never fail the lifecycle operation.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Errors from the orchestration endpoint.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("orchestration request failed: {0}")]
    Http(String),
}

/// Downstream orchestration system, keyed by bot identifier.
#[async_trait]
pub trait OrchestrationNotifier: Send + Sync {
    /// A new bot record exists and needs infrastructure provisioned.
    async fn bot_created(&self, bot_id: Uuid) -> Result<(), NotifyError>;

    /// A bot has been flagged for removal and needs teardown.
    async fn bot_removal_flagged(&self, bot_id: Uuid) -> Result<(), NotifyError>;
}

/// HTTP notifier against the orchestration API.
pub struct HttpNotifier {
    client: reqwest::Client,
    base_url: String,
}

impl HttpNotifier {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn post(&self, path: &str) -> Result<(), NotifyError> {
        self.client
            .post(format!("{}{path}", self.base_url))
            .send()
            .await
            .map_err(|e| NotifyError::Http(e.to_string()))?
            .error_for_status()
            .map_err(|e| NotifyError::Http(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl OrchestrationNotifier for HttpNotifier {
    async fn bot_created(&self, bot_id: Uuid) -> Result<(), NotifyError> {
        self.post(&format!("/orchestrate/{bot_id}")).await
    }

    async fn bot_removal_flagged(&self, bot_id: Uuid) -> Result<(), NotifyError> {
        self.post(&format!("/orchestrate/{bot_id}/remove")).await
    }
}

/// No-op notifier for tests and detached local development.
pub struct NullNotifier;

#[async_trait]
impl OrchestrationNotifier for NullNotifier {
    async fn bot_created(&self, _bot_id: Uuid) -> Result<(), NotifyError> {
        Ok(())
    }

    async fn bot_removal_flagged(&self, _bot_id: Uuid) -> Result<(), NotifyError> {
        Ok(())
    }
}
