use anyhow::Result;
use async_trait::async_trait;

use crate::credentials::Credentials;
use crate::errors::GitHubError;
use crate::{github, prompt};

/// Remote side of the webhook lifecycle.
#[async_trait]
pub trait WebhookApi: Send + Sync {
    async fn create(&self, repo: &str, active: bool) -> Result<github::RemoteWebhook, GitHubError>;
    async fn remove(&self, repo: &str, hook_id: u64) -> Result<(), GitHubError>;
    async fn set_active(&self, repo: &str, hook_id: u64, active: bool) -> Result<(), GitHubError>;
}

pub trait WebhookApiFactory: Send + Sync {
    fn create(&self, credentials: &Credentials) -> Result<Box<dyn WebhookApi>>;
}

pub struct RealWebhookApi {
    inner: github::GitHubClient,
}

impl RealWebhookApi {
    pub fn new(inner: github::GitHubClient) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl WebhookApi for RealWebhookApi {
    async fn create(&self, repo: &str, active: bool) -> Result<github::RemoteWebhook, GitHubError> {
        self.inner.create_webhook(repo, active).await
    }

    async fn remove(&self, repo: &str, hook_id: u64) -> Result<(), GitHubError> {
        self.inner.delete_webhook(repo, hook_id).await
    }

    async fn set_active(&self, repo: &str, hook_id: u64, active: bool) -> Result<(), GitHubError> {
        self.inner.set_webhook_active(repo, hook_id, active).await
    }
}

pub struct RealWebhookApiFactory;

impl WebhookApiFactory for RealWebhookApiFactory {
    fn create(&self, credentials: &Credentials) -> Result<Box<dyn WebhookApi>> {
        let client = github::GitHubClient::new(credentials)?;
        Ok(Box::new(RealWebhookApi::new(client)))
    }
}

pub trait PromptInterface: Send + Sync {
    /// Collect credentials; `None` when the user cancelled.
    fn collect_credentials(&self, current: &Credentials) -> Result<Option<Credentials>>;
}

pub struct RealPrompt;

impl PromptInterface for RealPrompt {
    fn collect_credentials(&self, current: &Credentials) -> Result<Option<Credentials>> {
        prompt::collect_credentials(current)
    }
}
