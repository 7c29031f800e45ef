//! Webhook command orchestration.
//!
//! Each repository is either absent from the [`StateStore`] or present with
//! an `enabled` flag. Every command checks its precondition locally, makes
//! the GitHub call, and only after the call succeeded mutates and persists
//! the local store. A failed GitHub call leaves both the in-memory and the
//! persisted store untouched.

use tracing::{info, warn};

use crate::app_deps::WebhookApi;
use crate::errors::{Command, CommandError};
use crate::store::{StateFile, StateStore, WebhookRecord};

/// Result of a command whose preconditions were checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// GitHub and the local store were both updated.
    Applied,
    /// Precondition did not hold; nothing was sent to GitHub.
    Skipped(String),
}

pub struct Orchestrator<'a> {
    api: &'a dyn WebhookApi,
    file: &'a StateFile,
    store: StateStore,
}

impl<'a> Orchestrator<'a> {
    pub fn new(api: &'a dyn WebhookApi, file: &'a StateFile, store: StateStore) -> Self {
        Self { api, file, store }
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub async fn add(&mut self, repo: &str) -> Result<Outcome, CommandError> {
        if self.store.has(repo) {
            return Ok(Outcome::Skipped(format!("{} is already added.", repo)));
        }

        let hook = self
            .api
            .create(repo, true)
            .await
            .map_err(|source| CommandError::Remote {
                command: Command::Add,
                source,
            })?;

        self.commit(Command::Add, repo, |store| {
            store.set(
                repo,
                WebhookRecord {
                    enabled: true,
                    id: hook.id,
                },
            );
        })
    }

    pub async fn remove(&mut self, repo: &str) -> Result<Outcome, CommandError> {
        let Some(record) = self.store.get(repo).copied() else {
            return Ok(Outcome::Skipped(format!(
                "{} did not have a webhook anyway.",
                repo
            )));
        };

        self.api
            .remove(repo, record.id)
            .await
            .map_err(|source| CommandError::Remote {
                command: Command::Remove,
                source,
            })?;

        self.commit(Command::Remove, repo, |store| {
            store.delete(repo);
        })
    }

    pub async fn enable(&mut self, repo: &str) -> Result<Outcome, CommandError> {
        self.set_active(Command::Enable, repo, true).await
    }

    pub async fn disable(&mut self, repo: &str) -> Result<Outcome, CommandError> {
        self.set_active(Command::Disable, repo, false).await
    }

    async fn set_active(
        &mut self,
        command: Command,
        repo: &str,
        active: bool,
    ) -> Result<Outcome, CommandError> {
        let Some(record) = self.store.get(repo).copied() else {
            let action = if active { "enable" } else { "disable" };
            return Ok(Outcome::Skipped(format!(
                "{} does not have a webhook to {}. Perhaps add one?",
                repo, action
            )));
        };

        self.api
            .set_active(repo, record.id, active)
            .await
            .map_err(|source| CommandError::Remote { command, source })?;

        self.commit(command, repo, |store| {
            store.set(
                repo,
                WebhookRecord {
                    enabled: active,
                    ..record
                },
            );
        })
    }

    /// Apply a mutation confirmed by GitHub and persist the whole store.
    fn commit(
        &mut self,
        command: Command,
        repo: &str,
        mutate: impl FnOnce(&mut StateStore),
    ) -> Result<Outcome, CommandError> {
        mutate(&mut self.store);

        if let Err(source) = self.file.persist(&self.store) {
            warn!(%repo, error = %source, "GitHub and local webhook state diverged");
            return Err(CommandError::Diverged {
                command,
                repo: repo.to_string(),
                source,
            });
        }

        info!(%repo, "webhook {}", command.verb());
        Ok(Outcome::Applied)
    }
}
