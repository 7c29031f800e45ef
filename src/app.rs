use std::path::Path;

use anyhow::{Context, Result};
use colored::*;
use tracing::{debug, warn};

use crate::app_deps::{PromptInterface, RealPrompt, RealWebhookApiFactory, WebhookApiFactory};
use crate::cli::Commands;
use crate::constants::messages;
use crate::credentials::Credentials;
use crate::errors::Command;
use crate::orchestrator::{Orchestrator, Outcome};
use crate::store::StateFile;
use crate::{paths, render, validation};

pub struct App;

impl App {
    /// Run one command against the real terminal, GitHub and config directory.
    pub async fn run(command: Option<Commands>) -> Result<()> {
        let credentials_path = paths::credentials_file();
        let state_file = StateFile::new(paths::state_file());

        Self::run_with_deps(
            &RealWebhookApiFactory,
            &RealPrompt,
            command,
            &credentials_path,
            &state_file,
        )
        .await
    }

    pub async fn run_with_deps(
        factory: &dyn WebhookApiFactory,
        prompt: &dyn PromptInterface,
        command: Option<Commands>,
        credentials_path: &Path,
        state_file: &StateFile,
    ) -> Result<()> {
        let Some(command) = command else {
            println!("{}", messages::HELP);
            return Ok(());
        };

        let credentials = match Credentials::from_file(credentials_path) {
            Ok(credentials) => credentials,
            // setup rewrites the whole file, so an unreadable one must not block it
            Err(e) if command == Commands::Setup => {
                warn!(error = %e, "ignoring unreadable credentials file");
                Credentials::default()
            }
            Err(e) => return Err(e.into()),
        };
        if command == Commands::Setup || !credentials.is_configured() {
            debug!(?command, configured = credentials.is_configured(), "running setup");
            return Self::setup_with_deps(prompt, &credentials, credentials_path, state_file);
        }

        let (repo, command) = match command {
            Commands::List => {
                let store = state_file
                    .load()
                    .context("Failed to load webhook state")?;
                render::print_store(&store);
                return Ok(());
            }
            Commands::Add { repo } => (repo, Command::Add),
            Commands::Remove { repo } => (repo, Command::Remove),
            Commands::Enable { repo } => (repo, Command::Enable),
            Commands::Disable { repo } => (repo, Command::Disable),
            Commands::Setup | Commands::Unknown(_) => {
                println!("{}", messages::HELP);
                return Ok(());
            }
        };

        let Some(repo) = repo.map(|r| r.trim().to_string()).filter(|r| !r.is_empty()) else {
            println!("{}", messages::MISSING_REPO);
            return Ok(());
        };
        validation::validate_repo_arg(&repo)?;

        let store = state_file
            .load()
            .context("Failed to load webhook state")?;
        let api = factory.create(&credentials)?;
        let mut orchestrator = Orchestrator::new(api.as_ref(), state_file, store);

        let outcome = match command {
            Command::Add => orchestrator.add(&repo).await?,
            Command::Remove => orchestrator.remove(&repo).await?,
            Command::Enable => orchestrator.enable(&repo).await?,
            Command::Disable => orchestrator.disable(&repo).await?,
        };

        match outcome {
            Outcome::Applied => render::print_store(orchestrator.store()),
            Outcome::Skipped(message) => println!("{}", message.yellow()),
        }

        Ok(())
    }

    /// Collect credentials and overwrite the credentials file.
    ///
    /// Also makes sure the state file exists so the other commands can run.
    /// Cancelling writes nothing.
    pub fn setup_with_deps(
        prompt: &dyn PromptInterface,
        current: &Credentials,
        credentials_path: &Path,
        state_file: &StateFile,
    ) -> Result<()> {
        println!("{}", messages::SETUP_INTRO);

        let Some(credentials) = prompt.collect_credentials(current)? else {
            println!("{}", messages::SETUP_CANCELLED.yellow());
            return Ok(());
        };

        credentials.save(credentials_path)?;
        state_file
            .initialize()
            .context("Failed to initialize webhook state")?;

        println!("{}", messages::SETUP_SAVED.green());
        Ok(())
    }
}
