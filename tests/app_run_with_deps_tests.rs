use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use tempfile::TempDir;

use talerts::app::App;
use talerts::app_deps::{PromptInterface, WebhookApi, WebhookApiFactory};
use talerts::cli::Commands;
use talerts::credentials::Credentials;
use talerts::errors::GitHubError;
use talerts::github::RemoteWebhook;
use talerts::store::{StateFile, StateStore, WebhookRecord};

#[derive(Default)]
struct FakeGitHub {
    calls: Mutex<Vec<String>>,
    next_id: u64,
    fail_status: Option<u16>,
}

impl FakeGitHub {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn call(&self, call: String) -> Result<(), GitHubError> {
        self.calls.lock().unwrap().push(call);
        match self.fail_status {
            Some(status_code) => Err(GitHubError::ApiError {
                status_code,
                message: "Server Error".to_string(),
            }),
            None => Ok(()),
        }
    }
}

struct SharedFake(Arc<FakeGitHub>);

#[async_trait]
impl WebhookApi for SharedFake {
    async fn create(&self, repo: &str, active: bool) -> Result<RemoteWebhook, GitHubError> {
        self.0.call(format!("create {repo} {active}"))?;
        Ok(RemoteWebhook { id: self.0.next_id })
    }

    async fn remove(&self, repo: &str, hook_id: u64) -> Result<(), GitHubError> {
        self.0.call(format!("remove {repo} {hook_id}"))
    }

    async fn set_active(&self, repo: &str, hook_id: u64, active: bool) -> Result<(), GitHubError> {
        self.0.call(format!("set_active {repo} {hook_id} {active}"))
    }
}

struct MockFactory {
    fake: Arc<FakeGitHub>,
    seen_owner: Mutex<Option<String>>,
}

impl MockFactory {
    fn new(fake: FakeGitHub) -> Self {
        Self {
            fake: Arc::new(fake),
            seen_owner: Mutex::new(None),
        }
    }
}

impl WebhookApiFactory for MockFactory {
    fn create(&self, credentials: &Credentials) -> Result<Box<dyn WebhookApi>> {
        *self.seen_owner.lock().unwrap() = Some(credentials.owner.clone());
        Ok(Box::new(SharedFake(Arc::clone(&self.fake))))
    }
}

/// Prompt returning fixed answers, or cancelling when `answers` is `None`.
struct MockPrompt {
    answers: Option<Credentials>,
    invoked: Mutex<bool>,
}

impl MockPrompt {
    fn new(answers: Option<Credentials>) -> Self {
        Self {
            answers,
            invoked: Mutex::new(false),
        }
    }

    fn invoked(&self) -> bool {
        *self.invoked.lock().unwrap()
    }
}

impl PromptInterface for MockPrompt {
    fn collect_credentials(&self, _current: &Credentials) -> Result<Option<Credentials>> {
        *self.invoked.lock().unwrap() = true;
        Ok(self.answers.clone())
    }
}

fn credentials() -> Credentials {
    Credentials {
        token: "ghp_abcdefghijklmnopqrstuvwxyz".to_string(),
        secret: "s3cret".to_string(),
        webhook_url: "https://hooks.example.com/github".to_string(),
        owner: "acme".to_string(),
    }
}

struct Workspace {
    _dir: TempDir,
    credentials_path: PathBuf,
    state_file: StateFile,
}

impl Workspace {
    fn configured() -> Self {
        let ws = Self::empty();
        credentials().save(&ws.credentials_path).unwrap();
        ws.state_file.initialize().unwrap();
        ws
    }

    fn empty() -> Self {
        let dir = TempDir::new().unwrap();
        let credentials_path = dir.path().join(".env");
        let state_file = StateFile::new(dir.path().join("repos.json"));
        Self {
            _dir: dir,
            credentials_path,
            state_file,
        }
    }

    async fn run(
        &self,
        factory: &MockFactory,
        prompt: &MockPrompt,
        command: Commands,
    ) -> Result<()> {
        App::run_with_deps(
            factory,
            prompt,
            Some(command),
            &self.credentials_path,
            &self.state_file,
        )
        .await
    }

    fn store(&self) -> StateStore {
        self.state_file.load().unwrap()
    }
}

fn repo(name: &str) -> Option<String> {
    Some(name.to_string())
}

#[tokio::test]
async fn test_add_disable_remove_lifecycle() -> Result<()> {
    let ws = Workspace::configured();
    let factory = MockFactory::new(FakeGitHub {
        next_id: 42,
        ..Default::default()
    });
    let prompt = MockPrompt::new(None);

    ws.run(&factory, &prompt, Commands::Add { repo: repo("acme/widgets") })
        .await?;
    let mut expected = StateStore::new();
    expected.set("acme/widgets", WebhookRecord { enabled: true, id: 42 });
    assert_eq!(ws.store(), expected);

    ws.run(&factory, &prompt, Commands::Disable { repo: repo("acme/widgets") })
        .await?;
    expected.set("acme/widgets", WebhookRecord { enabled: false, id: 42 });
    assert_eq!(ws.store(), expected);

    ws.run(&factory, &prompt, Commands::Remove { repo: repo("acme/widgets") })
        .await?;
    assert!(ws.store().is_empty());
    assert_eq!(
        fs::read_to_string(ws.state_file.path()).unwrap(),
        "{}"
    );

    assert_eq!(
        factory.fake.calls(),
        vec![
            "create acme/widgets true",
            "set_active acme/widgets 42 false",
            "remove acme/widgets 42",
        ]
    );
    assert_eq!(factory.seen_owner.lock().unwrap().as_deref(), Some("acme"));
    assert!(!prompt.invoked());
    Ok(())
}

#[tokio::test]
async fn test_remote_failure_surfaces_error_and_keeps_state() {
    let ws = Workspace::configured();
    let mut existing = StateStore::new();
    existing.set("widgets", WebhookRecord { enabled: true, id: 9 });
    ws.state_file.persist(&existing).unwrap();

    let factory = MockFactory::new(FakeGitHub {
        fail_status: Some(500),
        ..Default::default()
    });
    let prompt = MockPrompt::new(None);

    let err = ws
        .run(&factory, &prompt, Commands::Enable { repo: repo("widgets") })
        .await
        .unwrap_err();

    assert!(err.to_string().contains("webhook could not be enabled"));
    assert!(err.to_string().contains("500"));
    assert_eq!(ws.store(), existing);
}

#[tokio::test]
async fn test_missing_repo_makes_no_calls() -> Result<()> {
    let ws = Workspace::configured();
    let factory = MockFactory::new(FakeGitHub::default());
    let prompt = MockPrompt::new(None);

    for command in [
        Commands::Add { repo: None },
        Commands::Remove { repo: None },
        Commands::Enable { repo: repo("  ") },
        Commands::Disable { repo: None },
    ] {
        ws.run(&factory, &prompt, command).await?;
    }

    assert!(factory.fake.calls().is_empty());
    assert!(ws.store().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_invalid_repo_name_is_rejected_before_remote_call() {
    let ws = Workspace::configured();
    let factory = MockFactory::new(FakeGitHub::default());
    let prompt = MockPrompt::new(None);

    let err = ws
        .run(&factory, &prompt, Commands::Add { repo: repo("bad name") })
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Repository name validation failed"));
    assert!(factory.fake.calls().is_empty());
}

#[tokio::test]
async fn test_corrupt_state_is_fatal() {
    let ws = Workspace::configured();
    fs::write(ws.state_file.path(), "{not json").unwrap();
    let factory = MockFactory::new(FakeGitHub::default());
    let prompt = MockPrompt::new(None);

    let err = ws
        .run(&factory, &prompt, Commands::Add { repo: repo("widgets") })
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Failed to load webhook state"));
    assert!(factory.fake.calls().is_empty());

    let err = ws.run(&factory, &prompt, Commands::List).await.unwrap_err();
    assert!(format!("{:#}", err).contains("is corrupt"));
}

#[tokio::test]
async fn test_missing_token_forces_setup() -> Result<()> {
    let ws = Workspace::empty();
    let factory = MockFactory::new(FakeGitHub::default());
    let prompt = MockPrompt::new(Some(credentials()));

    ws.run(&factory, &prompt, Commands::Add { repo: repo("widgets") })
        .await?;

    assert!(prompt.invoked());
    assert!(factory.fake.calls().is_empty());
    assert_eq!(Credentials::from_file(&ws.credentials_path)?, credentials());
    assert!(ws.store().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_setup_overwrites_credentials_and_keeps_state() -> Result<()> {
    let ws = Workspace::configured();
    let mut existing = StateStore::new();
    existing.set("widgets", WebhookRecord { enabled: false, id: 3 });
    ws.state_file.persist(&existing).unwrap();

    let updated = Credentials {
        owner: "new-owner".to_string(),
        ..credentials()
    };
    let factory = MockFactory::new(FakeGitHub::default());
    let prompt = MockPrompt::new(Some(updated.clone()));

    ws.run(&factory, &prompt, Commands::Setup).await?;

    assert_eq!(Credentials::from_file(&ws.credentials_path)?, updated);
    assert_eq!(ws.store(), existing);
    Ok(())
}

#[tokio::test]
async fn test_setup_replaces_malformed_credentials_file() -> Result<()> {
    let ws = Workspace::empty();
    fs::write(&ws.credentials_path, "githubToken='abc\n").unwrap();
    let factory = MockFactory::new(FakeGitHub::default());
    let prompt = MockPrompt::new(Some(credentials()));

    ws.run(&factory, &prompt, Commands::Setup).await?;

    assert!(prompt.invoked());
    assert_eq!(Credentials::from_file(&ws.credentials_path)?, credentials());
    assert!(ws.store().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_malformed_credentials_file_fails_other_commands() {
    let ws = Workspace::empty();
    fs::write(&ws.credentials_path, "githubToken='abc\n").unwrap();
    let factory = MockFactory::new(FakeGitHub::default());
    let prompt = MockPrompt::new(Some(credentials()));

    let err = ws.run(&factory, &prompt, Commands::List).await.unwrap_err();

    assert!(err.to_string().contains("Failed to read credentials file"));
    assert!(!prompt.invoked());
}

#[tokio::test]
async fn test_cancelled_setup_writes_nothing() -> Result<()> {
    let ws = Workspace::empty();
    let factory = MockFactory::new(FakeGitHub::default());
    let prompt = MockPrompt::new(None);

    ws.run(&factory, &prompt, Commands::Setup).await?;

    assert!(prompt.invoked());
    assert!(!ws.credentials_path.exists());
    assert!(!ws.state_file.path().exists());
    Ok(())
}

#[tokio::test]
async fn test_list_and_unknown_commands_make_no_calls() -> Result<()> {
    let ws = Workspace::configured();
    let factory = MockFactory::new(FakeGitHub::default());
    let prompt = MockPrompt::new(None);

    ws.run(&factory, &prompt, Commands::List).await?;
    ws.run(
        &factory,
        &prompt,
        Commands::Unknown(vec!["frobnicate".to_string()]),
    )
    .await?;
    App::run_with_deps(
        &factory,
        &prompt,
        None,
        &ws.credentials_path,
        &ws.state_file,
    )
    .await?;

    assert!(factory.fake.calls().is_empty());
    assert!(!prompt.invoked());
    Ok(())
}
