use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when calling the GitHub webhooks API.
#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("GitHub API error (status {status_code}): {message}")]
    ApiError { status_code: u16, message: String },
    #[error("HTTP error: {0}")]
    HttpError(String),
    #[error("URI error: {0}")]
    UriError(String),
    #[error("Failed to decode GitHub response: {0}")]
    DecodeError(String),
}

impl GitHubError {
    /// HTTP status of the failed call, if a response was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            GitHubError::ApiError { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

impl From<octocrab::Error> for GitHubError {
    fn from(err: octocrab::Error) -> Self {
        match err {
            octocrab::Error::GitHub { source, .. } => GitHubError::ApiError {
                status_code: source.status_code.as_u16(),
                message: source.message,
            },
            octocrab::Error::Http { source, .. } => GitHubError::HttpError(source.to_string()),
            octocrab::Error::Uri { source, .. } => GitHubError::UriError(source.to_string()),
            _ => GitHubError::HttpError(err.to_string()),
        }
    }
}

/// Errors raised by the local webhook state file.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access state file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("State file {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised while reading or writing the credentials file.
#[derive(Error, Debug)]
pub enum CredentialsError {
    #[error("Failed to read credentials file {}: {message}", path.display())]
    Read { path: PathBuf, message: String },
    #[error("Failed to write credentials file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur during validation.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Repository owner validation failed: {0}")]
    RepositoryOwner(String),
    #[error("Repository name validation failed: {0}")]
    RepositoryName(String),
    #[error("Token validation failed: {0}")]
    Token(String),
    #[error("Webhook secret validation failed: {0}")]
    Secret(String),
    #[error("Webhook URL validation failed: {0}")]
    WebhookUrl(String),
}

/// Webhook lifecycle command, used to label failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add,
    Remove,
    Enable,
    Disable,
}

impl Command {
    /// Past participle used in failure messages ("could not be added").
    pub fn verb(self) -> &'static str {
        match self {
            Command::Add => "added",
            Command::Remove => "removed",
            Command::Enable => "enabled",
            Command::Disable => "disabled",
        }
    }
}

/// Failures of a webhook command after its preconditions held.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The remote call failed; local state was left untouched.
    #[error("webhook could not be {}: {source}", command.verb())]
    Remote {
        command: Command,
        #[source]
        source: GitHubError,
    },
    /// The remote call succeeded but the local state could not be saved.
    #[error(
        "webhook for {repo} was {} on GitHub but local state could not be saved; \
         reconcile {repo} manually: {source}",
        command.verb()
    )]
    Diverged {
        command: Command,
        repo: String,
        #[source]
        source: StoreError,
    },
}

/// Format an error and its source chain into a single line, joined by " → ".
///
/// ```
/// let err = anyhow::anyhow!("outer error").context("inner error");
/// assert_eq!(
///     talerts::errors::format_error_chain(&err),
///     "inner error → outer error"
/// );
/// ```
pub fn format_error_chain(error: &anyhow::Error) -> String {
    let mut parts: Vec<String> = Vec::new();
    for cause in error.chain() {
        let text = cause.to_string();
        // thiserror variants often repeat their source inline
        if parts.last().is_some_and(|prev| prev.ends_with(&text)) {
            continue;
        }
        parts.push(text);
    }
    parts.join(" → ")
}
