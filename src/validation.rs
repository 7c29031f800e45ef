//! Input validation utilities.
//!
//! This module validates repository arguments and the credential values the
//! setup form collects, so bad input is rejected before any GitHub call.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants;
use crate::errors::ValidationError;

/// Validate a repository owner (user or organization) name.
pub fn validate_repo_owner(owner: &str) -> Result<(), ValidationError> {
    let trimmed = owner.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::RepositoryOwner(
            "owner cannot be empty".to_string(),
        ));
    }

    if trimmed.len() > constants::repo::MAX_OWNER_LENGTH {
        return Err(ValidationError::RepositoryOwner(format!(
            "owner cannot exceed {} characters (got {})",
            constants::repo::MAX_OWNER_LENGTH,
            trimmed.len()
        )));
    }

    if !OWNER_RE.is_match(trimmed) {
        return Err(ValidationError::RepositoryOwner(format!(
            "owner can only contain letters, numbers and inner hyphens. Got: '{}'",
            trimmed
        )));
    }

    Ok(())
}

/// Validate a bare repository name (without owner).
pub fn validate_repo_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::RepositoryName(
            "name cannot be empty".to_string(),
        ));
    }

    if trimmed.len() > constants::repo::MAX_REPO_NAME_LENGTH {
        return Err(ValidationError::RepositoryName(format!(
            "name cannot exceed {} characters (got {})",
            constants::repo::MAX_REPO_NAME_LENGTH,
            trimmed.len()
        )));
    }

    if !REPO_NAME_RE.is_match(trimmed) {
        return Err(ValidationError::RepositoryName(format!(
            "name can only contain letters, numbers, '.', '_' and '-'. Got: '{}'",
            trimmed
        )));
    }

    Ok(())
}

/// Validate a repository argument as given on the command line.
///
/// Accepts either `name` or `owner/name`.
pub fn validate_repo_arg(repo: &str) -> Result<(), ValidationError> {
    match repo.trim().split_once('/') {
        Some((owner, name)) => {
            validate_repo_owner(owner)?;
            validate_repo_name(name)
        }
        None => validate_repo_name(repo),
    }
}

/// Validate a GitHub token format (basic length checks only).
pub fn validate_token(token: &str) -> Result<(), ValidationError> {
    let trimmed = token.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Token("token cannot be empty".to_string()));
    }

    if trimmed.len() < 20 {
        return Err(ValidationError::Token(
            "token appears too short (minimum 20 characters)".to_string(),
        ));
    }

    if trimmed.len() > 255 {
        return Err(ValidationError::Token(
            "token appears too long (maximum 255 characters)".to_string(),
        ));
    }

    Ok(())
}

/// Validate the URL webhooks deliver to.
pub fn validate_webhook_url(url: &str) -> Result<(), ValidationError> {
    let trimmed = url.trim();

    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .ok_or_else(|| {
            ValidationError::WebhookUrl(format!(
                "URL must start with http:// or https://. Got: '{}'",
                trimmed
            ))
        })?;

    if rest.is_empty() || rest.starts_with('/') || rest.contains(char::is_whitespace) {
        return Err(ValidationError::WebhookUrl(format!(
            "URL has no valid host. Got: '{}'",
            trimmed
        )));
    }

    Ok(())
}

static OWNER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(constants::repo::VALID_OWNER_PATTERN).expect("owner pattern is a valid regex")
});

static REPO_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(constants::repo::VALID_REPO_NAME_PATTERN).expect("repo name pattern is a valid regex")
});
