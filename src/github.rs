use std::sync::Arc;

use anyhow::{Context, Result};
use http::header::USER_AGENT;
use http::{HeaderValue, StatusCode, Uri};
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use octocrab::service::middleware::auth_header::AuthHeaderLayer;
use octocrab::service::middleware::base_uri::BaseUriLayer;
use octocrab::service::middleware::extra_headers::ExtraHeadersLayer;
use octocrab::{AuthState, Octocrab, OctocrabBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::api;
use crate::credentials::Credentials;
use crate::errors::GitHubError;

/// Webhook as returned by GitHub; only the id matters locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RemoteWebhook {
    pub id: u64,
}

#[derive(Debug, Serialize)]
struct CreateWebhookRequest<'a> {
    name: &'a str,
    active: bool,
    events: &'a [&'a str],
    config: WebhookConfig<'a>,
}

#[derive(Debug, Serialize)]
struct WebhookConfig<'a> {
    url: &'a str,
    content_type: &'a str,
    secret: &'a str,
}

#[derive(Debug, Serialize)]
struct UpdateWebhookRequest {
    active: bool,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Client for one user's repository webhooks.
pub struct GitHubClient {
    octocrab: Octocrab,
    owner: String,
    secret: String,
    webhook_url: String,
}

impl GitHubClient {
    /// Authenticate with the personal token and identify as `credentials.owner`.
    pub fn new(credentials: &Credentials) -> Result<Self> {
        Self::with_base_uri(credentials, api::BASE_URI)
    }

    /// Same as [`GitHubClient::new`] against another API root.
    ///
    /// Octocrab's default builder always sends `User-Agent: octocrab`, so the
    /// service stack is assembled here with the owner as the only User-Agent.
    pub fn with_base_uri(credentials: &Credentials, base_uri: &str) -> Result<Self> {
        let base_uri: Uri = base_uri.parse().context("Invalid GitHub API base URI")?;
        let user_agent = HeaderValue::from_str(&credentials.owner)
            .context("GitHub username is not a valid User-Agent header")?;
        let authorization = HeaderValue::from_str(&format!("Bearer {}", credentials.token))
            .context("GitHub token is not a valid Authorization header")?;

        let connector = HttpsConnectorBuilder::new()
            .with_native_roots()
            .context("Failed to load native TLS roots")?
            .https_or_http()
            .enable_http1()
            .build();
        let client = Client::builder(TokioExecutor::new()).build(connector);

        let octocrab = OctocrabBuilder::new_empty()
            .with_service(client)
            .with_layer(&ExtraHeadersLayer::new(Arc::new(vec![(
                USER_AGENT, user_agent,
            )])))
            .with_layer(&BaseUriLayer::new(base_uri.clone()))
            .with_layer(&AuthHeaderLayer::new(
                Some(authorization),
                base_uri,
                Uri::from_static(api::UPLOAD_URI),
            ))
            .with_auth(AuthState::None)
            .build()
            .context("Failed to create Octocrab client")?;

        Ok(Self::with_octocrab(octocrab, credentials))
    }

    /// Use a preconfigured Octocrab instance (e.g. pointed at a mock server).
    pub fn with_octocrab(octocrab: Octocrab, credentials: &Credentials) -> Self {
        Self {
            octocrab,
            owner: credentials.owner.clone(),
            secret: credentials.secret.clone(),
            webhook_url: credentials.webhook_url.clone(),
        }
    }

    /// Create an active or inactive webhook firing on pull request, issue and
    /// check suite events, signed with the configured secret.
    pub async fn create_webhook(
        &self,
        repo: &str,
        active: bool,
    ) -> Result<RemoteWebhook, GitHubError> {
        let path = self.hooks_path(repo);
        let body = CreateWebhookRequest {
            name: api::HOOK_NAME,
            active,
            events: &api::EVENTS,
            config: WebhookConfig {
                url: &self.webhook_url,
                content_type: api::CONTENT_TYPE,
                secret: &self.secret,
            },
        };

        debug!(%path, active, "creating webhook");
        let response = self.octocrab._post(parse_uri(&path)?, Some(&body)).await?;
        let status = response.status();
        let text = self.octocrab.body_to_string(response).await?;
        if !status.is_success() {
            return Err(api_error(status, &text));
        }

        serde_json::from_str(&text).map_err(|e| GitHubError::DecodeError(e.to_string()))
    }

    /// Delete the webhook with the given id.
    pub async fn delete_webhook(&self, repo: &str, hook_id: u64) -> Result<(), GitHubError> {
        let path = self.hook_path(repo, hook_id);

        debug!(%path, "deleting webhook");
        let response = self
            .octocrab
            ._delete(parse_uri(&path)?, None::<&()>)
            .await?;
        let status = response.status();
        if !status.is_success() {
            let text = self.octocrab.body_to_string(response).await?;
            return Err(api_error(status, &text));
        }

        Ok(())
    }

    /// Change only the `active` flag of an existing webhook.
    pub async fn set_webhook_active(
        &self,
        repo: &str,
        hook_id: u64,
        active: bool,
    ) -> Result<(), GitHubError> {
        let path = self.hook_path(repo, hook_id);
        let body = UpdateWebhookRequest { active };

        debug!(%path, active, "updating webhook");
        let response = self.octocrab._patch(parse_uri(&path)?, Some(&body)).await?;
        let status = response.status();
        if !status.is_success() {
            let text = self.octocrab.body_to_string(response).await?;
            return Err(api_error(status, &text));
        }

        Ok(())
    }

    /// Split `owner/name`; a bare name belongs to the configured owner.
    fn owner_and_name<'a>(&'a self, repo: &'a str) -> (&'a str, &'a str) {
        repo.split_once('/').unwrap_or((self.owner.as_str(), repo))
    }

    fn hooks_path(&self, repo: &str) -> String {
        let (owner, name) = self.owner_and_name(repo);
        api::HOOKS_PATH_TEMPLATE
            .replace("{owner}", owner)
            .replace("{repo}", name)
    }

    fn hook_path(&self, repo: &str, hook_id: u64) -> String {
        let (owner, name) = self.owner_and_name(repo);
        api::HOOK_PATH_TEMPLATE
            .replace("{owner}", owner)
            .replace("{repo}", name)
            .replace("{hook_id}", &hook_id.to_string())
    }
}

fn parse_uri(path: &str) -> Result<Uri, GitHubError> {
    path.parse::<Uri>()
        .map_err(|e| GitHubError::UriError(e.to_string()))
}

/// Build an API error from a non-success response, keeping the status even
/// when the body is not GitHub's JSON error shape.
fn api_error(status: StatusCode, body: &str) -> GitHubError {
    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };

    GitHubError::ApiError {
        status_code: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_uses_github_message() {
        let err = api_error(StatusCode::NOT_FOUND, r#"{"message":"Not Found"}"#);
        assert_eq!(err.to_string(), "GitHub API error (status 404): Not Found");
    }

    #[test]
    fn test_api_error_keeps_status_for_plain_bodies() {
        let err = api_error(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(err.status_code(), Some(502));
        assert!(err.to_string().contains("upstream down"));

        let err = api_error(StatusCode::SERVICE_UNAVAILABLE, "");
        assert_eq!(err.to_string(), "GitHub API error (status 503): Service Unavailable");
    }

    #[test]
    fn test_create_request_shape() {
        let body = CreateWebhookRequest {
            name: api::HOOK_NAME,
            active: true,
            events: &api::EVENTS,
            config: WebhookConfig {
                url: "https://hooks.example.com",
                content_type: api::CONTENT_TYPE,
                secret: "s3cret",
            },
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "web",
                "active": true,
                "events": ["pull_request", "issues", "check_suite"],
                "config": {
                    "url": "https://hooks.example.com",
                    "content_type": "json",
                    "secret": "s3cret"
                }
            })
        );
    }

    #[test]
    fn test_update_request_only_carries_active() {
        let value = serde_json::to_value(UpdateWebhookRequest { active: false }).unwrap();
        assert_eq!(value, serde_json::json!({ "active": false }));
    }
}
