//! Credentials file loading and saving.
//!
//! The credentials file is a dotenv file holding the GitHub token, the
//! webhook signing secret, the webhook target URL and the account name.
//! It is parsed with `dotenv`'s iterator API so values never leak into the
//! process environment.

use std::fs;
use std::path::Path;

use crate::constants::keys;
use crate::errors::CredentialsError;

/// Values needed to talk to GitHub on behalf of the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// GitHub personal access token.
    pub token: String,
    /// Secret GitHub signs webhook deliveries with.
    pub secret: String,
    /// URL webhook deliveries are sent to.
    pub webhook_url: String,
    /// GitHub account name; default repository owner and User-Agent.
    pub owner: String,
}

impl Credentials {
    /// Load credentials from a dotenv file.
    ///
    /// A missing file yields empty credentials, which sends the user
    /// through setup. Unknown keys are ignored.
    pub fn from_file(path: &Path) -> Result<Self, CredentialsError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let entries = dotenv::from_path_iter(path).map_err(|e| CredentialsError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut credentials = Self::default();
        for entry in entries {
            let (key, value) = entry.map_err(|e| CredentialsError::Read {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
            match key.as_str() {
                keys::TOKEN => credentials.token = value,
                keys::SECRET => credentials.secret = value,
                keys::WEBHOOK_URL => credentials.webhook_url = value,
                keys::OWNER => credentials.owner = value,
                _ => {}
            }
        }

        Ok(credentials)
    }

    /// Overwrite the credentials file with these values.
    ///
    /// Creates the parent directory when missing.
    pub fn save(&self, path: &Path) -> Result<(), CredentialsError> {
        let write_err = |source| CredentialsError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        fs::write(path, self.to_dotenv()).map_err(write_err)
    }

    /// Whether a token is present; without one every command needs setup first.
    pub fn is_configured(&self) -> bool {
        !self.token.trim().is_empty()
    }

    fn to_dotenv(&self) -> String {
        [
            (keys::TOKEN, &self.token),
            (keys::SECRET, &self.secret),
            (keys::WEBHOOK_URL, &self.webhook_url),
            (keys::OWNER, &self.owner),
        ]
        .iter()
        .map(|(key, value)| format!("{}='{}'", key, quote_escape(value)))
        .collect::<Vec<_>>()
        .join("\n")
            + "\n"
    }
}

/// Single quotes end a strong-quoted dotenv value, so close the quote, emit an
/// escaped `'` and reopen it.
fn quote_escape(value: &str) -> String {
    value.replace('\'', r"'\''")
}
