//! XDG-compliant resolution of the configuration directory.
//!
//! The directory holds the credentials file and the webhook state file.

use std::env;
use std::path::PathBuf;

use crate::constants::files;

/// Locate the configuration directory.
/// Priority:
/// 1. TALERTS_HOME from environment (if set and non-empty)
/// 2. XDG_CONFIG_HOME/talerts (if XDG_CONFIG_HOME is set)
/// 3. ~/.config/talerts (default XDG location)
/// 4. Current directory/.talerts (fallback when no home directory is known)
pub fn config_dir() -> PathBuf {
    if let Ok(home) = env::var(files::HOME_ENV)
        && !home.trim().is_empty()
    {
        return PathBuf::from(home);
    }

    if let Ok(xdg_config_home) = env::var("XDG_CONFIG_HOME")
        && !xdg_config_home.trim().is_empty()
    {
        return PathBuf::from(xdg_config_home).join(files::APP_DIR);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".config").join(files::APP_DIR);
    }

    PathBuf::from(files::LOCAL_DIR)
}

/// Path of the credentials file.
pub fn credentials_file() -> PathBuf {
    config_dir().join(files::CREDENTIALS_FILE)
}

/// Path of the webhook state file.
pub fn state_file() -> PathBuf {
    config_dir().join(files::STATE_FILE)
}
