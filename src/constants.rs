//! Application constants for API endpoints, file locations, validation rules and
//! the fixed user-facing messages.

/// GitHub API endpoint constants.
pub mod api {
    /// REST API root requests are sent to.
    pub const BASE_URI: &str = "https://api.github.com";

    /// Upload host; the token is only ever sent to this host and `BASE_URI`.
    pub const UPLOAD_URI: &str = "https://uploads.github.com";

    /// Path template for the webhooks collection of a repository.
    pub const HOOKS_PATH_TEMPLATE: &str = "/repos/{owner}/{repo}/hooks";

    /// Path template for a single webhook of a repository.
    pub const HOOK_PATH_TEMPLATE: &str = "/repos/{owner}/{repo}/hooks/{hook_id}";

    /// Hook name GitHub requires for repository webhooks.
    pub const HOOK_NAME: &str = "web";

    /// Payload content type the webhook delivers.
    pub const CONTENT_TYPE: &str = "json";

    /// Events every created webhook subscribes to.
    pub const EVENTS: [&str; 3] = ["pull_request", "issues", "check_suite"];
}

/// File and directory names under the configuration directory.
pub mod files {
    /// Environment variable that overrides the configuration directory.
    pub const HOME_ENV: &str = "TALERTS_HOME";

    /// Directory name used under XDG config locations.
    pub const APP_DIR: &str = "talerts";

    /// Fallback directory name in the working directory.
    pub const LOCAL_DIR: &str = ".talerts";

    /// Credentials file name.
    pub const CREDENTIALS_FILE: &str = ".env";

    /// Webhook state file name.
    pub const STATE_FILE: &str = "repos.json";
}

/// Keys used in the credentials file.
pub mod keys {
    pub const TOKEN: &str = "githubToken";
    pub const SECRET: &str = "githubSecret";
    pub const WEBHOOK_URL: &str = "webhookUrl";
    pub const OWNER: &str = "owner";
}

/// Repository validation constants.
pub mod repo {
    /// Maximum length for repository owner name.
    pub const MAX_OWNER_LENGTH: usize = 39; // GitHub username limit

    /// Maximum length for repository name.
    pub const MAX_REPO_NAME_LENGTH: usize = 100;

    /// Characters GitHub accepts in a repository name.
    pub const VALID_REPO_NAME_PATTERN: &str = r"^[A-Za-z0-9_.-]+$";

    /// Characters GitHub accepts in a user or organization name.
    pub const VALID_OWNER_PATTERN: &str = r"^[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?$";
}

/// Fixed messages printed by the CLI.
pub mod messages {
    pub const HELP: &str = "possible commands: list, setup, add, remove, enable, disable";
    pub const MISSING_REPO: &str = "please specify a repo.";
    pub const NO_WEBHOOKS: &str = "no webhooks currently added.";
    pub const SETUP_INTRO: &str = "let's get you up and running first with your credentials.";
    pub const SETUP_SAVED: &str = "saved new settings.";
    pub const SETUP_CANCELLED: &str = "setup cancelled - no changes made.";
}
