use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "talerts",
    version,
    about = "Add, remove, enable and disable GitHub repository webhooks",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List repositories with a webhook and whether it is enabled
    List,
    /// Enter GitHub credentials and the webhook target
    Setup,
    /// Create an active webhook on a repository
    Add { repo: Option<String> },
    /// Delete a repository's webhook
    Remove { repo: Option<String> },
    /// Activate a repository's webhook
    Enable { repo: Option<String> },
    /// Deactivate a repository's webhook
    Disable { repo: Option<String> },
    #[command(external_subcommand)]
    Unknown(Vec<String>),
}
