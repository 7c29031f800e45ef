//! # talerts
//!
//! A command-line tool that manages GitHub repository webhooks for one user.
//!
//! This library provides functionality to:
//! - Create, delete, activate and deactivate repository webhooks on GitHub
//! - Track which repositories have a webhook in a local JSON state file
//! - Keep that state in step with GitHub: the remote call always happens
//!   first, and local state changes only after it succeeded
//! - Collect credentials through an interactive setup form
//!
//! ## Modules
//!
//! - [`app`] - Command dispatch
//! - [`app_deps`] - Traits for the GitHub client and prompt, with real implementations
//! - [`cli`] - Command-line arguments
//! - [`credentials`] - Credentials file loading and saving
//! - [`github`] - GitHub API client for repository webhooks
//! - [`orchestrator`] - Per-command state transitions
//! - [`prompt`] - Interactive setup form
//! - [`render`] - Table output for `list`
//! - [`store`] - Local webhook state
//! - [`validation`] - Input validation utilities
//! - [`paths`] - XDG-compliant path resolution
//! - [`errors`] - Structured error types
//! - [`constants`] - Application constants

pub mod app;
pub mod app_deps;
pub mod cli;
pub mod constants;
pub mod credentials;
pub mod errors;
pub mod github;
pub mod orchestrator;
pub mod paths;
pub mod prompt;
pub mod render;
pub mod store;
pub mod validation;
