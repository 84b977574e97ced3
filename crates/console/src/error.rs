//! Console error type.

use domain::models::FormError;
use domain::services::ScreenError;
use remote::RemoteError;
use thiserror::Error;

/// Errors surfaced by console commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Screen(#[from] ScreenError),

    #[error("Invalid field value: {0}")]
    Form(#[from] FormError),

    #[error("Could not create API client: {0}")]
    Remote(#[from] RemoteError),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 78,
            CliError::InvalidArgument(_) | CliError::Form(_) => 64,
            CliError::Screen(ScreenError::NotFound(_)) => 66,
            CliError::Screen(ScreenError::InvalidForm(_)) => 65,
            _ => 1,
        }
    }
}
