use std::fmt;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow scripts to distinguish argument mistakes from
/// failures talking to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// The detail view was rendered
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (API error, network error, config error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for the repository detail view.
///
/// Gateway transport errors stay as `anyhow::Error`; these variants carry
/// the failures the core itself understands.
#[derive(Debug, Error)]
pub enum DetailError {
    #[error("Invalid repository name: '{value}'\nReason: {reason}\n\n💡 Hint: Use the form <organization>/<repository>")]
    InvalidRepositoryName { value: String, reason: String },

    #[error("Registry API returned status {status} for {endpoint}\n\n💡 Hint: {hint}")]
    GatewayStatus {
        endpoint: String,
        status: u16,
        hint: String,
    },

    /// Validation error for value objects and config
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Controller is not active\n\n💡 Hint: Call activate() with a repository before loading data")]
    NotActivated,
}

impl DetailError {
    /// Builds a `GatewayStatus` error with a hint matching the status class
    pub fn gateway_status(endpoint: impl Into<String>, status: u16) -> Self {
        let hint = match status {
            401 | 403 => "Check the auth token and your access to this repository",
            404 => "Check that the organization and repository exist",
            500..=599 => "The registry is failing; try again later",
            _ => "Check the registry API URL",
        };
        DetailError::GatewayStatus {
            endpoint: endpoint.into(),
            status,
            hint: hint.to_string(),
        }
    }
}
