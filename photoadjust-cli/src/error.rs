//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use photoadjust::exposure::UpdateError;
use photoadjust::http::HttpError;
use photoadjust::project::ProjectError;
use std::fmt;
use std::process;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Command line arguments do not add up
    InvalidArguments(String),
    /// Failed to create the HTTP client
    HttpClient(HttpError),
    /// Failed to talk to the project service
    Project(ProjectError),
    /// The update pass failed
    Update(UpdateError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::InvalidArguments(_) => {
                eprintln!();
                eprintln!("Run 'photoadjust --help' for usage.");
            }
            CliError::Update(UpdateError::ReflectanceNotImplemented(_)) => {
                eprintln!();
                eprintln!("Exposure times can only be updated for projects whose");
                eprintln!("reflectance mode is 'none'.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {}", msg),
            CliError::HttpClient(e) => write!(f, "Failed to create HTTP client: {}", e),
            CliError::Project(e) => write!(f, "Failed to reach project service: {}", e),
            CliError::Update(e) => write!(f, "Exposure-time update failed: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::HttpClient(e) => Some(e),
            CliError::Project(e) => Some(e),
            CliError::Update(e) => Some(e),
            _ => None,
        }
    }
}

impl From<UpdateError> for CliError {
    fn from(e: UpdateError) -> Self {
        CliError::Update(e)
    }
}
