//! Error types for the extraction pipeline.
//!
//! [`SessionError`] is what the rendering layer reports. [`ExtractError`] is
//! the only error a caller of the core ever sees; [`classify`] is the single
//! bridge between the two.

use thiserror::Error;

/// Request-level failure returned by the core.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Empty or missing city/district.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The page did not become ready in time.
    #[error("Page did not load in time. URL: {url}")]
    Timeout { url: String },

    /// Page structure required for navigation was not found.
    #[error("Weather elements not found: {detail}. URL: {url}")]
    NotFound { url: String, detail: String },

    /// Anything else, message preserved for diagnostics.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ExtractError {
    /// HTTP status an upstream router should answer with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ExtractError::InvalidInput(_) => 400,
            ExtractError::Timeout { .. } => 504,
            ExtractError::NotFound { .. } => 404,
            ExtractError::Internal(_) => 500,
        }
    }
}

/// Failure reported by a rendering session.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error("wait timed out: {0}")]
    Timeout(String),

    #[error("element not found: {0}")]
    ElementNotFound(String),

    #[error("session already released")]
    Released,

    #[error("automation error: {0}")]
    Automation(String),
}

impl SessionError {
    /// Sort an error coming out of `headless_chrome` into a session error.
    pub(crate) fn from_chrome(err: anyhow::Error) -> Self {
        if err.downcast_ref::<headless_chrome::util::Timeout>().is_some() {
            SessionError::Timeout(err.to_string())
        } else if err.downcast_ref::<headless_chrome::browser::tab::NoElementFound>().is_some() {
            SessionError::ElementNotFound(err.to_string())
        } else {
            SessionError::Automation(format!("{err:#}"))
        }
    }
}

/// Map a rendering failure that escaped field isolation onto the request
/// taxonomy.
pub fn classify(err: SessionError, url: &str) -> ExtractError {
    match err {
        SessionError::Timeout(_) => ExtractError::Timeout { url: url.to_string() },
        SessionError::ElementNotFound(detail) => {
            ExtractError::NotFound { url: url.to_string(), detail }
        }
        other => ExtractError::Internal(other.to_string()),
    }
}
