use serde::Serialize;
use thiserror::Error;

/// Everything that can go wrong between building a prompt and holding a
/// parsed, validated payload.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("API key is not configured")]
    MissingApiKey,

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Model API returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Safety block: {0}")]
    Blocked(String),

    #[error("Model returned no content")]
    EmptyResponse,

    #[error("Malformed model output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Model output failed validation: {0}")]
    Invalid(String),
}

/// Coarse failure categories surfaced to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    RateLimited,
    InvalidCredential,
    SafetyBlocked,
    Unknown,
}

impl FailureKind {
    /// Structured signals first, then the same substring heuristics applied
    /// to the rendered error for anything the API only reports in text.
    pub fn classify(err: &ModelError) -> Self {
        match err {
            ModelError::Status { status: 429, .. } => return Self::RateLimited,
            ModelError::Status { status: 401 | 403, .. } | ModelError::MissingApiKey => {
                return Self::InvalidCredential;
            }
            ModelError::Blocked(_) => return Self::SafetyBlocked,
            _ => {}
        }

        let text = err.to_string();
        if text.contains("429") || text.contains("RESOURCE_EXHAUSTED") {
            Self::RateLimited
        } else if text.contains("API key") || text.contains("API_KEY_INVALID") {
            Self::InvalidCredential
        } else if text.contains("Safety") || text.contains("SAFETY") {
            Self::SafetyBlocked
        } else {
            Self::Unknown
        }
    }

    /// Short user-facing description, placed in the fallback translation.
    pub fn message(&self) -> &'static str {
        match self {
            Self::RateLimited => "System overloaded (429).",
            Self::InvalidCredential => "Invalid API Key.",
            Self::SafetyBlocked => "Safety Block.",
            Self::Unknown => "Error.",
        }
    }
}
