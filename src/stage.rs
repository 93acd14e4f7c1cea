//! Outcomes and errors of the optional pipeline stages
//!
//! Optional stages never return `Err` to the pipeline. They report either
//! the data they produced or a short reason they were skipped.

use std::io;

/// Result of one optional stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome<T> {
    Enhanced(T),
    /// Human-readable reason, suitable for a one-line notice
    Skipped(String),
}

impl<T> StageOutcome<T> {
    pub fn skipped(reason: impl Into<String>) -> Self {
        StageOutcome::Skipped(reason.into())
    }

    pub fn is_enhanced(&self) -> bool {
        matches!(self, StageOutcome::Enhanced(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, StageOutcome::Skipped(_))
    }

    /// The produced value, if any
    pub fn enhanced(self) -> Option<T> {
        match self {
            StageOutcome::Enhanced(value) => Some(value),
            StageOutcome::Skipped(_) => None,
        }
    }

    pub fn skip_reason(&self) -> Option<&str> {
        match self {
            StageOutcome::Enhanced(_) => None,
            StageOutcome::Skipped(reason) => Some(reason),
        }
    }
}

/// Failures inside the AI-backed stages
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error("OPENAI_API_KEY is not set")]
    MissingCredentials,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid image payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("file error: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        let done: StageOutcome<u32> = StageOutcome::Enhanced(3);
        let skipped: StageOutcome<u32> = StageOutcome::skipped("no key");

        assert!(done.is_enhanced());
        assert_eq!(done.skip_reason(), None);
        assert_eq!(done.enhanced(), Some(3));
        assert_eq!(skipped.skip_reason(), Some("no key"));
        assert_eq!(skipped.enhanced(), None);
    }
}
