//! Error type shared across the matcher.

use thiserror::Error;

use crate::traits::Timestamp;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("invalid interval [{low}, {high}): low must be before high")]
    InvalidInterval { low: Timestamp, high: Timestamp },

    #[error("duplicate driver id: {0}")]
    DuplicateDriver(String),

    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario: {0}")]
    Scenario(#[from] serde_json::Error),

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}
