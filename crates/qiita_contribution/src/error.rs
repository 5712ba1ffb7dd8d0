//! Error types for the contribution report.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContributionError {
    /// Bad operator input. Raised before any network call.
    #[error("argument error: {0}")]
    Argument(String),

    #[error("API error: {0}")]
    Api(#[from] qiita_client::QiitaError),

    #[error("output error: {0}")]
    Output(#[from] std::io::Error),

    #[error("no user was able to get the information")]
    NoContributions,
}

/// Result type alias for report operations.
pub type ContributionResult<T> = Result<T, ContributionError>;
