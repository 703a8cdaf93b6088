//! Error types for the translation system.

use thiserror::Error;

/// Result type alias for translation operations.
pub type Result<T> = std::result::Result<T, TranslateError>;

/// Errors that can occur while translating.
#[derive(Error, Debug)]
pub enum TranslateError {
    /// Provider not configured.
    #[error("translation provider not configured")]
    ProviderNotConfigured,

    /// API request failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// Invalid response from provider.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit or quota exceeded.
    #[error("rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// HTTP error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Translating a node of the tree failed; the whole run is abandoned.
    #[error("translation failed at {path} (chunk {chunk} of {chunks}): {source}")]
    TranslationFailure {
        path: String,
        chunk: usize,
        chunks: usize,
        #[source]
        source: Box<TranslateError>,
    },
}
