mod client;

pub use client::JishoClient;

use jisho_types::ResultSet;

/// Dictionary lookup provider interface
#[async_trait::async_trait]
pub trait DictionaryLookup: Send + Sync {
    /// Search the dictionary for `keyword`, one request, no retry
    async fn search(&self, keyword: &str) -> Result<ResultSet, LookupError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Dictionary service returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("Malformed dictionary response: {0}")]
    Decode(#[from] serde_json::Error),
}
