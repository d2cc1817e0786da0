#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("No information found")]
    EmptyResult,
}

/// Failures of the outbound display transport
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Transport rejected request with {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Invalid transport URL: {0}")]
    InvalidUrl(String),

    #[error("Unexpected transport response: {0}")]
    Decode(String),
}

#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// The cursor moved but the bound message could not be updated
    #[error("Failed to push page {cursor} to the bound message: {source}")]
    Dispatch {
        cursor: usize,
        #[source]
        source: DisplayError,
    },
}
