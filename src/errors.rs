use reqwest::StatusCode;
use thiserror::Error;

/// Why a render pass was abandoned before touching the page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with status {status}")]
    Status { url: String, status: StatusCode },
    #[error("malformed stats body: {0}")]
    Parse(#[from] serde_json::Error),
}
