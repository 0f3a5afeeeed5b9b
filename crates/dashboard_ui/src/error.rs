use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Invalid base URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),

    #[error("GET {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GET {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Response from {url} is not a label/amount object: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Chart backend error: {0}")]
    Backend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
