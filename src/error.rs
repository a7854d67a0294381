use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("backend url is required")]
    MissingUrl,

    #[error("Invalid backend url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("api key is required")]
    MissingKey,

    #[error("timeout must be at least one second")]
    InvalidTimeout,

    #[error("Invalid header {0}")]
    InvalidHeader(String),

    #[error("Http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend responded {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Shared client already initialized")]
    AlreadyInitialized,

    #[error("Shared client not initialized")]
    NotInitialized,
}

pub type Result<T> = std::result::Result<T, ClientError>;
