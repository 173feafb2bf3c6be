use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("language model is not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("model returned no choices")]
    EmptyResponse,
}
