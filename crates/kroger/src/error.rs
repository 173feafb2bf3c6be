use thiserror::Error;

#[derive(Error, Debug)]
pub enum RetailerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Kroger API responded with status {status}: {body}")]
    Status { status: u16, body: String },
}
