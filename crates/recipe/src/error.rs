use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecipeSourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("recipe API responded with status {0}")]
    Status(u16),
}
