use grocer_pantry::PantryStoreError;
use thiserror::Error;

use crate::SessionStoreError;

/// Failures that abort a turn. Model, recipe and retailer problems never
/// show up here; they degrade to fallbacks or user-facing messages.
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error(transparent)]
    Pantry(#[from] PantryStoreError),

    #[error(transparent)]
    Session(#[from] SessionStoreError),
}
