use std::collections::HashMap;

use async_trait::async_trait;
use grocer_shared::SessionState;
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Error, Debug)]
pub enum SessionStoreError {
    #[error("session storage failed: {0}")]
    Storage(Box<dyn std::error::Error + Send + Sync>),

    #[error("session state is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Per-session conversation state. Loading an unknown id yields a fresh
/// default state; the first save creates it.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, session_id: &str) -> Result<SessionState, SessionStoreError>;

    async fn save(&self, session_id: &str, state: &SessionState) -> Result<(), SessionStoreError>;
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<String, SessionState>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, session_id: &str) -> Result<SessionState, SessionStoreError> {
        Ok(self
            .sessions
            .lock()
            .await
            .get(session_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn save(&self, session_id: &str, state: &SessionState) -> Result<(), SessionStoreError> {
        self.sessions
            .lock()
            .await
            .insert(session_id.to_owned(), state.clone());
        Ok(())
    }
}
