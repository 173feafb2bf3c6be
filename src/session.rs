use async_trait::async_trait;
use grocer_assistant::{SessionStore, SessionStoreError};
use grocer_shared::SessionState;
use sqlx::SqlitePool;
use time::OffsetDateTime;

/// Sessions persisted as JSON documents in the `sessions` table
#[derive(Clone)]
pub struct SqliteSessionStore {
    pool: SqlitePool,
}

impl SqliteSessionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn storage(err: sqlx::Error) -> SessionStoreError {
    SessionStoreError::Storage(Box::new(err))
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn load(&self, session_id: &str) -> Result<SessionState, SessionStoreError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT state FROM sessions WHERE id = ?")
            .bind(session_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;

        match row {
            Some((state,)) => Ok(serde_json::from_str(&state)?),
            None => Ok(SessionState::default()),
        }
    }

    async fn save(&self, session_id: &str, state: &SessionState) -> Result<(), SessionStoreError> {
        let state = serde_json::to_string(state)?;

        sqlx::query(
            r#"
            INSERT INTO sessions (id, state, updated_at) VALUES (?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET state = excluded.state, updated_at = excluded.updated_at
            "#,
        )
        .bind(session_id)
        .bind(state)
        .bind(OffsetDateTime::now_utc().unix_timestamp())
        .execute(&self.pool)
        .await
        .map_err(storage)?;

        Ok(())
    }
}
