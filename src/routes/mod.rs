use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use grocer_assistant::Assistant;
use sqlx::SqlitePool;

mod chat;
mod health;

pub use chat::SESSION_COOKIE;

#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<Assistant>,
    pub pool: SqlitePool,
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .merge(
            Router::new()
                .route("/chat-with-agent", post(chat::chat_with_agent))
                .route("/set-zipcode", post(chat::set_zipcode))
                .with_state(app_state),
        )
}
