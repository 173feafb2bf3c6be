pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod observability;
pub mod routes;
pub mod session;

use std::sync::Arc;

use grocer_assistant::Assistant;
use grocer_kroger::{KrogerClient, KrogerConfig};
use grocer_llm::{ChatModelConfig, DisabledModel, LanguageModel, OpenAiChatModel};
use grocer_pantry::JsonFilePantryStore;
use grocer_recipe::MealDbClient;
use sqlx::SqlitePool;

pub use routes::AppState;

use crate::config::Config;
use crate::session::SqliteSessionStore;

/// Build the assistant with its production collaborators
pub fn build_assistant(config: &Config, pool: SqlitePool) -> anyhow::Result<Assistant> {
    let model: Arc<dyn LanguageModel> = match config.llm.api_key.as_deref() {
        Some(key) if !key.trim().is_empty() => Arc::new(OpenAiChatModel::new(ChatModelConfig {
            api_key: key.to_owned(),
            base_url: config.llm.base_url.to_owned(),
            model: config.llm.model.to_owned(),
            timeout: config.llm.timeout(),
        })?),
        _ => {
            tracing::warn!("No LLM API key configured, using keyword rules only");
            Arc::new(DisabledModel)
        }
    };

    if config.kroger.access_token.is_empty() {
        tracing::warn!("No Kroger access token configured, cart requests will fail");
    }

    let retailer = KrogerClient::new(KrogerConfig {
        base_url: config.kroger.base_url.to_owned(),
        access_token: config.kroger.access_token.to_owned(),
        timeout: config.llm.timeout(),
    })?;

    let recipes = MealDbClient::new(config.recipes.base_url.to_owned(), config.llm.timeout())?;

    let assistant = Assistant::new(
        model,
        Arc::new(recipes),
        Arc::new(retailer),
        Arc::new(JsonFilePantryStore::new(&config.pantry.path)),
        Arc::new(SqliteSessionStore::new(pool)),
    )
    .with_meal_plan_source(config.recipes.source);

    tracing::info!(
        meal_plan_source = %config.recipes.source,
        pantry = %config.pantry.path,
        "Assistant ready"
    );

    Ok(assistant)
}
