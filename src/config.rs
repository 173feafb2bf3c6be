use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use grocer_assistant::MealPlanSource;
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub pantry: PantryConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub kroger: KrogerApiConfig,
    #[serde(default)]
    pub recipes: RecipesConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PantryConfig {
    #[serde(default = "default_pantry_path")]
    pub path: String,
}

impl Default for PantryConfig {
    fn default() -> Self {
        Self {
            path: default_pantry_path(),
        }
    }
}

fn default_pantry_path() -> String {
    "data/pantry.json".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    /// No key means every model call fails and the rule-based paths run
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_llm_base_url(),
            model: default_llm_model(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl LlmConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

fn default_llm_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_llm_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct KrogerApiConfig {
    #[serde(default = "default_kroger_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub access_token: String,
}

impl Default for KrogerApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_kroger_base_url(),
            access_token: String::new(),
        }
    }
}

fn default_kroger_base_url() -> String {
    "https://api.kroger.com/v1".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecipesConfig {
    #[serde(default = "default_recipes_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub source: MealPlanSource,
}

impl Default for RecipesConfig {
    fn default() -> Self {
        Self {
            base_url: default_recipes_base_url(),
            source: MealPlanSource::default(),
        }
    }
}

fn default_recipes_base_url() -> String {
    "https://www.themealdb.com/api/json/v1/1".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy variables (OPENAI_API_KEY, KROGER_ACCESS_TOKEN, DATABASE_URL)
    /// 2. Environment variables (GROCER__DATABASE__URL, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("database.url", "sqlite:grocer.db")?
            .set_default("database.max_connections", 5)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // The file is optional
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("GROCER")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(database_url) = env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", database_url)?;
        }
        if let Ok(api_key) = env::var("OPENAI_API_KEY") {
            builder = builder.set_override("llm.api_key", api_key)?;
        }
        if let Ok(access_token) = env::var("KROGER_ACCESS_TOKEN") {
            builder = builder.set_override("kroger.access_token", access_token)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.database.max_connections < 1 {
            return Err("Database max_connections must be at least 1".to_string());
        }
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.pantry.path.trim().is_empty() {
            return Err("Pantry path must not be empty".to_string());
        }
        if self.llm.timeout_seconds == 0 {
            return Err("LLM timeout_seconds must be greater than 0".to_string());
        }
        Ok(())
    }
}
