use anyhow::Result;
use clap::{Parser, Subcommand};
use sqlx::migrate::MigrateDatabase;

/// grocer-genie - conversational grocery assistant
#[derive(Parser)]
#[command(name = "grocer-genie")]
#[command(about = "Pantry tracking, meal planning and Kroger cart filling", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Chat with the assistant in the terminal
    Chat {
        /// Resume an existing session
        #[arg(long)]
        session: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = grocer_genie::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    grocer_genie::observability::init_observability(
        "grocer-genie",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => serve_command(config, host, port).await,
        Commands::Migrate => migrate_command(config).await,
        Commands::Chat { session } => chat_command(config, session).await,
    }
}

#[tracing::instrument(skip(config))]
async fn serve_command(
    config: grocer_genie::config::Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    grocer_genie::cli::server::serve(config, host_override, port_override).await
}

#[tracing::instrument(skip(config))]
async fn migrate_command(config: grocer_genie::config::Config) -> Result<()> {
    tracing::info!("Running database migrations...");

    if !sqlx::Sqlite::database_exists(&config.database.url).await? {
        tracing::info!("Database does not exist, creating: {}", config.database.url);
        sqlx::Sqlite::create_database(&config.database.url).await?;
    }

    let pool = grocer_genie::db::create_pool(&config.database.url, 1).await?;
    grocer_genie::db::run_migrations(&pool).await?;
    pool.close().await;

    tracing::info!("Migrations completed successfully");

    Ok(())
}

#[tracing::instrument(skip(config))]
async fn chat_command(config: grocer_genie::config::Config, session: Option<String>) -> Result<()> {
    grocer_genie::cli::chat::chat(config, session).await
}
