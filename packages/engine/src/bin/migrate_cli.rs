//! CLI for applying schema migrations
//!
//! Connects using DATABASE_URL and runs the embedded sqlx migrations.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use engine_core::Config;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "migrate_cli")]
#[command(about = "Schema migration CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply all pending migrations
    Run,

    /// Print the embedded migration list
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,engine_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let migrator = sqlx::migrate!("./migrations");

    match cli.command {
        Commands::Run => {
            let config = Config::from_env().context("Failed to load configuration")?;
            let pool = PgPoolOptions::new()
                .max_connections(config.max_db_connections)
                .connect(&config.database_url)
                .await
                .context("Failed to connect to database")?;

            tracing::info!("Running database migrations...");
            migrator
                .run(&pool)
                .await
                .context("Failed to run migrations")?;
            tracing::info!("Migrations complete");
        }
        Commands::List => {
            for migration in migrator.iter() {
                println!("{} {}", migration.version, migration.description);
            }
        }
    }

    Ok(())
}
