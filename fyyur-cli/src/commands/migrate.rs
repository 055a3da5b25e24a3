//! Schema migration command

use anyhow::{Context, Result};
use clap::Parser;

use fyyur_server::db::{self, create_pool};

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

/// Apply the schema migrations and exit
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let database_url = args
        .database_url
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;

    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    db::migrations::run(&pool)
        .await
        .context("Failed to run schema migrations")?;

    tracing::info!("Migrations applied");
    Ok(())
}
