//! fyyur CLI - booking site for musical venues, artists, and shows
//!
//! Entry point for the `fyyur` command-line tool:
//! - `serve` runs the HTTP server (migrations applied on boot)
//! - `migrate` applies the schema migrations and exits
//! - `seed` loads the demo dataset for local development

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "fyyur",
    author,
    version,
    about = "Booking site for musical venues, artists, and shows",
    long_about = "Run the Fyyur web service: browse venues by city/state, search venues \
                  and artists, and list shows, all backed by PostgreSQL."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),
    /// Apply the schema migrations and exit
    Migrate(commands::migrate::MigrateArgs),
    /// Load the demo dataset for local development
    Seed(commands::seed::SeedArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env must load before clap resolves `env =` arguments
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await,
        Commands::Migrate(args) => commands::migrate::run_migrate(args).await,
        Commands::Seed(args) => commands::seed::run_seed(args).await,
    }
}
