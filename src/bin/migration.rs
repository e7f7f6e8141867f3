//! Schema migration runner
//!
//! Run with: cargo run --bin migration -- up

use anyhow::Context;
use clap::{Parser, Subcommand};
use migrations::{Migrator, MigratorTrait};
use tracing::info;

use crm_portal::{config, db};

#[derive(Debug, Parser)]
#[command(name = "migration", about = "Apply or roll back crm-portal schema migrations")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply all pending migrations (default)
    Up,
    /// Roll back the most recent migrations
    Down {
        #[arg(long, default_value_t = 1)]
        steps: u32,
    },
    /// Print applied and pending migrations
    Status,
    /// Drop every table and re-apply all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config().context("failed to load configuration")?;
    let db = db::establish_connection_from_app_config(&cfg)
        .await
        .context("failed to connect to the database")?;

    match cli.command.unwrap_or(Command::Up) {
        Command::Up => {
            db::run_migrations(&db).await?;
        }
        Command::Down { steps } => {
            info!(steps, "Rolling back migrations");
            Migrator::down(&db, Some(steps)).await?;
        }
        Command::Status => {
            Migrator::status(&db).await?;
        }
        Command::Fresh => {
            info!("Dropping all tables and re-applying migrations");
            Migrator::fresh(&db).await?;
        }
    }

    db::close_pool(db).await?;
    info!("Migration command completed successfully");

    Ok(())
}
