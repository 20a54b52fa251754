use anyhow::Context;
use clap::{Parser, Subcommand};
use sqlx::SqlitePool;
use std::path::PathBuf;
use trivia_api::config::get_configuration;
use trivia_api::db::{self, establish_connection, run_migrations};
use trivia_api::telemetry::init_tracing;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Connection string, overrides the configured database
    #[clap(long)]
    database_url: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the tables
    Migrate,
    /// Import categories.csv and questions.csv from a directory
    Import { path: PathBuf },
    /// Export categories.csv and questions.csv to a directory
    Export { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let mut settings = get_configuration().context("Failed to read configuration")?;
    if cli.database_url.is_some() {
        settings.database.url = cli.database_url;
    }
    let pool = establish_connection(&settings.database)
        .await
        .context("Cannot connect to DB")?;
    run_migrations(&pool).await?;

    match cli.command {
        Commands::Migrate => tracing::info!("Schema is up to date"),
        Commands::Export { path } => export_data(&pool, path).await.context("Cannot export")?,
        Commands::Import { path } => import_data(&pool, path).await.context("Cannot import")?,
    }
    Ok(())
}

async fn export_data(pool: &SqlitePool, path: PathBuf) -> anyhow::Result<()> {
    let categories = db::queries::categories::get_all_categories(pool).await?;
    let questions = db::queries::questions::get_all_questions(pool).await?;
    db::transfer::export_to(&path, &categories, &questions)?;
    tracing::info!(
        "Exported {} categories and {} questions to {}",
        categories.len(),
        questions.len(),
        path.display()
    );
    Ok(())
}

async fn import_data(pool: &SqlitePool, path: PathBuf) -> anyhow::Result<()> {
    let (categories, questions) = db::transfer::import_from(&path)?;
    let (n_categories, n_questions) = (categories.len(), questions.len());
    db::queries::categories::import_categories(pool, categories).await?;
    db::queries::questions::import_questions(pool, questions).await?;
    tracing::info!("Imported {n_categories} categories and {n_questions} questions");
    Ok(())
}
