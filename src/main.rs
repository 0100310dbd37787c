use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod catalog;
mod commands;
mod config;
mod db;

use catalog::AppCatalog;
use commands::{AuthCommand, ConfigCommand, NutritionCommand, ReflectionCommand, WorkoutCommand};
use config::Config;
use db::{init_db, SqliteKvStore};
use fittrack_core::{AuthStore, NutritionStore, ReflectionStore, WorkoutStore};

#[derive(Parser)]
#[command(name = "fittrack")]
#[command(version)]
#[command(about = "Track workouts, nutrition and hydration from the terminal", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in, sign up or continue as guest
    Auth(AuthCommand),

    /// Browse plans, run sessions and view workout stats
    Workout(WorkoutCommand),

    /// Log meals and water, view daily totals
    Nutrition(NutritionCommand),

    /// Keep a journal of reflections
    Reflection(ReflectionCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Save config path for config commands
    let cli_config_path = cli.config.clone();

    // Load configuration
    let config = Config::load(cli.config)?;
    init_tracing(&config.log_level.value);

    match cli.command {
        Some(Commands::Auth(cmd)) => {
            let mut store = AuthStore::new(open_storage(&config).await?);
            cmd.run(&mut store).await?;
        }
        Some(Commands::Workout(cmd)) => {
            let storage = open_storage(&config).await?;
            let mut store = WorkoutStore::new(storage, AppCatalog::from_config(&config));
            cmd.run(&mut store).await?;
        }
        Some(Commands::Nutrition(cmd)) => {
            let storage = open_storage(&config).await?;
            let mut store = NutritionStore::new(storage, AppCatalog::from_config(&config));
            cmd.run(&mut store).await?;
        }
        Some(Commands::Reflection(cmd)) => {
            let mut store = ReflectionStore::new(open_storage(&config).await?);
            cmd.run(&mut store).await?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config, cli_config_path)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

async fn open_storage(config: &Config) -> Result<SqliteKvStore, sqlx::Error> {
    let pool = init_db(&config.database_path.value).await?;
    Ok(SqliteKvStore::new(pool))
}

/// Logs go to stderr so command output stays pipeable.
fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
