//! Todo
//!
//! Command-line front end for the to-do list. Every subcommand drives the
//! same view-models a graphical front end would, against a SQLite database.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv};
use domain_tasks::{SqliteTaskStore, TasksFilterType, TasksRepository};
use eyre::{Result, WrapErr};
use migration::Migrator;
use tracing::info;

mod commands;
mod config;

use commands::App;
use config::Config;

#[derive(Parser)]
#[command(name = "todo")]
#[command(about = "Keep track of your TO-DOs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List tasks
    List {
        /// Which tasks to show (all, active, completed)
        #[arg(short, long, default_value_t = TasksFilterType::All)]
        filter: TasksFilterType,

        /// Reload from the database instead of the cache
        #[arg(long)]
        force: bool,

        /// Print the tasks as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single task
    Show { id: String },

    /// Add a new task
    Add {
        #[arg(short, long, default_value = "")]
        title: String,

        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Edit the title or description of a task
    Edit {
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Mark a task as completed
    Complete { id: String },

    /// Mark a task as active again
    Activate { id: String },

    /// Delete a task
    Delete { id: String },

    /// Delete every completed task
    ClearCompleted,
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();

    let environment = Environment::from_env();
    init_tracing(&environment);

    let config = Config::from_env()?;
    let cli = Cli::parse();

    info!(url = %config.database.url(), "Opening task database");
    let db = database::sqlite::connect_from_config(config.database.clone())
        .await
        .wrap_err("Database connection failed")?;
    database::sqlite::run_migrations::<Migrator>(&db, "todo")
        .await
        .wrap_err("Database migration failed")?;

    let store = Arc::new(SqliteTaskStore::new(db));
    let repository = Arc::new(TasksRepository::with_latency(
        store,
        config.latency.service_latency(),
    ));
    let app = App::new(repository);

    match cli.command {
        Commands::List {
            filter,
            force,
            json,
        } => app.list(filter, force, json).await,
        Commands::Show { id } => app.show(&id).await,
        Commands::Add { title, description } => app.add(title, description).await,
        Commands::Edit {
            id,
            title,
            description,
        } => app.edit(&id, title, description).await,
        Commands::Complete { id } => app.set_completed(&id, true).await,
        Commands::Activate { id } => app.set_completed(&id, false).await,
        Commands::Delete { id } => app.delete(&id).await,
        Commands::ClearCompleted => app.clear_completed().await,
    }
}
