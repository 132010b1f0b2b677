//! SQLite database connector and utilities
//!
//! Provides connection management and migration running.

mod config;
mod connector;

pub use config::{SqliteConfig, DEFAULT_DATABASE_URL, IN_MEMORY_DATABASE_URL};
pub use connector::{connect, connect_from_config, connect_with_options, run_migrations};

// Re-export SeaORM types for convenience
pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
pub use sea_orm_migration::MigratorTrait;
