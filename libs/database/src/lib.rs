//! Database library providing the SQLite connector used by the task store
//!
//! # Features
//!
//! - `sqlite` (default) - SQLite support with SeaORM
//! - `config` - Configuration support with `core_config::FromEnv`
//!
//! # Examples
//!
//! ```ignore
//! use database::sqlite;
//! use migration::Migrator;
//!
//! let db = sqlite::connect("sqlite://todo.db?mode=rwc").await?;
//! sqlite::run_migrations::<Migrator>(&db, "todo").await?;
//! ```

#[cfg(feature = "sqlite")]
pub mod sqlite;
