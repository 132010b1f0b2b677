//! SQLite test infrastructure
//!
//! Provides a `TestDatabase` helper backed by a private in-memory SQLite
//! database with the workspace migrations applied.

use database::sqlite::{self, SqliteConfig};
use migration::Migrator;
use sea_orm::DatabaseConnection;

/// Test database wrapper
///
/// Every instance owns its own in-memory database, which disappears when the
/// last connection of the pool is dropped.
pub struct TestDatabase {
    pub connection: DatabaseConnection,
}

impl TestDatabase {
    /// Create a new test database with migrations applied
    ///
    /// # Example
    ///
    /// ```no_run
    /// use test_utils::TestDatabase;
    ///
    /// # async fn example() {
    /// let db = TestDatabase::new().await;
    /// // Use db.connection() to create your store
    /// # }
    /// ```
    pub async fn new() -> Self {
        let connection = sqlite::connect_from_config(SqliteConfig::in_memory())
            .await
            .expect("Failed to open in-memory SQLite database");

        sqlite::run_migrations::<Migrator>(&connection, "test")
            .await
            .expect("Failed to run migrations on test database");

        tracing::info!("Test database ready (in-memory SQLite)");

        Self { connection }
    }

    /// Get a clone of the database connection
    pub fn connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }
}
