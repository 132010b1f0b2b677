use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::SqliteConfig;

/// Connect to a SQLite database with the default pool settings
///
/// # Example
/// ```ignore
/// use database::sqlite::connect;
///
/// let db = connect("sqlite://todo.db?mode=rwc").await?;
/// ```
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    connect_from_config(SqliteConfig::new(database_url)).await
}

/// Connect using a SqliteConfig
///
/// With FromEnv (requires `config` feature):
/// ```ignore
/// use database::sqlite::{SqliteConfig, connect_from_config};
/// use core_config::FromEnv;
///
/// let config = SqliteConfig::from_env()?;
/// let db = connect_from_config(config).await?;
/// ```
pub async fn connect_from_config(config: SqliteConfig) -> Result<DatabaseConnection, DbErr> {
    let options = config.into_connect_options();
    connect_with_options(options).await
}

/// Connect with custom connection options
pub async fn connect_with_options(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let url = options.get_url().to_string();
    let db = Database::connect(options).await?;
    info!(url = %url, "Successfully connected to SQLite database");
    Ok(db)
}

/// Run database migrations using the provided Migrator
///
/// # Example
/// ```ignore
/// use migration::Migrator;
/// use database::sqlite::run_migrations;
///
/// run_migrations::<Migrator>(&db, "todo").await?;
/// ```
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DbErr> {
    info!("Running {} database migrations...", app_name);
    M::up(db, None).await?;
    info!("Migrations completed successfully for {}", app_name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ConnectionTrait;

    #[tokio::test]
    async fn test_connect_in_memory() {
        let db = connect_from_config(SqliteConfig::in_memory()).await.unwrap();
        db.execute_unprepared("SELECT 1").await.unwrap();
    }
}
