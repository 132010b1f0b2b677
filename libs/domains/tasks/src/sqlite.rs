use async_trait::async_trait;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::{entity, error::TaskResult, models::Task, store::TaskStore};

/// Task store backed by the `tasks` table of a SQLite database
#[derive(Debug, Clone)]
pub struct SqliteTaskStore {
    db: DatabaseConnection,
}

impl SqliteTaskStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    async fn get_all(&self) -> TaskResult<Vec<Task>> {
        let models = entity::Entity::find().all(&self.db).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn get_by_id(&self, id: &str) -> TaskResult<Option<Task>> {
        let model = entity::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn insert(&self, task: Task) -> TaskResult<()> {
        let task_id = task.id.clone();
        let active_model: entity::ActiveModel = task.into();

        entity::Entity::insert(active_model)
            .on_conflict(
                OnConflict::column(entity::Column::Id)
                    .update_columns([
                        entity::Column::Title,
                        entity::Column::Description,
                        entity::Column::Completed,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        tracing::info!(task_id = %task_id, "Saved task");
        Ok(())
    }

    async fn set_completed(&self, id: &str, completed: bool) -> TaskResult<bool> {
        let result = entity::Entity::update_many()
            .col_expr(entity::Column::Completed, Expr::value(completed))
            .filter(entity::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        tracing::info!(task_id = %id, completed, "Updated task completion");
        Ok(result.rows_affected > 0)
    }

    async fn delete_by_id(&self, id: &str) -> TaskResult<bool> {
        let result = entity::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await?;

        if result.rows_affected > 0 {
            tracing::info!(task_id = %id, "Deleted task");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn delete_all(&self) -> TaskResult<u64> {
        let result = entity::Entity::delete_many().exec(&self.db).await?;
        tracing::info!(removed = result.rows_affected, "Deleted all tasks");
        Ok(result.rows_affected)
    }

    async fn delete_completed(&self) -> TaskResult<u64> {
        let result = entity::Entity::delete_many()
            .filter(entity::Column::Completed.eq(true))
            .exec(&self.db)
            .await?;

        tracing::info!(removed = result.rows_affected, "Deleted completed tasks");
        Ok(result.rows_affected)
    }
}
