use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(text(Tasks::Id).primary_key())
                    .col(text_null(Tasks::Title))
                    .col(text_null(Tasks::Description))
                    .col(boolean(Tasks::Completed).default(false))
                    .to_owned(),
            )
            .await?;

        // Clearing completed tasks filters on this column
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tasks_completed")
                    .table(Tasks::Table)
                    .col(Tasks::Completed)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_tasks_completed").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Tasks::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Tasks {
    Table,
    Id,
    Title,
    Description,
    Completed,
}
