use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Append-only activity trail keyed by complaint. user_id is
        // nullable: entries written on behalf of the system carry no actor.
        manager
            .create_table(
                Table::create()
                    .table(ActivityLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActivityLogs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ActivityLogs::ComplaintId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ActivityLogs::Action).text().not_null())
                    .col(ColumnDef::new(ActivityLogs::UserId).string().null())
                    .col(
                        ColumnDef::new(ActivityLogs::Timestamp)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_activity_logs_complaint_time")
                    .table(ActivityLogs::Table)
                    .col(ActivityLogs::ComplaintId)
                    .col(ActivityLogs::Timestamp)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActivityLogs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ActivityLogs {
    Table,
    Id,
    ComplaintId,
    Action,
    UserId,
    Timestamp,
}
