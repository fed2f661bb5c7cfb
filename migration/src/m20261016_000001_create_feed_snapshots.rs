use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One row per poll of the upstream ANSS feed
        manager
            .create_table(
                Table::create()
                    .table(FeedSnapshots::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeedSnapshots::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FeedSnapshots::ArchivedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FeedSnapshots::Kind).string_len(32).not_null())
                    .col(ColumnDef::new(FeedSnapshots::Format).string_len(32).not_null())
                    .col(ColumnDef::new(FeedSnapshots::Timeframe).string_len(32).not_null())
                    .col(ColumnDef::new(FeedSnapshots::ContentPath).string_len(1024).null())
                    // Metadata block, copied from the payload once the content is archived
                    .col(ColumnDef::new(FeedSnapshots::GeneratedAt).big_integer().null())
                    .col(ColumnDef::new(FeedSnapshots::SourceUrl).string_len(5000).null())
                    .col(ColumnDef::new(FeedSnapshots::Title).string_len(5000).null())
                    .col(ColumnDef::new(FeedSnapshots::ApiVersion).string_len(5000).null())
                    .col(ColumnDef::new(FeedSnapshots::EventCount).integer().null())
                    .col(ColumnDef::new(FeedSnapshots::ResponseStatus).integer().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_feed_snapshots_archived_at")
                    .table(FeedSnapshots::Table)
                    .col(FeedSnapshots::ArchivedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FeedSnapshots::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FeedSnapshots {
    Table,
    Id,
    ArchivedAt,
    Kind,
    Format,
    Timeframe,
    ContentPath,
    GeneratedAt,
    SourceUrl,
    Title,
    ApiVersion,
    EventCount,
    ResponseStatus,
}
