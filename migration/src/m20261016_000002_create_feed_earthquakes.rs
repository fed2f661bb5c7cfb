//! Migration to create the feed_earthquakes table
//!
//! Every quake in every archived feed lands here, so the same `usgs_id`
//! shows up once per poll until it ages out of the upstream window.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FeedEarthquakes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeedEarthquakes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FeedEarthquakes::FeedSnapshotId)
                            .integer()
                            .not_null(),
                    )
                    // Identifiers
                    .col(ColumnDef::new(FeedEarthquakes::UsgsId).string_len(5000).not_null().default(""))
                    .col(ColumnDef::new(FeedEarthquakes::Net).string_len(5000).not_null().default(""))
                    .col(ColumnDef::new(FeedEarthquakes::Sources).string_len(5000).not_null().default(""))
                    .col(ColumnDef::new(FeedEarthquakes::Code).string_len(5000).not_null().default(""))
                    .col(ColumnDef::new(FeedEarthquakes::Ids).string_len(5000).not_null().default(""))
                    .col(ColumnDef::new(FeedEarthquakes::Title).string_len(5000).not_null().default(""))
                    // What
                    .col(ColumnDef::new(FeedEarthquakes::EventType).string_len(5000).not_null().default(""))
                    .col(ColumnDef::new(FeedEarthquakes::Mag).double().null())
                    .col(ColumnDef::new(FeedEarthquakes::MagType).string_len(5000).not_null().default(""))
                    .col(ColumnDef::new(FeedEarthquakes::Mmi).double().null())
                    .col(ColumnDef::new(FeedEarthquakes::Felt).integer().null())
                    .col(ColumnDef::new(FeedEarthquakes::Cdi).double().null())
                    .col(ColumnDef::new(FeedEarthquakes::Tsunami).integer().null())
                    .col(ColumnDef::new(FeedEarthquakes::Sig).integer().null())
                    .col(ColumnDef::new(FeedEarthquakes::Alert).string_len(5000).not_null().default(""))
                    // Where
                    .col(ColumnDef::new(FeedEarthquakes::Place).string_len(5000).not_null().default(""))
                    .col(ColumnDef::new(FeedEarthquakes::Longitude).double().not_null())
                    .col(ColumnDef::new(FeedEarthquakes::Latitude).double().not_null())
                    .col(ColumnDef::new(FeedEarthquakes::Epicenter).string_len(128).not_null())
                    .col(ColumnDef::new(FeedEarthquakes::DepthKm).double().null())
                    // When
                    .col(ColumnDef::new(FeedEarthquakes::OccurredAt).big_integer().null())
                    .col(ColumnDef::new(FeedEarthquakes::TimezoneOffsetMinutes).integer().null())
                    // References
                    .col(ColumnDef::new(FeedEarthquakes::Url).string_len(5000).not_null().default(""))
                    .col(ColumnDef::new(FeedEarthquakes::Detail).string_len(5000).not_null().default(""))
                    // Review
                    .col(ColumnDef::new(FeedEarthquakes::UpdatedAt).big_integer().null())
                    .col(ColumnDef::new(FeedEarthquakes::Nst).integer().null())
                    .col(ColumnDef::new(FeedEarthquakes::Dmin).double().null())
                    .col(ColumnDef::new(FeedEarthquakes::Gap).double().null())
                    .col(ColumnDef::new(FeedEarthquakes::Rms).double().null())
                    .col(ColumnDef::new(FeedEarthquakes::Status).string_len(5000).not_null().default(""))
                    .col(ColumnDef::new(FeedEarthquakes::Types).string_len(5000).not_null().default(""))
                    // Declared inline so SQLite gets the constraint too
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feed_earthquakes_feed_snapshot_id")
                            .from(FeedEarthquakes::Table, FeedEarthquakes::FeedSnapshotId)
                            .to(FeedSnapshots::Table, FeedSnapshots::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_feed_earthquakes_feed_snapshot_id")
                    .table(FeedEarthquakes::Table)
                    .col(FeedEarthquakes::FeedSnapshotId)
                    .to_owned(),
            )
            .await?;

        // Not unique: the same quake is repeated across polls
        manager
            .create_index(
                Index::create()
                    .name("idx_feed_earthquakes_usgs_id")
                    .table(FeedEarthquakes::Table)
                    .col(FeedEarthquakes::UsgsId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FeedEarthquakes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FeedEarthquakes {
    Table,
    Id,
    FeedSnapshotId,
    UsgsId,
    Net,
    Sources,
    Code,
    Ids,
    Title,
    EventType,
    Mag,
    MagType,
    Mmi,
    Felt,
    Cdi,
    Tsunami,
    Sig,
    Alert,
    Place,
    Longitude,
    Latitude,
    Epicenter,
    DepthKm,
    OccurredAt,
    TimezoneOffsetMinutes,
    Url,
    Detail,
    UpdatedAt,
    Nst,
    Dmin,
    Gap,
    Rms,
    Status,
    Types,
}

#[derive(DeriveIden)]
enum FeedSnapshots {
    Table,
    Id,
}
