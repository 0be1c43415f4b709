//! Create reservation_time table
//!
//! Time-of-day slots. `start_at` is unique so two concurrent inserts of the
//! same slot cannot both succeed.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ReservationTime::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReservationTime::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ReservationTime::StartAt).time().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservation_time_start_at")
                    .table(ReservationTime::Table)
                    .col(ReservationTime::StartAt)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReservationTime::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ReservationTime {
    Table,
    Id,
    StartAt,
}
