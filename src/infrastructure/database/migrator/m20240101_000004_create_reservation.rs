//! Create reservation table
//!
//! Foreign keys to reservation_time and theme keep the default NO ACTION:
//! deleting a referenced slot or theme fails the statement, so it can never
//! disappear underneath a reservation. The (date, time_id, theme_id) unique
//! index backs the double-booking check.

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_reservation_time::ReservationTime;
use super::m20240101_000003_create_theme::Theme;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservation::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reservation::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reservation::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Reservation::Date).date().not_null())
                    .col(ColumnDef::new(Reservation::TimeId).integer().not_null())
                    .col(ColumnDef::new(Reservation::ThemeId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservation_time")
                            .from(Reservation::Table, Reservation::TimeId)
                            .to(ReservationTime::Table, ReservationTime::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservation_theme")
                            .from(Reservation::Table, Reservation::ThemeId)
                            .to(Theme::Table, Theme::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservation_slot")
                    .table(Reservation::Table)
                    .col(Reservation::Date)
                    .col(Reservation::TimeId)
                    .col(Reservation::ThemeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservation_theme")
                    .table(Reservation::Table)
                    .col(Reservation::ThemeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservation_time")
                    .table(Reservation::Table)
                    .col(Reservation::TimeId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservation::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Reservation {
    Table,
    Id,
    Name,
    Date,
    TimeId,
    ThemeId,
}
