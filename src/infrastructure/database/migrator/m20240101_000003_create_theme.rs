//! Create theme table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Theme::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Theme::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Theme::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Theme::Description).text().not_null())
                    .col(ColumnDef::new(Theme::Thumbnail).string_len(1024).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Theme::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Theme {
    Table,
    Id,
    Name,
    Description,
    Thumbnail,
}
