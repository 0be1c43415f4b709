//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_member;
mod m20240101_000002_create_reservation_time;
mod m20240101_000003_create_theme;
mod m20240101_000004_create_reservation;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_member::Migration),
            Box::new(m20240101_000002_create_reservation_time::Migration),
            Box::new(m20240101_000003_create_theme::Migration),
            Box::new(m20240101_000004_create_reservation::Migration),
        ]
    }
}
