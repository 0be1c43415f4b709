//! SeaORM implementation of ReservationRepository
//!
//! Reads always join reservation_time and theme so the returned
//! reservations carry the resolved slot and theme. All read queries share
//! one select shape (`detailed_select`) and one row mapping
//! (`row_to_domain`).

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    FromQueryResult, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Select, Set,
};

use super::db_err;
use crate::domain::reservation::{Reservation, ReservationRepository};
use crate::domain::reservation_time::ReservationTime;
use crate::domain::theme::Theme;
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{reservation, reservation_time, theme};

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch_all(&self, query: Select<reservation::Entity>) -> DomainResult<Vec<Reservation>> {
        let rows = query
            .into_model::<ReservationRow>()
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(row_to_domain).collect())
    }

    async fn count(&self, query: Select<reservation::Entity>) -> DomainResult<u64> {
        query.count(&self.db).await.map_err(db_err)
    }
}

// ── Row mapping ─────────────────────────────────────────────────

/// Flat result row of the reservation ⨝ reservation_time ⨝ theme join
#[derive(Debug, FromQueryResult)]
struct ReservationRow {
    id: i32,
    name: String,
    date: NaiveDate,
    time_id: i32,
    start_at: NaiveTime,
    theme_id: i32,
    theme_name: String,
    theme_description: String,
    theme_thumbnail: String,
}

fn row_to_domain(row: ReservationRow) -> Reservation {
    Reservation {
        id: row.id,
        name: row.name,
        date: row.date,
        time: ReservationTime {
            id: row.time_id,
            start_at: row.start_at,
        },
        theme: Theme {
            id: row.theme_id,
            name: row.theme_name,
            description: row.theme_description,
            thumbnail: row.theme_thumbnail,
        },
    }
}

fn detailed_select() -> Select<reservation::Entity> {
    reservation::Entity::find()
        .select_only()
        .column_as(reservation::Column::Id, "id")
        .column_as(reservation::Column::Name, "name")
        .column_as(reservation::Column::Date, "date")
        .column_as(reservation_time::Column::Id, "time_id")
        .column_as(reservation_time::Column::StartAt, "start_at")
        .column_as(theme::Column::Id, "theme_id")
        .column_as(theme::Column::Name, "theme_name")
        .column_as(theme::Column::Description, "theme_description")
        .column_as(theme::Column::Thumbnail, "theme_thumbnail")
        .join(JoinType::InnerJoin, reservation::Relation::ReservationTime.def())
        .join(JoinType::InnerJoin, reservation::Relation::Theme.def())
        .order_by_asc(reservation::Column::Id)
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn save(&self, r: Reservation) -> DomainResult<Reservation> {
        debug!(
            "Saving reservation: {} on {} (time {}, theme {})",
            r.name, r.date, r.time.id, r.theme.id
        );

        let model = reservation::ActiveModel {
            id: NotSet,
            name: Set(r.name.clone()),
            date: Set(r.date),
            time_id: Set(r.time.id),
            theme_id: Set(r.theme.id),
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        Ok(Reservation { id: saved.id, ..r })
    }

    async fn find_all(&self) -> DomainResult<Vec<Reservation>> {
        self.fetch_all(detailed_select()).await
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>> {
        let row = detailed_select()
            .filter(reservation::Column::Id.eq(id))
            .into_model::<ReservationRow>()
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(row.map(row_to_domain))
    }

    async fn find_all_by_time_id(&self, time_id: i32) -> DomainResult<Vec<Reservation>> {
        self.fetch_all(detailed_select().filter(reservation::Column::TimeId.eq(time_id)))
            .await
    }

    async fn find_all_by_theme_id(&self, theme_id: i32) -> DomainResult<Vec<Reservation>> {
        self.fetch_all(detailed_select().filter(reservation::Column::ThemeId.eq(theme_id)))
            .await
    }

    async fn find_all_by_date_and_theme_id(
        &self,
        date: NaiveDate,
        theme_id: i32,
    ) -> DomainResult<Vec<Reservation>> {
        self.fetch_all(
            detailed_select()
                .filter(reservation::Column::Date.eq(date))
                .filter(reservation::Column::ThemeId.eq(theme_id)),
        )
        .await
    }

    async fn exists_by_id(&self, id: i32) -> DomainResult<bool> {
        Ok(self.count(reservation::Entity::find_by_id(id)).await? > 0)
    }

    async fn exists_by_time_id(&self, time_id: i32) -> DomainResult<bool> {
        let query = reservation::Entity::find().filter(reservation::Column::TimeId.eq(time_id));
        Ok(self.count(query).await? > 0)
    }

    async fn exists_by_theme_id(&self, theme_id: i32) -> DomainResult<bool> {
        let query = reservation::Entity::find().filter(reservation::Column::ThemeId.eq(theme_id));
        Ok(self.count(query).await? > 0)
    }

    async fn exists_by_date_and_time_and_theme(
        &self,
        date: NaiveDate,
        time_id: i32,
        theme_id: i32,
    ) -> DomainResult<bool> {
        let query = reservation::Entity::find()
            .filter(reservation::Column::Date.eq(date))
            .filter(reservation::Column::TimeId.eq(time_id))
            .filter(reservation::Column::ThemeId.eq(theme_id));
        Ok(self.count(query).await? > 0)
    }

    async fn delete_by_id(&self, id: i32) -> DomainResult<()> {
        debug!("Deleting reservation: {}", id);
        reservation::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
