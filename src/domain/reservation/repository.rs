//! Reservation repository interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::Reservation;
use crate::domain::DomainResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Insert a new reservation. Only `time.id` and `theme.id` are stored;
    /// the returned value keeps the embedded time and theme as given.
    async fn save(&self, reservation: Reservation) -> DomainResult<Reservation>;

    /// All reservations with time and theme resolved, ordered by id
    async fn find_all(&self) -> DomainResult<Vec<Reservation>>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>>;

    async fn find_all_by_time_id(&self, time_id: i32) -> DomainResult<Vec<Reservation>>;

    async fn find_all_by_theme_id(&self, theme_id: i32) -> DomainResult<Vec<Reservation>>;

    async fn find_all_by_date_and_theme_id(
        &self,
        date: NaiveDate,
        theme_id: i32,
    ) -> DomainResult<Vec<Reservation>>;

    async fn exists_by_id(&self, id: i32) -> DomainResult<bool>;

    async fn exists_by_time_id(&self, time_id: i32) -> DomainResult<bool>;

    async fn exists_by_theme_id(&self, theme_id: i32) -> DomainResult<bool>;

    async fn exists_by_date_and_time_and_theme(
        &self,
        date: NaiveDate,
        time_id: i32,
        theme_id: i32,
    ) -> DomainResult<bool>;

    async fn delete_by_id(&self, id: i32) -> DomainResult<()>;
}
