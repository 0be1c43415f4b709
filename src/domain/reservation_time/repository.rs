//! ReservationTime repository interface

use async_trait::async_trait;
use chrono::NaiveTime;

use super::model::ReservationTime;
use crate::domain::DomainResult;

#[async_trait]
pub trait ReservationTimeRepository: Send + Sync {
    /// Insert a new time slot and return it with its assigned id
    async fn save(&self, time: ReservationTime) -> DomainResult<ReservationTime>;

    /// All time slots, ordered by id
    async fn find_all(&self) -> DomainResult<Vec<ReservationTime>>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ReservationTime>>;

    async fn exists_by_id(&self, id: i32) -> DomainResult<bool>;

    async fn exists_by_start_at(&self, start_at: NaiveTime) -> DomainResult<bool>;

    async fn delete_by_id(&self, id: i32) -> DomainResult<()>;
}
