//! Reservation time slot management

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tracing::info;

use crate::domain::{DomainError, DomainResult, RepositoryProvider, ReservationTime};

/// A time slot annotated with whether it is taken for a given date and theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableTime {
    pub time: ReservationTime,
    pub already_booked: bool,
}

/// Service for reservation time slots
pub struct ReservationTimeService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ReservationTimeService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Create a new slot. A slot with the same start time is a conflict.
    pub async fn create(&self, start_at: NaiveTime) -> DomainResult<ReservationTime> {
        let times = self.repos.reservation_times();
        if times.exists_by_start_at(start_at).await? {
            return Err(DomainError::Conflict(format!(
                "Reservation time {} already exists",
                start_at.format("%H:%M")
            )));
        }

        let saved = times.save(ReservationTime::new(start_at)).await?;
        info!(time_id = saved.id, start_at = %saved.start_at, "Reservation time created");
        Ok(saved)
    }

    pub async fn list(&self) -> DomainResult<Vec<ReservationTime>> {
        self.repos.reservation_times().find_all().await
    }

    pub async fn get(&self, id: i32) -> DomainResult<ReservationTime> {
        self.repos
            .reservation_times()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("ReservationTime", id))
    }

    /// All slots for a theme on a date, each flagged as booked or free.
    pub async fn list_available(
        &self,
        date: NaiveDate,
        theme_id: i32,
    ) -> DomainResult<Vec<AvailableTime>> {
        if !self.repos.themes().exists_by_id(theme_id).await? {
            return Err(DomainError::not_found("Theme", theme_id));
        }

        let booked = self
            .repos
            .reservations()
            .find_all_by_date_and_theme_id(date, theme_id)
            .await?;
        let times = self.repos.reservation_times().find_all().await?;

        Ok(times
            .into_iter()
            .map(|time| AvailableTime {
                already_booked: booked.iter().any(|r| r.occupies(date, time.id, theme_id)),
                time,
            })
            .collect())
    }

    /// Delete a slot that no reservation uses.
    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        if !self.repos.reservation_times().exists_by_id(id).await? {
            return Err(DomainError::not_found("ReservationTime", id));
        }
        if self.repos.reservations().exists_by_time_id(id).await? {
            return Err(DomainError::Conflict(format!(
                "Reservation time {} is used by existing reservations",
                id
            )));
        }

        self.repos.reservation_times().delete_by_id(id).await?;
        info!(time_id = id, "Reservation time deleted");
        Ok(())
    }
}
