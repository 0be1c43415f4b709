//! Reservation booking

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::domain::{DomainError, DomainResult, RepositoryProvider, Reservation};

/// Input for `ReservationService::create`
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub name: String,
    pub date: NaiveDate,
    pub time_id: i32,
    pub theme_id: i32,
}

pub struct ReservationService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ReservationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Book a slot. The time and theme must exist and the
    /// (date, time, theme) slot must still be free.
    pub async fn create(&self, request: NewReservation) -> DomainResult<Reservation> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(DomainError::BadRequest(
                "Reservation name must not be blank".into(),
            ));
        }

        let time = self
            .repos
            .reservation_times()
            .find_by_id(request.time_id)
            .await?
            .ok_or_else(|| DomainError::not_found("ReservationTime", request.time_id))?;
        let theme = self
            .repos
            .themes()
            .find_by_id(request.theme_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Theme", request.theme_id))?;

        let reservations = self.repos.reservations();
        if reservations
            .exists_by_date_and_time_and_theme(request.date, time.id, theme.id)
            .await?
        {
            warn!(
                date = %request.date,
                time_id = time.id,
                theme_id = theme.id,
                "Slot already booked"
            );
            return Err(DomainError::Conflict(format!(
                "Theme {} at {} on {} is already booked",
                theme.id,
                time.start_at.format("%H:%M"),
                request.date
            )));
        }

        let saved = reservations
            .save(Reservation::new(name, request.date, time, theme))
            .await?;
        info!(
            reservation_id = saved.id,
            date = %saved.date,
            time_id = saved.time.id,
            theme_id = saved.theme.id,
            "Reservation created"
        );
        Ok(saved)
    }

    pub async fn list(&self) -> DomainResult<Vec<Reservation>> {
        self.repos.reservations().find_all().await
    }

    pub async fn list_by_date_and_theme(
        &self,
        date: NaiveDate,
        theme_id: i32,
    ) -> DomainResult<Vec<Reservation>> {
        self.repos
            .reservations()
            .find_all_by_date_and_theme_id(date, theme_id)
            .await
    }

    pub async fn list_by_time_id(&self, time_id: i32) -> DomainResult<Vec<Reservation>> {
        self.repos.reservations().find_all_by_time_id(time_id).await
    }

    pub async fn list_by_theme_id(&self, theme_id: i32) -> DomainResult<Vec<Reservation>> {
        self.repos.reservations().find_all_by_theme_id(theme_id).await
    }

    pub async fn get(&self, id: i32) -> DomainResult<Reservation> {
        self.repos
            .reservations()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Reservation", id))
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        if !self.repos.reservations().exists_by_id(id).await? {
            return Err(DomainError::not_found("Reservation", id));
        }

        self.repos.reservations().delete_by_id(id).await?;
        info!(reservation_id = id, "Reservation deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    use crate::application::services::{ReservationTimeService, ThemeService};
    use crate::infrastructure::InMemoryRepositoryProvider;

    struct Services {
        times: ReservationTimeService,
        themes: ThemeService,
        reservations: ReservationService,
    }

    fn services() -> Services {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositoryProvider::new());
        Services {
            times: ReservationTimeService::new(repos.clone()),
            themes: ThemeService::new(repos.clone()),
            reservations: ReservationService::new(repos),
        }
    }

    fn request(name: &str, date: NaiveDate, time_id: i32, theme_id: i32) -> NewReservation {
        NewReservation {
            name: name.to_string(),
            date,
            time_id,
            theme_id,
        }
    }

    fn april(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, d).unwrap()
    }

    #[tokio::test]
    async fn booking_lifecycle_guards_the_time_slot() {
        let s = services();
        let time = s
            .times
            .create(NaiveTime::from_hms_opt(10, 0, 0).unwrap())
            .await
            .unwrap();
        assert_eq!(time.id, 1);
        let theme = s.themes.create("mark", "d", "t").await.unwrap();

        let booked = s
            .reservations
            .create(request("Fobi", april(23), 1, theme.id))
            .await
            .unwrap();
        assert_eq!(booked.time, time);
        assert_eq!(booked.theme, theme);

        let duplicate = s
            .reservations
            .create(request("Brown", april(23), 1, theme.id))
            .await
            .unwrap_err();
        assert!(matches!(duplicate, DomainError::Conflict(_)));

        assert!(matches!(
            s.times.delete(1).await.unwrap_err(),
            DomainError::Conflict(_)
        ));
        s.reservations.delete(booked.id).await.unwrap();
        s.times.delete(1).await.unwrap();
        assert!(s.times.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn same_slot_for_another_theme_is_allowed() {
        let s = services();
        let time = s
            .times
            .create(NaiveTime::from_hms_opt(10, 0, 0).unwrap())
            .await
            .unwrap();
        let a = s.themes.create("a", "d", "t").await.unwrap();
        let b = s.themes.create("b", "d", "t").await.unwrap();

        s.reservations
            .create(request("x", april(1), time.id, a.id))
            .await
            .unwrap();
        s.reservations
            .create(request("y", april(1), time.id, b.id))
            .await
            .unwrap();

        assert_eq!(s.reservations.list_by_time_id(time.id).await.unwrap().len(), 2);
        assert_eq!(s.reservations.list_by_theme_id(a.id).await.unwrap().len(), 1);
        assert_eq!(
            s.reservations
                .list_by_date_and_theme(april(1), b.id)
                .await
                .unwrap()[0]
                .name,
            "y"
        );
    }

    #[tokio::test]
    async fn unknown_time_or_theme_is_not_found() {
        let s = services();
        let theme = s.themes.create("a", "d", "t").await.unwrap();

        let err = s
            .reservations
            .create(request("x", april(1), 99, theme.id))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::NotFound { entity: "ReservationTime", .. }
        ));

        let time = s
            .times
            .create(NaiveTime::from_hms_opt(9, 0, 0).unwrap())
            .await
            .unwrap();
        let err = s
            .reservations
            .create(request("x", april(1), time.id, 99))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Theme", .. }));
    }

    #[tokio::test]
    async fn blank_name_is_a_bad_request() {
        let s = services();
        let err = s
            .reservations
            .create(request("   ", april(1), 1, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::BadRequest(_)));
    }

    #[tokio::test]
    async fn name_is_trimmed() {
        let s = services();
        let time = s
            .times
            .create(NaiveTime::from_hms_opt(9, 0, 0).unwrap())
            .await
            .unwrap();
        let theme = s.themes.create("a", "d", "t").await.unwrap();

        let saved = s
            .reservations
            .create(request("  Fobi ", april(1), time.id, theme.id))
            .await
            .unwrap();
        assert_eq!(saved.name, "Fobi");
        assert_eq!(s.reservations.get(saved.id).await.unwrap(), saved);
    }

    #[tokio::test]
    async fn missing_reservation_is_not_found() {
        let s = services();
        assert!(matches!(
            s.reservations.get(9999).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
        assert!(matches!(
            s.reservations.delete(9999).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }
}
