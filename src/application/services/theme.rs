//! Theme management

use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, DomainResult, RepositoryProvider, Theme};

/// Maximum number of themes returned by `list_popular`
pub const POPULAR_THEME_LIMIT: u64 = 10;

pub struct ThemeService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ThemeService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn create(
        &self,
        name: &str,
        description: &str,
        thumbnail: &str,
    ) -> DomainResult<Theme> {
        let saved = self
            .repos
            .themes()
            .save(Theme::new(name, description, thumbnail))
            .await?;
        info!(theme_id = saved.id, name = %saved.name, "Theme created");
        Ok(saved)
    }

    pub async fn list(&self) -> DomainResult<Vec<Theme>> {
        self.repos.themes().find_all().await
    }

    /// Most reserved themes first, ties by ascending id.
    pub async fn list_popular(&self) -> DomainResult<Vec<Theme>> {
        self.repos.themes().find_popular(POPULAR_THEME_LIMIT).await
    }

    pub async fn get(&self, id: i32) -> DomainResult<Theme> {
        self.repos
            .themes()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Theme", id))
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        if !self.repos.themes().exists_by_id(id).await? {
            return Err(DomainError::not_found("Theme", id));
        }
        if self.repos.reservations().exists_by_theme_id(id).await? {
            return Err(DomainError::Conflict(format!(
                "Theme {} is used by existing reservations",
                id
            )));
        }

        self.repos.themes().delete_by_id(id).await?;
        info!(theme_id = id, "Theme deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    use crate::domain::{Reservation, ReservationTime};
    use crate::infrastructure::InMemoryRepositoryProvider;

    fn service() -> (ThemeService, Arc<InMemoryRepositoryProvider>) {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        (ThemeService::new(repos.clone()), repos)
    }

    async fn book(repos: &InMemoryRepositoryProvider, theme: &Theme, time: &ReservationTime, day: u32) {
        let date = NaiveDate::from_ymd_opt(2024, 4, day).unwrap();
        repos
            .reservations()
            .save(Reservation::new("guest", date, time.clone(), theme.clone()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn create_persists_and_get_returns_it() {
        let (service, _) = service();

        let theme = service
            .create("mark", "escape the lab", "https://img/mark.png")
            .await
            .unwrap();
        assert_eq!(theme.id, 1);
        assert_eq!(service.get(1).await.unwrap(), theme);
        assert_eq!(service.list().await.unwrap(), vec![theme]);
    }

    #[tokio::test]
    async fn themes_with_same_name_are_allowed() {
        let (service, _) = service();
        service.create("mark", "a", "t").await.unwrap();
        service.create("mark", "b", "t").await.unwrap();

        assert_eq!(service.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn missing_theme_is_not_found() {
        let (service, _) = service();

        assert!(matches!(
            service.get(7).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
        assert!(matches!(
            service.delete(7).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn referenced_theme_cannot_be_deleted() {
        let (service, repos) = service();
        let theme = service.create("mark", "d", "t").await.unwrap();
        let time = repos
            .reservation_times()
            .save(ReservationTime::new(NaiveTime::from_hms_opt(10, 0, 0).unwrap()))
            .await
            .unwrap();
        book(&repos, &theme, &time, 1).await;

        let err = service.delete(theme.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn list_popular_caps_at_limit_and_orders_by_count() {
        let (service, repos) = service();
        let time = repos
            .reservation_times()
            .save(ReservationTime::new(NaiveTime::from_hms_opt(10, 0, 0).unwrap()))
            .await
            .unwrap();
        let mut themes = Vec::new();
        for i in 0..12 {
            themes.push(service.create(&format!("theme-{}", i), "d", "t").await.unwrap());
        }
        for day in 1..=3 {
            book(&repos, &themes[11], &time, day).await;
        }
        book(&repos, &themes[5], &time, 1).await;

        let popular = service.list_popular().await.unwrap();
        assert_eq!(popular.len(), POPULAR_THEME_LIMIT as usize);
        assert_eq!(popular[0], themes[11]);
        assert_eq!(popular[1], themes[5]);
        assert_eq!(popular[2], themes[0]);
        assert_eq!(service.list_popular().await.unwrap(), popular);
    }
}
