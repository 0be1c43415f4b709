//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::member::MemberRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::reservation::ReservationRepository;
use crate::domain::reservation_time::ReservationTimeRepository;
use crate::domain::theme::ThemeRepository;

use super::member_repository::SeaOrmMemberRepository;
use super::reservation_repository::SeaOrmReservationRepository;
use super::reservation_time_repository::SeaOrmReservationTimeRepository;
use super::theme_repository::SeaOrmThemeRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-entity repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let theme = repos.themes().find_by_id(1).await?;
/// let in_use = repos.reservations().exists_by_theme_id(1).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    members: SeaOrmMemberRepository,
    reservation_times: SeaOrmReservationTimeRepository,
    themes: SeaOrmThemeRepository,
    reservations: SeaOrmReservationRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            members: SeaOrmMemberRepository::new(db.clone()),
            reservation_times: SeaOrmReservationTimeRepository::new(db.clone()),
            themes: SeaOrmThemeRepository::new(db.clone()),
            reservations: SeaOrmReservationRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn members(&self) -> &dyn MemberRepository {
        &self.members
    }

    fn reservation_times(&self) -> &dyn ReservationTimeRepository {
        &self.reservation_times
    }

    fn themes(&self) -> &dyn ThemeRepository {
        &self.themes
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }
}
