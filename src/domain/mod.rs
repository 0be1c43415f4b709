//! Domain layer: entities and the repository contracts services depend on.

pub mod member;
pub mod repositories;
pub mod reservation;
pub mod reservation_time;
pub mod theme;

pub use member::{Member, MemberRepository};
pub use repositories::{DomainResult, RepositoryProvider};
pub use reservation::{Reservation, ReservationRepository};
pub use reservation_time::{ReservationTime, ReservationTimeRepository};
pub use theme::{Theme, ThemeRepository};

pub use crate::shared::errors::DomainError;
