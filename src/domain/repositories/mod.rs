//! Repository provider for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-entity repositories
//! - `DomainResult`: standard result type for domain operations

use super::member::MemberRepository;
use super::reservation::ReservationRepository;
use super::reservation_time::ReservationTimeRepository;
use super::theme::ThemeRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// Services hold an `Arc<dyn RepositoryProvider>` and request only the
/// repositories they need:
///
/// ```ignore
/// async fn guard(repos: &dyn RepositoryProvider, time_id: i32) -> DomainResult<bool> {
///     repos.reservations().exists_by_time_id(time_id).await
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn members(&self) -> &dyn MemberRepository;
    fn reservation_times(&self) -> &dyn ReservationTimeRepository;
    fn themes(&self) -> &dyn ThemeRepository;
    fn reservations(&self) -> &dyn ReservationRepository;
}
