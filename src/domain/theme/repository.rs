//! Theme repository interface

use async_trait::async_trait;

use super::model::Theme;
use crate::domain::DomainResult;

#[async_trait]
pub trait ThemeRepository: Send + Sync {
    /// Insert a new theme and return it with its assigned id
    async fn save(&self, theme: Theme) -> DomainResult<Theme>;

    /// All themes, ordered by id
    async fn find_all(&self) -> DomainResult<Vec<Theme>>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Theme>>;

    async fn exists_by_id(&self, id: i32) -> DomainResult<bool>;

    /// Themes ordered by reservation count (descending), ties by id
    /// (ascending), at most `limit` entries. Themes without reservations
    /// are included with a count of zero.
    async fn find_popular(&self, limit: u64) -> DomainResult<Vec<Theme>>;

    async fn delete_by_id(&self, id: i32) -> DomainResult<()>;
}
