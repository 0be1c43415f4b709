use async_trait::async_trait;

use super::Member;
use crate::domain::DomainResult;

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Insert a new member. A duplicate email yields `DomainError::Conflict`.
    async fn save(&self, member: Member) -> DomainResult<Member>;

    async fn find_all(&self) -> DomainResult<Vec<Member>>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Member>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Member>>;
}
