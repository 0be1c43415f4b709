//! Member registration and authentication
//!
//! Passwords are stored as bcrypt hashes. A successful login issues an
//! HS256 JWT whose subject is the member id; `identify` turns such a token
//! back into the member it was issued for.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{DomainError, DomainResult, Member, RepositoryProvider};
use crate::infrastructure::crypto::jwt::{create_token, verify_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password_with_cost, verify_password};

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub member: Member,
}

pub struct MemberService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
    hash_cost: u32,
}

impl MemberService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig) -> Self {
        Self {
            repos,
            jwt_config,
            hash_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Override the bcrypt work factor
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new member. A duplicate email is a conflict.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> DomainResult<Member> {
        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(DomainError::BadRequest(
                "Name, email and password are required".into(),
            ));
        }

        let members = self.repos.members();
        if members.find_by_email(email).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "Email {} is already registered",
                email
            )));
        }

        let password_hash = hash_password_with_cost(password, self.hash_cost)
            .map_err(|e| DomainError::Internal(format!("Failed to hash password: {}", e)))?;
        let member = members
            .save(Member::new(name.trim(), email, password_hash))
            .await?;

        info!(member_id = member.id, email = %member.email, "New member registered");
        Ok(member)
    }

    // ── Authentication ──────────────────────────────────────────

    /// Check an email/password pair.
    pub async fn authenticate(&self, email: &str, password: &str) -> DomainResult<Member> {
        let Some(member) = self.repos.members().find_by_email(email).await? else {
            warn!(email, "Login attempt for unknown email");
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        let valid = verify_password(password, &member.password_hash).unwrap_or(false);
        if !valid {
            warn!(member_id = member.id, "Login attempt with wrong password");
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        Ok(member)
    }

    /// Authenticate and issue a JWT.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let member = self.authenticate(email, password).await?;

        let token = create_token(&member, &self.jwt_config)
            .map_err(|e| DomainError::Internal(format!("Failed to create token: {}", e)))?;

        info!(member_id = member.id, "Member logged in");
        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            member,
        })
    }

    /// Resolve the member a token was issued for.
    pub async fn identify(&self, token: &str) -> DomainResult<Member> {
        let claims = verify_token(token, &self.jwt_config)
            .map_err(|e| DomainError::Unauthorized(format!("Invalid token: {}", e)))?;
        let id = claims
            .member_id()
            .ok_or_else(|| DomainError::Unauthorized("Malformed token subject".into()))?;

        self.repos
            .members()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::Unauthorized("Member no longer exists".into()))
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list(&self) -> DomainResult<Vec<Member>> {
        self.repos.members().find_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::crypto::password::TEST_HASH_COST;
    use crate::infrastructure::InMemoryRepositoryProvider;

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".into(),
            expiration_hours: 1,
            issuer: "roomescape".into(),
        }
    }

    fn service() -> MemberService {
        MemberService::new(Arc::new(InMemoryRepositoryProvider::new()), jwt_config())
            .with_hash_cost(TEST_HASH_COST)
    }

    #[tokio::test]
    async fn register_stores_hash_not_password() {
        let service = service();

        let member = service
            .register("brown", "brown@email.com", "password")
            .await
            .unwrap();
        assert_eq!(member.id, 1);
        assert_ne!(member.password_hash, "password");
        assert!(verify_password("password", &member.password_hash).unwrap());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let service = service();
        service.register("a", "a@email.com", "pw").await.unwrap();

        let err = service.register("b", "a@email.com", "pw").await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn blank_fields_are_rejected() {
        let service = service();
        let err = service.register(" ", "a@email.com", "pw").await.unwrap_err();
        assert!(matches!(err, DomainError::BadRequest(_)));
    }

    #[tokio::test]
    async fn authenticate_rejects_wrong_password_and_unknown_email() {
        let service = service();
        service.register("a", "a@email.com", "pw").await.unwrap();

        assert!(service.authenticate("a@email.com", "pw").await.is_ok());
        assert!(matches!(
            service.authenticate("a@email.com", "nope").await.unwrap_err(),
            DomainError::Unauthorized(_)
        ));
        assert!(matches!(
            service.authenticate("x@email.com", "pw").await.unwrap_err(),
            DomainError::Unauthorized(_)
        ));
    }

    #[tokio::test]
    async fn login_token_identifies_member() {
        let service = service();
        let member = service.register("a", "a@email.com", "pw").await.unwrap();

        let auth = service.login("a@email.com", "pw").await.unwrap();
        assert_eq!(auth.token_type, "Bearer");
        assert_eq!(auth.expires_in, 3600);
        assert_eq!(service.identify(&auth.token).await.unwrap(), member);
    }

    #[tokio::test]
    async fn garbage_token_is_unauthorized() {
        let service = service();
        assert!(matches!(
            service.identify("not-a-jwt").await.unwrap_err(),
            DomainError::Unauthorized(_)
        ));
    }

    #[tokio::test]
    async fn token_for_missing_member_is_unauthorized() {
        let service = service();
        let ghost = Member {
            id: 42,
            name: "ghost".into(),
            email: "ghost@email.com".into(),
            password_hash: String::new(),
        };
        let token = create_token(&ghost, service.jwt_config()).unwrap();

        assert!(matches!(
            service.identify(&token).await.unwrap_err(),
            DomainError::Unauthorized(_)
        ));
    }

    #[tokio::test]
    async fn list_returns_registered_members() {
        let service = service();
        service.register("a", "a@email.com", "pw").await.unwrap();
        service.register("b", "b@email.com", "pw").await.unwrap();

        let names: Vec<String> = service.list().await.unwrap().into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
