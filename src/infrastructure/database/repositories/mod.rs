//! Database repository implementations
//!
//! Per-entity SeaORM repositories + unified RepositoryProvider.

pub mod member_repository;
pub mod repository_provider;
pub mod reservation_repository;
pub mod reservation_time_repository;
pub mod theme_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use sea_orm::{DbErr, SqlErr};

use crate::domain::DomainError;

/// SQLite reports RESTRICT actions under an extended result code that
/// `DbErr::sql_err` does not classify, so the message is matched as well.
const SQLITE_FK_MESSAGE: &str = "FOREIGN KEY constraint failed";

/// Translate a storage failure into a domain error.
///
/// Unique and foreign-key violations are the storage-level form of the
/// service checks and surface as `Conflict`; everything else is `Internal`.
pub(crate) fn db_err(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => {
            DomainError::Conflict(format!("Unique constraint violated: {}", msg))
        }
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
            DomainError::Conflict(format!("Entity is still referenced: {}", msg))
        }
        _ if e.to_string().contains(SQLITE_FK_MESSAGE) => {
            DomainError::Conflict(format!("Entity is still referenced: {}", e))
        }
        _ => DomainError::Internal(format!("Database error: {}", e)),
    }
}
