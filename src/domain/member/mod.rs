//! Member aggregate
//!
//! Registered customers who can log in. Members are never deleted.

pub mod model;
pub mod repository;

pub use model::Member;
pub use repository::MemberRepository;
