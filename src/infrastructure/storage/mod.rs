//! In-memory storage backend

mod memory;

pub use memory::{
    InMemoryMemberRepository, InMemoryRepositoryProvider, InMemoryReservationRepository,
    InMemoryReservationTimeRepository, InMemoryThemeRepository,
};
