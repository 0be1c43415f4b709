//! ReservationTime domain entity

use chrono::NaiveTime;

/// Time-of-day slot. `id` is 0 until the entity has been persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationTime {
    pub id: i32,
    pub start_at: NaiveTime,
}

impl ReservationTime {
    pub fn new(start_at: NaiveTime) -> Self {
        Self { id: 0, start_at }
    }

    pub fn with_id(id: i32, start_at: NaiveTime) -> Self {
        Self { id, start_at }
    }
}
