//! Reservation domain entity

use chrono::NaiveDate;

use crate::domain::reservation_time::ReservationTime;
use crate::domain::theme::Theme;

/// A booking of one theme at one time slot on one date.
///
/// The time slot and theme are embedded as read-only copies; the
/// reservation does not own their lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    /// Unique reservation ID (0 until persisted)
    pub id: i32,
    /// Name of the customer who booked
    pub name: String,
    pub date: NaiveDate,
    pub time: ReservationTime,
    pub theme: Theme,
}

impl Reservation {
    pub fn new(
        name: impl Into<String>,
        date: NaiveDate,
        time: ReservationTime,
        theme: Theme,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            date,
            time,
            theme,
        }
    }

    /// Whether this reservation occupies the given (date, time, theme) slot
    pub fn occupies(&self, date: NaiveDate, time_id: i32, theme_id: i32) -> bool {
        self.date == date && self.time.id == time_id && self.theme.id == theme_id
    }
}

// ── Tests ──────────────────────────────────────────────────────
