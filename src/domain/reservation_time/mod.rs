//! ReservationTime aggregate
//!
//! A bookable time-of-day slot, reused across dates and themes.

pub mod model;
pub mod repository;

pub use model::ReservationTime;
pub use repository::ReservationTimeRepository;
