//! Reservation time slots: CRUD and per-theme availability

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
