//! Database entities module

pub mod member;
pub mod reservation;
pub mod reservation_time;
pub mod theme;

pub use member::Entity as Member;
pub use reservation::Entity as Reservation;
pub use reservation_time::Entity as ReservationTime;
pub use theme::Entity as Theme;
