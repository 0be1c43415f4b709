//! Application services
//!
//! One service per aggregate. Each holds the shared repository provider and
//! enforces the business rules the repositories do not.

mod member;
mod reservation;
mod reservation_time;
mod theme;

pub use member::{AuthResult, MemberService};
pub use reservation::{NewReservation, ReservationService};
pub use reservation_time::{AvailableTime, ReservationTimeService};
pub use theme::{ThemeService, POPULAR_THEME_LIMIT};
