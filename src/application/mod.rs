pub mod services;

pub use services::{
    AuthResult, AvailableTime, MemberService, NewReservation, ReservationService,
    ReservationTimeService, ThemeService, POPULAR_THEME_LIMIT,
};
