//! Themes: CRUD and popularity ranking

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
