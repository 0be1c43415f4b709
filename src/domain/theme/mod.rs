//! Theme aggregate

pub mod model;
pub mod repository;

pub use model::Theme;
pub use repository::ThemeRepository;
