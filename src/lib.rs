//! # Room Escape Reservation Service
//!
//! Booking backend for an escape-room business: time slots, themes,
//! reservations and member accounts behind a JSON REST API.
//!
//! ## Architecture
//!
//! - **domain**: entities and repository traits
//! - **application**: services enforcing the booking rules
//! - **infrastructure**: SeaORM/SQLite and in-memory repositories, crypto
//! - **interfaces**: axum REST API with Swagger documentation
//! - **server**: startup, tracing and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

pub use interfaces::http::create_api_router;
