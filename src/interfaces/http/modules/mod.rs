pub mod auth;
pub mod health;
pub mod members;
pub mod reservations;
pub mod themes;
pub mod times;
