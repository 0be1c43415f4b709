//! Password hashing and login tokens

pub mod jwt;
pub mod password;
