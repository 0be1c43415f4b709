//! Member domain entity

/// Registered member. `id` is 0 until the entity has been persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: i32,
    pub name: String,
    /// Login key, unique across members
    pub email: String,
    /// bcrypt hash of the password
    pub password_hash: String,
}

impl Member {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }
}
