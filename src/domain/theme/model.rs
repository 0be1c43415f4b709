//! Theme domain entity

/// Escape-room theme. `id` is 0 until the entity has been persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub id: i32,
    pub name: String,
    pub description: String,
    /// Thumbnail image URL
    pub thumbnail: String,
}

impl Theme {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        thumbnail: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: description.into(),
            thumbnail: thumbnail.into(),
        }
    }
}
