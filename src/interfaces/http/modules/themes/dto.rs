//! Theme DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Theme;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    /// Thumbnail image URL
    pub thumbnail: String,
}

impl From<Theme> for ThemeDto {
    fn from(t: Theme) -> Self {
        Self {
            id: t.id,
            name: t.name,
            description: t.description,
            thumbnail: t.thumbnail,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateThemeRequest {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 2000, message = "description is too long"))]
    pub description: String,
    #[validate(url(message = "thumbnail must be a URL"))]
    pub thumbnail: String,
}
