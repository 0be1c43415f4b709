//! Reservation DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::Reservation;
use crate::interfaces::http::modules::themes::ThemeDto;
use crate::interfaces::http::modules::times::TimeDto;

/// Reservation with its time slot and theme embedded
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDto {
    pub id: i32,
    pub name: String,
    pub date: NaiveDate,
    pub time: TimeDto,
    pub theme: ThemeDto,
}

impl From<Reservation> for ReservationDto {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            name: r.name,
            date: r.date,
            time: r.time.into(),
            theme: r.theme.into(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    /// Customer name
    #[validate(length(max = 255, message = "name is too long"))]
    pub name: String,
    pub date: NaiveDate,
    #[validate(range(min = 1, message = "timeId must be positive"))]
    pub time_id: i32,
    #[validate(range(min = 1, message = "themeId must be positive"))]
    pub theme_id: i32,
}

/// Optional list filters. `date` is only accepted together with `themeId`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ReservationFilter {
    pub date: Option<NaiveDate>,
    pub time_id: Option<i32>,
    pub theme_id: Option<i32>,
}
