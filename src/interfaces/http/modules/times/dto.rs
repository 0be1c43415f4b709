//! Reservation time DTOs

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::AvailableTime;
use crate::domain::ReservationTime;
use crate::interfaces::http::common::time_format;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeDto {
    pub id: i32,
    #[serde(with = "time_format")]
    #[schema(value_type = String, example = "10:00")]
    pub start_at: NaiveTime,
}

impl From<ReservationTime> for TimeDto {
    fn from(t: ReservationTime) -> Self {
        Self {
            id: t.id,
            start_at: t.start_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimeRequest {
    #[serde(with = "time_format")]
    #[schema(value_type = String, example = "10:00")]
    pub start_at: NaiveTime,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailableTimeDto {
    pub time_id: i32,
    #[serde(with = "time_format")]
    #[schema(value_type = String, example = "10:00")]
    pub start_at: NaiveTime,
    pub already_booked: bool,
}

impl From<AvailableTime> for AvailableTimeDto {
    fn from(a: AvailableTime) -> Self {
        Self {
            time_id: a.time.id,
            start_at: a.time.start_at,
            already_booked: a.already_booked,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct AvailableTimesParams {
    /// Date to check, `YYYY-MM-DD`
    pub date: NaiveDate,
    pub theme_id: i32,
}
