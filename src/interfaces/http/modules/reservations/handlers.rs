//! Reservation API handlers

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use super::dto::{CreateReservationRequest, ReservationDto, ReservationFilter};
use crate::application::{NewReservation, ReservationService};
use crate::domain::DomainError;
use crate::interfaces::http::common::{ApiPath, ApiQuery, ApiResponse, ApiResult, ValidatedJson};

#[derive(Clone)]
pub struct ReservationHandlerState {
    pub service: Arc<ReservationService>,
}

#[utoipa::path(
    post,
    path = "/reservations",
    tag = "Reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Blank name or malformed body"),
        (status = 404, description = "Time or theme not found"),
        (status = 409, description = "Slot already booked")
    )
)]
pub async fn create_reservation(
    State(state): State<ReservationHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateReservationRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ReservationDto>>)> {
    let reservation = state
        .service
        .create(NewReservation {
            name: request.name,
            date: request.date,
            time_id: request.time_id,
            theme_id: request.theme_id,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(reservation.into())),
    ))
}

#[utoipa::path(
    get,
    path = "/reservations",
    tag = "Reservations",
    params(ReservationFilter),
    responses(
        (status = 200, description = "Matching reservations", body = ApiResponse<Vec<ReservationDto>>),
        (status = 400, description = "Unsupported filter combination")
    )
)]
pub async fn list_reservations(
    State(state): State<ReservationHandlerState>,
    ApiQuery(filter): ApiQuery<ReservationFilter>,
) -> ApiResult<Json<ApiResponse<Vec<ReservationDto>>>> {
    let service = &state.service;
    let reservations = match filter {
        ReservationFilter {
            date: Some(date),
            theme_id: Some(theme_id),
            time_id: None,
        } => service.list_by_date_and_theme(date, theme_id).await?,
        ReservationFilter {
            date: None,
            time_id: Some(time_id),
            theme_id: None,
        } => service.list_by_time_id(time_id).await?,
        ReservationFilter {
            date: None,
            time_id: None,
            theme_id: Some(theme_id),
        } => service.list_by_theme_id(theme_id).await?,
        ReservationFilter {
            date: None,
            time_id: None,
            theme_id: None,
        } => service.list().await?,
        _ => {
            return Err(DomainError::BadRequest(
                "Supported filters: date+themeId, timeId or themeId".into(),
            )
            .into())
        }
    };
    Ok(Json(ApiResponse::success(
        reservations.into_iter().map(ReservationDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/reservations/{id}",
    tag = "Reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_reservation(
    State(state): State<ReservationHandlerState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<ApiResponse<ReservationDto>>> {
    let reservation = state.service.get(id).await?;
    Ok(Json(ApiResponse::success(reservation.into())))
}

#[utoipa::path(
    delete,
    path = "/reservations/{id}",
    tag = "Reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 204, description = "Cancelled"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_reservation(
    State(state): State<ReservationHandlerState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<StatusCode> {
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
