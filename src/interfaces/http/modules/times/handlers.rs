//! Reservation time API handlers

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use super::dto::{AvailableTimeDto, AvailableTimesParams, CreateTimeRequest, TimeDto};
use crate::application::ReservationTimeService;
use crate::interfaces::http::common::{ApiPath, ApiQuery, ApiResponse, ApiResult, ValidatedJson};

#[derive(Clone)]
pub struct TimeHandlerState {
    pub service: Arc<ReservationTimeService>,
}

#[utoipa::path(
    post,
    path = "/times",
    tag = "Times",
    request_body = CreateTimeRequest,
    responses(
        (status = 201, description = "Time slot created", body = ApiResponse<TimeDto>),
        (status = 400, description = "Malformed time"),
        (status = 409, description = "Start time already exists")
    )
)]
pub async fn create_time(
    State(state): State<TimeHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateTimeRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<TimeDto>>)> {
    let time = state.service.create(request.start_at).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(time.into()))))
}

#[utoipa::path(
    get,
    path = "/times",
    tag = "Times",
    responses((status = 200, description = "All time slots", body = ApiResponse<Vec<TimeDto>>))
)]
pub async fn list_times(
    State(state): State<TimeHandlerState>,
) -> ApiResult<Json<ApiResponse<Vec<TimeDto>>>> {
    let times = state.service.list().await?;
    Ok(Json(ApiResponse::success(
        times.into_iter().map(TimeDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/times/available",
    tag = "Times",
    params(AvailableTimesParams),
    responses(
        (status = 200, description = "Slots with booking state", body = ApiResponse<Vec<AvailableTimeDto>>),
        (status = 404, description = "Theme not found")
    )
)]
pub async fn list_available_times(
    State(state): State<TimeHandlerState>,
    ApiQuery(params): ApiQuery<AvailableTimesParams>,
) -> ApiResult<Json<ApiResponse<Vec<AvailableTimeDto>>>> {
    let slots = state
        .service
        .list_available(params.date, params.theme_id)
        .await?;
    Ok(Json(ApiResponse::success(
        slots.into_iter().map(AvailableTimeDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/times/{id}",
    tag = "Times",
    params(("id" = i32, Path, description = "Time slot ID")),
    responses(
        (status = 200, description = "Time slot", body = ApiResponse<TimeDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_time(
    State(state): State<TimeHandlerState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<ApiResponse<TimeDto>>> {
    let time = state.service.get(id).await?;
    Ok(Json(ApiResponse::success(time.into())))
}

#[utoipa::path(
    delete,
    path = "/times/{id}",
    tag = "Times",
    params(("id" = i32, Path, description = "Time slot ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Still used by reservations")
    )
)]
pub async fn delete_time(
    State(state): State<TimeHandlerState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<StatusCode> {
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
