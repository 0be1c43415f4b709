//! Theme API handlers

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use super::dto::{CreateThemeRequest, ThemeDto};
use crate::application::ThemeService;
use crate::interfaces::http::common::{ApiPath, ApiResponse, ApiResult, ValidatedJson};

#[derive(Clone)]
pub struct ThemeHandlerState {
    pub service: Arc<ThemeService>,
}

fn to_dtos(themes: Vec<crate::domain::Theme>) -> Vec<ThemeDto> {
    themes.into_iter().map(ThemeDto::from).collect()
}

#[utoipa::path(
    post,
    path = "/themes",
    tag = "Themes",
    request_body = CreateThemeRequest,
    responses(
        (status = 201, description = "Theme created", body = ApiResponse<ThemeDto>),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_theme(
    State(state): State<ThemeHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateThemeRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ThemeDto>>)> {
    let theme = state
        .service
        .create(&request.name, &request.description, &request.thumbnail)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(theme.into()))))
}

#[utoipa::path(
    get,
    path = "/themes",
    tag = "Themes",
    responses((status = 200, description = "All themes", body = ApiResponse<Vec<ThemeDto>>))
)]
pub async fn list_themes(
    State(state): State<ThemeHandlerState>,
) -> ApiResult<Json<ApiResponse<Vec<ThemeDto>>>> {
    let themes = state.service.list().await?;
    Ok(Json(ApiResponse::success(to_dtos(themes))))
}

#[utoipa::path(
    get,
    path = "/themes/popular",
    tag = "Themes",
    responses((status = 200, description = "Up to 10 most reserved themes", body = ApiResponse<Vec<ThemeDto>>))
)]
pub async fn list_popular_themes(
    State(state): State<ThemeHandlerState>,
) -> ApiResult<Json<ApiResponse<Vec<ThemeDto>>>> {
    let themes = state.service.list_popular().await?;
    Ok(Json(ApiResponse::success(to_dtos(themes))))
}

#[utoipa::path(
    get,
    path = "/themes/{id}",
    tag = "Themes",
    params(("id" = i32, Path, description = "Theme ID")),
    responses(
        (status = 200, description = "Theme", body = ApiResponse<ThemeDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_theme(
    State(state): State<ThemeHandlerState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<ApiResponse<ThemeDto>>> {
    let theme = state.service.get(id).await?;
    Ok(Json(ApiResponse::success(theme.into())))
}

#[utoipa::path(
    delete,
    path = "/themes/{id}",
    tag = "Themes",
    params(("id" = i32, Path, description = "Theme ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Still used by reservations")
    )
)]
pub async fn delete_theme(
    State(state): State<ThemeHandlerState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<StatusCode> {
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
