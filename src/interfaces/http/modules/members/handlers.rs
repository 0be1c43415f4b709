//! Member API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{MemberDto, RegisterRequest};
use crate::application::MemberService;
use crate::interfaces::http::common::{ApiResponse, ApiResult, ValidatedJson};

/// Shared by the member and auth routes
#[derive(Clone)]
pub struct MemberHandlerState {
    pub service: Arc<MemberService>,
}

#[utoipa::path(
    post,
    path = "/members",
    tag = "Members",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Member registered", body = ApiResponse<MemberDto>),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn register_member(
    State(state): State<MemberHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<MemberDto>>)> {
    let member = state
        .service
        .register(&request.name, &request.email, &request.password)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(member.into()))))
}

#[utoipa::path(
    get,
    path = "/members",
    tag = "Members",
    responses((status = 200, description = "All members", body = ApiResponse<Vec<MemberDto>>))
)]
pub async fn list_members(
    State(state): State<MemberHandlerState>,
) -> ApiResult<Json<ApiResponse<Vec<MemberDto>>>> {
    let members = state.service.list().await?;
    Ok(Json(ApiResponse::success(
        members.into_iter().map(MemberDto::from).collect(),
    )))
}
