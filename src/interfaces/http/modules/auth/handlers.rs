//! Authentication API handlers
//!
//! `POST /login` returns the token in the body and also sets it as the
//! `token` cookie. `GET /login/check` accepts either that cookie or an
//! `Authorization: Bearer` header.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::{AppendHeaders, IntoResponse},
    Json,
};

use super::dto::{LoginRequest, LoginResponse};
use crate::domain::DomainError;
use crate::interfaces::http::common::{ApiResponse, ApiResult, ValidatedJson};
use crate::interfaces::http::modules::members::{MemberDto, MemberHandlerState};

pub const TOKEN_COOKIE: &str = "token";

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

fn cookie_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == TOKEN_COOKIE)
        .map(|(_, value)| value)
}

/// Token from the `Authorization` header, else from the `token` cookie
pub fn extract_token(headers: &HeaderMap) -> Option<&str> {
    bearer_token(headers)
        .or_else(|| cookie_token(headers))
        .filter(|token| !token.is_empty())
}

fn token_cookie(token: &str, max_age: i64) -> Result<HeaderValue, DomainError> {
    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        TOKEN_COOKIE, token, max_age
    );
    HeaderValue::from_str(&cookie)
        .map_err(|e| DomainError::Internal(format!("Invalid cookie value: {}", e)))
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; token also set as cookie", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<MemberHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let auth = state.service.login(&request.email, &request.password).await?;
    let cookie = token_cookie(&auth.token, auth.expires_in)?;

    let response = LoginResponse {
        token: auth.token,
        token_type: auth.token_type,
        expires_in: auth.expires_in,
        member: auth.member.into(),
    };
    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(ApiResponse::success(response)),
    ))
}

#[utoipa::path(
    get,
    path = "/login/check",
    tag = "Authentication",
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    responses(
        (status = 200, description = "Member the token belongs to", body = ApiResponse<MemberDto>),
        (status = 401, description = "Missing, invalid or expired token")
    )
)]
pub async fn check_login(
    State(state): State<MemberHandlerState>,
    headers: HeaderMap,
) -> ApiResult<Json<ApiResponse<MemberDto>>> {
    let token = extract_token(&headers)
        .ok_or_else(|| DomainError::Unauthorized("Missing token".into()))?;
    let member = state.service.identify(token).await?;
    Ok(Json(ApiResponse::success(member.into())))
}
