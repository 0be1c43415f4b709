//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use super::common::ApiResponse;
use super::modules::{auth, health, members, reservations, themes, times};
use crate::application::{MemberService, ReservationService, ReservationTimeService, ThemeService};
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;

/// Unified router state. Each handler extracts its own slice via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub times: Arc<ReservationTimeService>,
    pub themes: Arc<ThemeService>,
    pub reservations: Arc<ReservationService>,
    pub members: Arc<MemberService>,
    pub started_at: Arc<Instant>,
}

impl AppState {
    /// Build every service over one repository provider.
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig, hash_cost: u32) -> Self {
        Self {
            times: Arc::new(ReservationTimeService::new(repos.clone())),
            themes: Arc::new(ThemeService::new(repos.clone())),
            reservations: Arc::new(ReservationService::new(repos.clone())),
            members: Arc::new(MemberService::new(repos, jwt_config).with_hash_cost(hash_cost)),
            started_at: Arc::new(Instant::now()),
        }
    }
}

impl FromRef<AppState> for times::TimeHandlerState {
    fn from_ref(s: &AppState) -> Self {
        times::TimeHandlerState {
            service: Arc::clone(&s.times),
        }
    }
}

impl FromRef<AppState> for themes::ThemeHandlerState {
    fn from_ref(s: &AppState) -> Self {
        themes::ThemeHandlerState {
            service: Arc::clone(&s.themes),
        }
    }
}

impl FromRef<AppState> for reservations::ReservationHandlerState {
    fn from_ref(s: &AppState) -> Self {
        reservations::ReservationHandlerState {
            service: Arc::clone(&s.reservations),
        }
    }
}

impl FromRef<AppState> for members::MemberHandlerState {
    fn from_ref(s: &AppState) -> Self {
        members::MemberHandlerState {
            service: Arc::clone(&s.members),
        }
    }
}

impl FromRef<AppState> for health::HealthState {
    fn from_ref(s: &AppState) -> Self {
        health::HealthState {
            started_at: Arc::clone(&s.started_at),
        }
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT issued by POST /login"))
                        .build(),
                ),
            );
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(auth::TOKEN_COOKIE))),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        // Times
        times::create_time,
        times::list_times,
        times::list_available_times,
        times::get_time,
        times::delete_time,
        // Themes
        themes::create_theme,
        themes::list_themes,
        themes::list_popular_themes,
        themes::get_theme,
        themes::delete_theme,
        // Reservations
        reservations::create_reservation,
        reservations::list_reservations,
        reservations::get_reservation,
        reservations::delete_reservation,
        // Members & auth
        members::register_member,
        members::list_members,
        auth::login,
        auth::check_login,
    ),
    components(
        schemas(
            ApiResponse<String>,
            health::HealthResponse,
            times::TimeDto,
            times::CreateTimeRequest,
            times::AvailableTimeDto,
            themes::ThemeDto,
            themes::CreateThemeRequest,
            reservations::ReservationDto,
            reservations::CreateReservationRequest,
            members::MemberDto,
            members::RegisterRequest,
            auth::LoginRequest,
            auth::LoginResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Times", description = "Reservation time slots"),
        (name = "Themes", description = "Escape room themes"),
        (name = "Reservations", description = "Bookings of a theme at a time slot on a date"),
        (name = "Members", description = "Member registration"),
        (name = "Authentication", description = "Login and token check"),
    ),
    info(
        title = "Room Escape Reservation API",
        version = "1.0.0",
        description = "REST API for booking escape room themes"
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check))
        // Times
        .route("/times", get(times::list_times).post(times::create_time))
        .route("/times/available", get(times::list_available_times))
        .route("/times/{id}", get(times::get_time).delete(times::delete_time))
        // Themes
        .route("/themes", get(themes::list_themes).post(themes::create_theme))
        .route("/themes/popular", get(themes::list_popular_themes))
        .route("/themes/{id}", get(themes::get_theme).delete(themes::delete_theme))
        // Reservations
        .route(
            "/reservations",
            get(reservations::list_reservations).post(reservations::create_reservation),
        )
        .route(
            "/reservations/{id}",
            get(reservations::get_reservation).delete(reservations::delete_reservation),
        )
        // Members & auth
        .route("/members", get(members::list_members).post(members::register_member))
        .route("/login", post(auth::login))
        .route("/login/check", get(auth::check_login))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::infrastructure::crypto::password::TEST_HASH_COST;
    use crate::infrastructure::InMemoryRepositoryProvider;

    fn app() -> Router {
        let jwt = JwtConfig {
            secret: "router-test".into(),
            expiration_hours: 1,
            issuer: "roomescape".into(),
        };
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositoryProvider::new());
        create_api_router(AppState::new(repos, jwt, TEST_HASH_COST))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&v).unwrap())
            }
            None => Body::empty(),
        };
        app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
    }

    async fn json_body(resp: Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn seed(app: &Router) {
        let resp = send(app, "POST", "/times", Some(json!({"startAt": "10:00"}))).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let resp = send(
            app,
            "POST",
            "/themes",
            Some(json!({
                "name": "mark",
                "description": "escape the lab",
                "thumbnail": "https://img.example.com/mark.png"
            })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn health_is_ok() {
        let resp = send(&app(), "GET", "/health", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await["status"], "ok");
    }

    #[tokio::test]
    async fn reservation_scenario_over_http() {
        let app = app();
        seed(&app).await;

        let booking = json!({"name": "Fobi", "date": "2024-04-23", "timeId": 1, "themeId": 1});
        let resp = send(&app, "POST", "/reservations", Some(booking.clone())).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = json_body(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["time"]["startAt"], "10:00");
        assert_eq!(body["data"]["theme"]["name"], "mark");

        let resp = send(&app, "POST", "/reservations", Some(booking)).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body = json_body(resp).await;
        assert_eq!(body["success"], false);

        assert_eq!(send(&app, "DELETE", "/times/1", None).await.status(), StatusCode::CONFLICT);
        assert_eq!(
            send(&app, "DELETE", "/reservations/1", None).await.status(),
            StatusCode::NO_CONTENT
        );
        assert_eq!(send(&app, "DELETE", "/times/1", None).await.status(), StatusCode::NO_CONTENT);
        assert_eq!(send(&app, "GET", "/times/1", None).await.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn duplicate_time_is_409() {
        let app = app();
        seed(&app).await;
        let resp = send(&app, "POST", "/times", Some(json!({"startAt": "10:00"}))).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn malformed_time_is_400() {
        let resp = send(&app(), "POST", "/times", Some(json!({"startAt": "ten"}))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn blank_reservation_name_is_400() {
        let app = app();
        seed(&app).await;
        let booking = json!({"name": "  ", "date": "2024-04-23", "timeId": 1, "themeId": 1});
        let resp = send(&app, "POST", "/reservations", Some(booking)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unparsable_path_and_query_use_error_envelope() {
        let app = app();
        for uri in ["/times/abc", "/themes/abc", "/reservations/abc", "/times/available?date=2024-04-23"] {
            let resp = send(&app, "GET", uri, None).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
            let body = json_body(resp).await;
            assert_eq!(body["success"], false, "{uri}");
            assert!(body["error"].is_string(), "{uri}");
        }

        let resp = send(&app, "DELETE", "/times/abc", None).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(resp).await["success"], false);
    }

    #[tokio::test]
    async fn invalid_theme_body_is_422() {
        let resp = send(
            &app(),
            "POST",
            "/themes",
            Some(json!({"name": "", "description": "", "thumbnail": "not a url"})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn reservation_filters_and_availability() {
        let app = app();
        seed(&app).await;
        send(&app, "POST", "/times", Some(json!({"startAt": "11:00"}))).await;
        let booking = json!({"name": "Fobi", "date": "2024-04-23", "timeId": 2, "themeId": 1});
        send(&app, "POST", "/reservations", Some(booking)).await;

        let resp = send(&app, "GET", "/reservations?date=2024-04-23&themeId=1", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await["data"].as_array().unwrap().len(), 1);

        let resp = send(&app, "GET", "/reservations?timeId=1", None).await;
        assert!(json_body(resp).await["data"].as_array().unwrap().is_empty());

        let resp = send(&app, "GET", "/reservations?date=2024-04-23", None).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = send(&app, "GET", "/times/available?date=2024-04-23&themeId=1", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(
            body["data"],
            json!([
                {"timeId": 1, "startAt": "10:00", "alreadyBooked": false},
                {"timeId": 2, "startAt": "11:00", "alreadyBooked": true}
            ])
        );

        let resp = send(&app, "GET", "/themes/popular", None).await;
        assert_eq!(json_body(resp).await["data"][0]["id"], 1);
    }

    #[tokio::test]
    async fn login_sets_cookie_and_check_accepts_it() {
        let app = app();
        let resp = send(
            &app,
            "POST",
            "/members",
            Some(json!({"name": "brown", "email": "brown@email.com", "password": "password"})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert!(json_body(resp).await["data"].get("passwordHash").is_none());

        let resp = send(
            &app,
            "POST",
            "/login",
            Some(json!({"email": "brown@email.com", "password": "password"})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let cookie = resp
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(cookie.starts_with("token="));
        let token = json_body(resp).await["data"]["token"].as_str().unwrap().to_string();

        let cookie_pair = cookie.split(';').next().unwrap().to_string();
        let req = Request::builder()
            .uri("/login/check")
            .header(header::COOKIE, cookie_pair)
            .body(Body::empty())
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await["data"]["name"], "brown");

        let req = Request::builder()
            .uri("/login/check")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        assert_eq!(app.clone().oneshot(req).await.unwrap().status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn wrong_password_and_missing_token_are_401() {
        let app = app();
        send(
            &app,
            "POST",
            "/members",
            Some(json!({"name": "brown", "email": "brown@email.com", "password": "password"})),
        )
        .await;

        let resp = send(
            &app,
            "POST",
            "/login",
            Some(json!({"email": "brown@email.com", "password": "wrong"})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = send(&app, "GET", "/login/check", None).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/times",
            "/times/available",
            "/themes/popular",
            "/reservations/{id}",
            "/login/check",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
