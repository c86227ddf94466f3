//! REST API endpoints.
//!
//! Axum-based HTTP API serving clan profiles, clan search, race logs,
//! player data and the assembled race view.

pub mod routes;
pub mod state;

use axum::{
    http::{HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::fetch::FetchError;
use crate::models::TagError;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Supercell rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Supercell maintenance break.")]
    Maintenance,

    /// Any other upstream failure; the upstream status is passed through.
    #[error("Unexpected error. Please try again.")]
    Upstream { status: u16 },

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Maintenance => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Upstream { status } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::RateLimited => "RATE_LIMITED",
            ApiError::Maintenance => "MAINTENANCE",
            ApiError::Upstream { .. } => "UPSTREAM_ERROR",
            ApiError::Internal => "INTERNAL_ERROR",
        }
    }
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        match &err {
            FetchError::NotFound => ApiError::NotFound(err.to_string()),
            FetchError::RateLimited => ApiError::RateLimited,
            FetchError::Maintenance => ApiError::Maintenance,
            FetchError::HttpStatus { status } => {
                warn!("Upstream returned unexpected status {}", status);
                ApiError::Upstream { status: *status }
            }
            other => {
                error!("Upstream request failed: {}", other);
                ApiError::Internal
            }
        }
    }
}

impl From<TagError> for ApiError {
    fn from(err: TagError) -> Self {
        ApiError::BadRequest(format!("Field \"tag\" - {}", err))
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
    pub status: u16,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.code().to_string(),
                message: self.to_string(),
            },
            status: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

/// `{"data": ...}` success envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Json<Self> {
        Json(Self { data })
    }
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origin == "*" {
        return layer.allow_origin(Any);
    }

    match HeaderValue::from_str(origin) {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            warn!("Invalid CORS origin {:?}, allowing any", origin);
            layer.allow_origin(Any)
        }
    }
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("Not Found - {}", uri.path()))
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_origin);

    Router::new()
        .route("/health", get(routes::health::health))
        .route("/clan/search", get(routes::clan::search_clans))
        .route("/clan/:tag", get(routes::clan::get_clan))
        .route("/clan/:tag/limited", get(routes::clan::get_clan_limited))
        .route("/clan/:tag/race", get(routes::race::get_race))
        .route("/clan/:tag/race/limited", get(routes::race::get_race_limited))
        .route("/clan/:tag/log", get(routes::clan::get_race_log))
        .route("/player/:tag", get(routes::player::get_player))
        .route("/player/:tag/limited", get(routes::player::get_player_limited))
        .route("/player/:tag/log", get(routes::player::get_battle_log))
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::BadgeTable;
    use crate::fetch::MockGameApi;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn app() -> Router {
        let state = AppState::new(Arc::new(MockGameApi::default()), BadgeTable::default());
        build_router(state)
    }

    async fn body_json(resp: Response) -> Value {
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    }

    #[test]
    fn test_fetch_error_mapping() {
        assert_eq!(ApiError::from(FetchError::NotFound).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(FetchError::RateLimited).status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            ApiError::from(FetchError::Maintenance).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        let forbidden = ApiError::from(FetchError::HttpStatus { status: 403 });
        assert_eq!(forbidden.code(), "UPSTREAM_ERROR");
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

        let decode = serde_json::from_str::<u32>("x").unwrap_err();
        assert_eq!(
            ApiError::from(FetchError::Json(decode)).code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_upstream_status_passthrough() {
        let err = ApiError::Upstream { status: 500 };
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Unexpected error. Please try again.");

        // Non-error statuses map to 502.
        assert_eq!(
            ApiError::Upstream { status: 302 }.status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_tag_error_message() {
        let err = ApiError::from(TagError::TooShort);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "Field \"tag\" - tag must be at least 3 characters long"
        );
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let resp = ApiError::Maintenance.into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let json = body_json(resp).await;
        assert_eq!(json["status"], 503);
        assert_eq!(json["error"]["code"], "MAINTENANCE");
        assert_eq!(json["error"]["message"], "Supercell maintenance break.");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let resp = app()
            .oneshot(Request::builder().uri("/nowhere").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let json = body_json(resp).await;
        assert_eq!(json["error"]["message"], "Not Found - /nowhere");
    }

    #[tokio::test]
    async fn test_cors_header_any() {
        let resp = app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("origin", "https://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            resp.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_cors_header_configured() {
        let state = AppState::new(Arc::new(MockGameApi::default()), BadgeTable::default())
            .with_cors_origin("https://cwstats.com");
        let resp = build_router(state)
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("origin", "https://cwstats.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            resp.headers().get("access-control-allow-origin").unwrap(),
            "https://cwstats.com"
        );
    }
}
