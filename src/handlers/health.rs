use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_macros::debug_handler;

use crate::{app::AppState, dto::HealthResponse};

use super::now_millis;

pub const SERVICE_NAME: &str = "aedev-backend";

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

#[debug_handler]
pub async fn health_check() -> Response {
    let body = HealthResponse {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
        timestamp: now_millis(),
    };
    (StatusCode::OK, Json(body)).into_response()
}
