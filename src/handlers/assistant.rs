use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use axum_macros::debug_handler;

use crate::{
    app::AppState,
    dto::{AssistantRequest, AssistantResponse, ErrorResponse},
};

use super::now_millis;

pub const ASSISTANT_REPLY: &str = "Assistant backend ready.";

pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(ask))
}

/// Placeholder contract: acknowledges any non-empty message without
/// inspecting it.
#[debug_handler]
pub async fn ask(payload: Result<Json<AssistantRequest>, JsonRejection>) -> Response {
    let message = match payload {
        Ok(Json(request)) => request.into_message(),
        Err(rejection) => {
            tracing::debug!("Unreadable assistant request body: {rejection}");
            None
        }
    };

    if message.is_none() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Missing message")),
        )
            .into_response();
    }

    let body = AssistantResponse {
        reply: ASSISTANT_REPLY.to_string(),
        actions: Vec::new(),
        timestamp: now_millis(),
    };
    (StatusCode::OK, Json(body)).into_response()
}
