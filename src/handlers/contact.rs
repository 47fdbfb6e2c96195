use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use axum_macros::debug_handler;

use crate::{
    app::AppState,
    dto::{ContactRequest, ContactResponse, ErrorResponse},
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(submit))
}

#[debug_handler]
pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Response {
    let form = match payload {
        Ok(Json(request)) => request.validate(),
        Err(rejection) => {
            tracing::debug!("Unreadable contact request body: {rejection}");
            None
        }
    };

    let Some(form) = form else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Missing fields")),
        )
            .into_response();
    };

    match state.mail.send_contact_mail(&form).await {
        Ok(()) => (StatusCode::OK, Json(ContactResponse { success: true })).into_response(),
        Err(e) => {
            tracing::error!("Failed to deliver contact mail: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Mail delivery failed")),
            )
                .into_response()
        }
    }
}
