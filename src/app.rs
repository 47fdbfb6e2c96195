use axum::Router;
use tower_http::trace::TraceLayer;

use std::sync::Arc;

use crate::{handlers, service::MailService};

#[derive(Clone)]
pub struct AppState {
    pub mail: Arc<MailService>,
}

impl AppState {
    pub fn new(mail: MailService) -> Self {
        Self {
            mail: Arc::new(mail),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/health", handlers::health::routes())
        .nest("/contact", handlers::contact::routes())
        .nest("/assistant", handlers::assistant::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
