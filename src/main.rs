mod app;
mod config;
mod dto;
mod handlers;
mod service;

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use app::AppState;
use service::{MailService, SmtpTransport};

#[tokio::main]
async fn main() {
    // Load config before anything can bind
    let cfg = config::load_config()
        .unwrap_or_else(|e| panic!("failed to load configuration: {e}"));

    // Log setup
    let default_level = if cfg.is_production() { "info" } else { "debug" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Loaded configuration for '{}' environment", cfg.environment);
    tracing::debug!("SMTP relay: {:?}", cfg.smtp);

    // Mail service setup
    let transport = SmtpTransport::new(&cfg.smtp).expect("failed to configure SMTP transport");
    let mail = MailService::new(Arc::new(transport), &cfg.contact)
        .expect("invalid contact address in configuration");

    let router = app::router(AppState::new(mail));

    // Start server
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", cfg.port))
        .await
        .expect("Failed to bind to address");
    let addr = listener.local_addr().expect("bound listener has an address");

    tracing::info!("Portfolio backend listening on {}", addr);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}
