use std::sync::{Arc, Mutex};

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use bookline::config::AppConfig;
use bookline::db;
use bookline::handlers;
use bookline::services::mailer::smtp::SmtpMailer;
use bookline::services::sheets::GoogleSheetsMirror;
use bookline::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;

    let sheets = GoogleSheetsMirror::new(
        config.google_sheet_id.clone(),
        config.google_client_email.clone(),
        config.google_private_key.clone(),
    );
    let mailer = SmtpMailer::new(
        &config.smtp_host,
        config.smtp_port,
        config.email_user.clone(),
        config.email_pass.clone(),
        config.admin_email.clone(),
    )?;

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
        sheets: Box::new(sheets),
        mailer: Box::new(mailer),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/book-appointment", post(handlers::booking::create_booking))
        .route(
            "/api/book-appointment",
            post(handlers::booking::book_appointment),
        )
        .route("/api/test-email", get(handlers::booking::test_email))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
