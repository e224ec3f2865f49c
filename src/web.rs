use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::api;
use crate::config::WxboardConfig;
use crate::dashboard::DashboardService;

/// Serve the dashboard API plus the static frontend.
pub async fn run(config: WxboardConfig) -> Result<()> {
    let service = Arc::new(DashboardService::new(&config)?);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .nest("/api", api::router(service))
        .fallback_service(ServeDir::new(&config.server.frontend_dir))
        .layer(cors);

    let addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(
        "Dashboard server running at http://localhost:{}",
        config.server.port
    );
    axum::serve(listener, app).await?;
    Ok(())
}
