use anyhow::Context;
use tracing_subscriber::EnvFilter;
use wxboard::config::WxboardConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = WxboardConfig::load().context("Failed to load configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    if config.logging.format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!("wxboard {} starting", wxboard::VERSION);
    wxboard::web::run(config).await
}
