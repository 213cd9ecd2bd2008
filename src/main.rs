use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum_server::tls_rustls::RustlsConfig;
use foodiehub_admin::config::AppConfig;
use foodiehub_admin::services::upstream::HttpDashboardSource;
use foodiehub_admin::{routes, AppState};
use mimalloc::MiMalloc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// M-MIMALLOC-APP: Use mimalloc as global allocator for improved performance.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "foodiehub_admin=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let source = HttpDashboardSource::from_config(&config)
        .context("Failed to build FoodieHub API client")?;

    let ip = config
        .host
        .parse()
        .with_context(|| format!("Invalid BACKEND_HOST: {}", config.host))?;
    let addr = SocketAddr::new(ip, config.port);
    tracing::info!(
        host = %addr,
        upstream = %config.upstream_api_url,
        "Starting FoodieHub admin API server"
    );

    let tls_paths = config
        .tls_paths()
        .map(|(cert, key)| (cert.to_string(), key.to_string()));
    let app = routes::router(AppState::new(config, Arc::new(source)));

    match tls_paths {
        Some((cert, key)) => {
            let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
            let tls = RustlsConfig::from_pem_file(&cert, &key)
                .await
                .context("Failed to load TLS certificate")?;
            tracing::info!(cert = %cert, "Serving HTTPS");
            axum_server::bind_rustls(addr, tls)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
