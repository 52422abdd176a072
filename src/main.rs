use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::signal;
use tracing::info;

mod api;
mod config;
mod error;
mod greeting;
mod host;
mod probe;

use config::Config;

const DEFAULT_LOG_FILTER: &str = "eks_hello=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::var_os("EKS_HELLO_CONFIG").map(PathBuf::from);
    let config = Config::load_optional(config_path.as_deref()).with_context(|| match &config_path {
        Some(p) => format!("Failed to load config from {}", p.display()),
        None => "Failed to build default config".to_string(),
    })?;

    // Docker HEALTHCHECK entry point: probe /health and exit immediately.
    if std::env::args().nth(1).as_deref() == Some("--healthcheck") {
        return healthcheck(&config).await;
    }

    let fallback_filter = config
        .server
        .log_level
        .clone()
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback_filter.into()),
        )
        .init();

    let addr = config.server.bind_addr();
    info!(
        %addr,
        version = %config.greeting.version,
        config = ?config_path,
        "eks-hello starting"
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "listening");

    let router = app(Arc::new(api::client::AppState::new(&config)));

    tokio::select! {
        result = axum::serve(listener, router) => {
            result.context("server error")?;
        }
        _ = shutdown_signal() => {
            info!("shutdown signal received");
        }
    }

    Ok(())
}

/// Public router with request-id and access-log middleware attached.
fn app(state: Arc<api::client::AppState>) -> Router {
    let trace_layer = tower_http::trace::TraceLayer::new_for_http()
        .make_span_with(tower_http::trace::DefaultMakeSpan::new().level(tracing::Level::INFO))
        .on_response(tower_http::trace::DefaultOnResponse::new().level(tracing::Level::INFO));

    api::client::router(state)
        .layer(axum::middleware::from_fn(api::request_id::request_id_middleware))
        .layer(trace_layer)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// `eks-hello --healthcheck`: exit 0 when `/health` answers 2xx, 1 otherwise.
async fn healthcheck(config: &Config) -> anyhow::Result<()> {
    let url = probe::health_url(probe::target(config));
    // stderr ends up in `docker inspect` health logs; tracing is not initialised here.
    let outcome = probe::check(&url).await;
    let failure = probe::failure(&url, &outcome);
    if let Some(reason) = &failure {
        eprintln!("{reason}");
    }
    let healthy = failure.is_none();
    std::process::exit(if healthy { 0 } else { 1 });
}
