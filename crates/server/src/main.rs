use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Context;
use axum::{middleware::from_fn, routing::any, Router};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use xdotool_integration::Xdotool;

mod api;
mod app_state;
mod config;
mod layers;

use app_state::AppState;
use config::load_settings;

/// HTTP bridge that turns query-string requests into xdotool pointer and
/// keyboard commands.
#[derive(Parser, Debug)]
#[command(name = "captor", version)]
struct Cli {
    /// TOML settings file; a missing file is ignored.
    #[arg(long, default_value = "captor.toml")]
    config: PathBuf,
    /// Listen address, e.g. 127.0.0.1:5005.
    #[arg(long)]
    bind: Option<String>,
    /// Path or name of the xdotool executable.
    #[arg(long)]
    xdotool: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let mut settings = load_settings(&cli.config);
    settings.apply_cli(cli.bind, cli.xdotool);

    let xdotool =
        Xdotool::from_program(settings.xdotool_path.clone()).with_type_delay(settings.type_delay_ms);
    let app = build_router(Arc::new(AppState { xdotool }));

    let addr: SocketAddr = settings
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.bind_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, xdotool = %settings.xdotool_path, "listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", any(api::health))
        .route("/pos", any(api::pos))
        .route("/capture", any(api::capture))
        .route("/move", any(api::move_relative))
        .route("/click", any(api::click))
        .route("/down", any(api::down))
        .route("/up", any(api::up))
        .route("/drag", any(api::drag))
        .route("/type", any(api::type_text))
        .route("/key", any(api::key))
        .fallback(api::not_found)
        .with_state(state)
        .layer(from_fn(layers::log_request))
        .layer(from_fn(layers::preflight))
        .layer(layers::allow_headers())
        .layer(layers::allow_methods())
        .layer(layers::allow_origin())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
