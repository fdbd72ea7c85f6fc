use anyhow::{Context, Result};
use axum::Router;
use clap::Parser;
use config::EnvConfig;
use liblimno::{
    Record, SchemaVariant,
    sample::{ExpandedSample, GeneralSample, MinimalSample},
};
use state::{AppState, SharedState};
use std::{path::PathBuf, sync::Arc};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{debug, info};
use tracing_subscriber::filter::EnvFilter;

mod api;
mod config;
mod error;
mod extract;
mod state;

const API_PREFIX: &str = "/api";

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[arg(short, long, default_value = "config.yaml")]
    pub config: PathBuf,
    #[arg(short, long, default_value = "dev")]
    pub env: String,
    #[arg(short, long, help = "Listen on this port instead of the configured one")]
    pub port: Option<u16>,
    #[arg(short, long, help = "Serve samples with this schema instead of the configured one")]
    pub schema: Option<SchemaVariant>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("LIMNOWEB_LOG"))
        .init();
    let args = Cli::parse();
    info!("Starting server");

    let mut config = EnvConfig::load(&args.config, &args.env).await?;
    config.init()?;
    if let Some(port) = args.port {
        config.listen.port = port;
    }
    if let Some(schema) = args.schema {
        config.schema = schema;
    }
    debug!(?config, "using configuration for environment '{}'", args.env);

    match config.schema {
        SchemaVariant::General => serve::<GeneralSample>(config).await,
        SchemaVariant::Expanded => serve::<ExpandedSample>(config).await,
        SchemaVariant::Minimal => serve::<MinimalSample>(config).await,
    }
}

async fn serve<R: Record>(config: EnvConfig) -> Result<()> {
    let addr = config.bind_addr()?;
    let shared_state = Arc::new(SharedState::<R>::new(config));
    let app = app(shared_state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Unable to listen on {addr}"))?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

fn app<R: Record>(state: AppState<R>) -> Router {
    let static_dir = state.config.static_dir.clone();
    Router::new()
        .nest(API_PREFIX, api::router::<R>())
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received interrupt, shutting down"),
        Err(error) => {
            tracing::warn!(%error, "failed to listen for shutdown signal");
            std::future::pending::<()>().await
        }
    }
}

#[cfg(test)]
pub(crate) fn test_app<R: Record>() -> (Router, AppState<R>) {
    let state = Arc::new(SharedState::<R>::test());
    (app(state.clone()), state)
}
