use axum::{Json, Router, extract::FromRef, routing::get};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::AppConfig,
    errors::AppError,
    handlers::{pairings, tournaments},
    services::pairing_service::PairingMethod,
};

mod config;
mod errors;
mod handlers;
mod models;
mod payloads;
mod responses;
mod services;

#[derive(Clone)]
struct AppState {
    config: AppConfig,
}

impl FromRef<AppState> for PairingMethod {
    fn from_ref(input: &AppState) -> Self {
        input.config.default_pairing
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/tournaments", tournaments::routes(state))
        .nest("/pairings", pairings::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        "listening on {} (default pairing: {})",
        addr,
        config.default_pairing
    );
    axum::serve(listener, app(AppState { config })).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "wargame_pairing=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    let result = match AppConfig::from_env() {
        Ok(config) => run(config).await,
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        tracing::error!("{} ({})", e, e.code());
        std::process::exit(1);
    }
}
