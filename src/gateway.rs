use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{Method, StatusCode, header::CONTENT_TYPE},
    routing::get,
};
use reqwest::header::CACHE_CONTROL;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::error::Error;

/// Pass-through relay between browser/CLI clients and the recipe provider.
/// Exists only so clients never talk to the provider origin directly.
pub struct Gateway {
    http: reqwest::Client,
    provider_url: String,
}

#[derive(Debug, Deserialize)]
pub struct RelayParams {
    endpoint: Option<String>,
}

impl Gateway {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            provider_url: config.provider_url.clone(),
        })
    }

    /// Forward one endpoint path to the provider and return its JSON body.
    /// No retries; a single best-effort request per call.
    async fn forward(&self, endpoint: &str) -> Result<Value, reqwest::Error> {
        let url = format!("{}{}", self.provider_url, endpoint);

        let response = self
            .http
            .get(&url)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await?
            .error_for_status()?;

        response.json::<Value>().await
    }
}

/// `GET /api/meals?endpoint=<urlencoded provider path>`
///
/// Upstream failures are logged with their cause but reported to the caller
/// as a generic payload only.
pub async fn relay_handler(
    State(gateway): State<Arc<Gateway>>,
    Query(params): Query<RelayParams>,
) -> (StatusCode, Json<Value>) {
    let Some(endpoint) = params.endpoint else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Endpoint parameter required" })),
        );
    };

    match gateway.forward(&endpoint).await {
        Ok(body) => (StatusCode::OK, Json(body)),
        Err(err) => {
            ::log::error!("Upstream request for {} failed: {}", endpoint, err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to fetch data" })),
            )
        }
    }
}

/// Bind the gateway and serve until Ctrl+C or SIGTERM.
pub async fn serve(config: &Config) -> Result<(), Error> {
    let gateway = Arc::new(Gateway::new(config)?);

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    let app = Router::new()
        .route("/api/meals", get(relay_handler))
        .layer(cors)
        .with_state(gateway);

    let address = format!("0.0.0.0:{}", config.gateway_port);
    let listener = TcpListener::bind(&address).await?;
    ::log::info!("Gateway running on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    ::log::info!("Gateway shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
        ::log::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        ::log::info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
