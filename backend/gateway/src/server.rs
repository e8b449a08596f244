//! Main HTTP gateway server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use platescan_config::PlateScanConfig;
use platescan_core::{PlateMatcher, TextDetector, TokenRange};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, info_span, instrument, warn};

use crate::denylist_reload::{load_denylist, SharedDenylist};
use crate::detect;
use crate::health_api;

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    pub detector: Arc<dyn TextDetector>,
    pub matcher: Arc<PlateMatcher>,
    pub denylist: SharedDenylist,
    pub started_at: DateTime<Utc>,
}

impl GatewayState {
    pub fn new(
        detector: Arc<dyn TextDetector>,
        matcher: PlateMatcher,
        denylist: SharedDenylist,
    ) -> Self {
        Self {
            detector,
            matcher: Arc::new(matcher),
            denylist,
            started_at: Utc::now(),
        }
    }

    /// Build the matcher and initial denylist from config around an injected detector.
    pub async fn from_config(
        config: &PlateScanConfig,
        detector: Arc<dyn TextDetector>,
    ) -> Result<Self> {
        let range = config.matcher.two_line_token_length();
        let matcher = PlateMatcher::new(TokenRange::new(range.min, range.max)?)?;
        let denylist = load_denylist(&config.denylist)
            .await
            .context("Failed to load denylist")?;
        info!(
            entries = denylist.len(),
            two_line_min = range.min,
            two_line_max = range.max,
            "Plate matcher ready"
        );
        Ok(Self::new(detector, matcher, Arc::new(RwLock::new(denylist))))
    }
}

/// Build the router with all routes and middleware.
pub fn build_router(state: GatewayState, body_limit_bytes: usize) -> Router {
    Router::new()
        .route("/api/detect-plate", post(detect::detect_plate))
        .route("/api/health", get(health_api::get_health))
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                info_span!(
                    "http_request",
                    request_id = %uuid::Uuid::new_v4(),
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
        .with_state(state)
}

/// Starts the HTTP server and runs until Ctrl-C.
#[instrument(skip(state))]
pub async fn start_server(
    addr: SocketAddr,
    body_limit_bytes: usize,
    state: GatewayState,
) -> Result<()> {
    let app = build_router(state, body_limit_bytes);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("platescan gateway listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
