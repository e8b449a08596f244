//! Gateway Health API

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::server::GatewayState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub ocr_provider: String,
    pub denylist_size: usize,
    pub two_line_token_length: [usize; 2],
    pub uptime_seconds: i64,
    pub timestamp: DateTime<Utc>,
}

/// Handler for `GET /api/health`
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthReport> {
    let now = Utc::now();
    let range = state.matcher.two_line_range();
    Json(HealthReport {
        status: "ok",
        service: "platescan",
        version: env!("CARGO_PKG_VERSION"),
        ocr_provider: state.detector.name().to_string(),
        denylist_size: state.denylist.read().await.len(),
        two_line_token_length: [range.min, range.max],
        uptime_seconds: (now - state.started_at).num_seconds().max(0),
        timestamp: now,
    })
}
