//! Plate detection endpoint (`POST /api/detect-plate`).

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use platescan_core::scan_detections;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::error::ApiError;
use crate::payload::decode_image;
use crate::server::GatewayState;

#[derive(Debug, Deserialize)]
pub struct DetectRequest {
    /// Base64 image, optionally with a `data:image/<type>;base64,` header.
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DetectResponse {
    /// The detected plate, or `null` when no rule matched.
    pub plate: Option<String>,
}

/// Handler for `POST /api/detect-plate`.
pub async fn detect_plate(
    State(state): State<GatewayState>,
    payload: Result<Json<DetectRequest>, JsonRejection>,
) -> Result<Json<DetectResponse>, ApiError> {
    let Json(request) = payload?;
    let image = request
        .image
        .as_deref()
        .filter(|image| !image.trim().is_empty())
        .ok_or(ApiError::MissingImage)?;

    let bytes = decode_image(image)?;
    debug!(bytes = bytes.len(), "Decoded image payload");

    let detections = state.detector.detect_text(&bytes).await.map_err(|e| {
        error!(provider = state.detector.name(), error = ?e, "Text detection failed");
        ApiError::Detection
    })?;

    let result = {
        let denylist = state.denylist.read().await;
        scan_detections(&detections, &denylist, &state.matcher)
    };

    match &result {
        Some(found) => info!(plate = %found.plate, tier = %found.tier, "Matched plate"),
        None => info!(detections = detections.len(), "No plate matched"),
    }

    Ok(Json(DetectResponse {
        plate: result.map(|found| found.plate),
    }))
}
