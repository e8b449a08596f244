use anyhow::Result;
use async_trait::async_trait;

use crate::types::RawDetection;

/// An external text-detection (OCR) service.
///
/// Implementations are constructed once at startup and shared across requests.
#[async_trait]
pub trait TextDetector: Send + Sync {
    /// Provider name (e.g., "rekognition", "static").
    fn name(&self) -> &str;

    /// Detect text in an encoded image. The bytes are passed through untouched.
    async fn detect_text(&self, image: &[u8]) -> Result<Vec<RawDetection>>;
}
