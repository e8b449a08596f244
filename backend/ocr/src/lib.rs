//! Text-detection providers for platescan.
//!
//! Each provider implements [`platescan_core::TextDetector`]; the service
//! builds exactly one at startup with [`build_detector`] and injects it.

pub mod rekognition;
pub mod static_lines;

use std::sync::Arc;

use platescan_config::{OcrConfig, OcrProviderKind};
use platescan_core::TextDetector;
use tracing::info;

pub use rekognition::RekognitionDetector;
pub use static_lines::StaticDetector;

/// Construct the configured provider.
pub async fn build_detector(config: &OcrConfig) -> Arc<dyn TextDetector> {
    let detector: Arc<dyn TextDetector> = match config.provider {
        OcrProviderKind::Rekognition => Arc::new(RekognitionDetector::from_config(config).await),
        OcrProviderKind::Static => Arc::new(StaticDetector::from_lines(&config.static_lines)),
    };
    info!(provider = detector.name(), "Text detector ready");
    detector
}
