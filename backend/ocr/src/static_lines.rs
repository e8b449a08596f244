//! A detector that returns fixed lines. Used for offline runs and tests.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use platescan_core::{RawDetection, TextDetector};

pub struct StaticDetector {
    detections: Vec<RawDetection>,
    failure: Option<String>,
}

impl StaticDetector {
    pub fn new(detections: Vec<RawDetection>) -> Self {
        Self {
            detections,
            failure: None,
        }
    }

    /// One LINE detection per entry, in order.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        Self::new(lines.iter().map(|l| RawDetection::line(l.as_ref())).collect())
    }

    /// A detector whose every call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            detections: Vec::new(),
            failure: Some(message.into()),
        }
    }
}

#[async_trait]
impl TextDetector for StaticDetector {
    fn name(&self) -> &str {
        "static"
    }

    async fn detect_text(&self, _image: &[u8]) -> Result<Vec<RawDetection>> {
        match &self.failure {
            Some(message) => Err(anyhow!(message.clone())),
            None => Ok(self.detections.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_lines_in_order() {
        let detector = StaticDetector::from_lines(&["ABC", "123"]);
        let detections = detector.detect_text(&[]).await.unwrap();
        assert_eq!(detections, vec![RawDetection::line("ABC"), RawDetection::line("123")]);
    }

    #[tokio::test]
    async fn failing_detector_errors() {
        let detector = StaticDetector::failing("throttled");
        let err = detector.detect_text(b"img").await.unwrap_err();
        assert_eq!(err.to_string(), "throttled");
    }
}
