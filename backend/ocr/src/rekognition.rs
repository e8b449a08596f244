//! AWS Rekognition `DetectText` provider.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_rekognition::Client;
use aws_sdk_rekognition::config::Credentials;
use aws_sdk_rekognition::primitives::Blob;
use aws_sdk_rekognition::types::{Image, TextDetection, TextTypes};
use platescan_config::OcrConfig;
use platescan_core::{DetectionKind, RawDetection, TextDetector};
use tracing::{debug, info};

/// Largest image Rekognition accepts as raw bytes.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

pub struct RekognitionDetector {
    client: Client,
}

impl RekognitionDetector {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from config. Region and static credentials are optional;
    /// anything unset falls back to the AWS default provider chain.
    pub async fn from_config(config: &OcrConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let (Some(key_id), Some(secret)) = (&config.access_key_id, &config.secret_access_key) {
            loader = loader.credentials_provider(Credentials::new(
                key_id.clone(),
                secret.clone(),
                None,
                None,
                "platescan-config",
            ));
        }
        let sdk_config = loader.load().await;
        info!(
            region = sdk_config.region().map(|r| r.as_ref()).unwrap_or("<default>"),
            "Configured Rekognition client"
        );
        Self::new(Client::new(&sdk_config))
    }
}

#[async_trait]
impl TextDetector for RekognitionDetector {
    fn name(&self) -> &str {
        "rekognition"
    }

    async fn detect_text(&self, image: &[u8]) -> Result<Vec<RawDetection>> {
        if image.len() > MAX_IMAGE_BYTES {
            bail!(
                "image is {} bytes; Rekognition accepts at most {MAX_IMAGE_BYTES}",
                image.len()
            );
        }
        let output = self
            .client
            .detect_text()
            .image(Image::builder().bytes(Blob::new(image.to_vec())).build())
            .send()
            .await
            .context("Rekognition DetectText request failed")?;

        let detections: Vec<RawDetection> =
            output.text_detections().iter().map(to_raw_detection).collect();
        debug!(count = detections.len(), "Rekognition returned detections");
        Ok(detections)
    }
}

/// Map one SDK detection into the service model. Missing fields stay missing.
pub fn to_raw_detection(detection: &TextDetection) -> RawDetection {
    let kind = match detection.r#type() {
        Some(TextTypes::Line) => DetectionKind::Line,
        Some(TextTypes::Word) => DetectionKind::Word,
        Some(other) => DetectionKind::Other(other.as_str().to_string()),
        None => DetectionKind::Other(String::new()),
    };
    RawDetection {
        kind,
        text: detection.detected_text().map(str::to_string),
        confidence: detection.confidence(),
    }
}
