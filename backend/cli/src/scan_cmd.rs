//! CLI Scan Command
//!
//! Runs the normalizer and matcher over saved detections, without calling
//! any OCR provider. Input is a JSON array whose items are either plain
//! strings (taken as LINE detections) or detection objects
//! (`{"kind": "LINE", "text": "ABC 123"}`).

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncReadExt;

use platescan_config::PlateScanConfig;
use platescan_core::{normalize, PlateMatcher, PlateTier, RawDetection, TokenRange};
use platescan_gateway::load_denylist;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScanItem {
    Line(String),
    Detection(RawDetection),
}

impl From<ScanItem> for RawDetection {
    fn from(item: ScanItem) -> Self {
        match item {
            ScanItem::Line(text) => RawDetection::line(text),
            ScanItem::Detection(detection) => detection,
        }
    }
}

#[derive(Debug, Serialize)]
struct ScanOutput {
    plate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tier: Option<PlateTier>,
    lines: Vec<String>,
}

pub async fn run(config: &PlateScanConfig, file: &Path) -> Result<()> {
    let text = read_input(file).await?;
    let detections = parse_detections(&text)?;
    let output = scan(config, &detections).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn read_input(file: &Path) -> Result<String> {
    if file == Path::new("-") {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read detections from stdin")?;
        return Ok(text);
    }
    tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read detections file: {}", file.display()))
}

fn parse_detections(text: &str) -> Result<Vec<RawDetection>> {
    let items: Vec<ScanItem> =
        serde_json::from_str(text).context("Detections must be a JSON array")?;
    Ok(items.into_iter().map(RawDetection::from).collect())
}

async fn scan(config: &PlateScanConfig, detections: &[RawDetection]) -> Result<ScanOutput> {
    let range = config.matcher.two_line_token_length();
    let matcher = PlateMatcher::new(TokenRange::new(range.min, range.max)?)?;
    let denylist = load_denylist(&config.denylist).await?;

    let lines = normalize(detections, &denylist);
    let found = matcher.find_plate(&lines);
    Ok(ScanOutput {
        plate: found.as_ref().map(|m| m.plate.clone()),
        tier: found.map(|m| m.tier),
        lines: lines.into_iter().map(|l| l.into_string()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use platescan_core::DetectionKind;

    #[test]
    fn accepts_strings_and_objects() {
        let detections = parse_detections(
            r#"["abc 123", {"kind": "WORD", "text": "ABC"}, {"kind": "LINE", "confidence": 99.1}]"#,
        )
        .unwrap();
        assert_eq!(detections.len(), 3);
        assert_eq!(detections[0], RawDetection::line("abc 123"));
        assert_eq!(detections[1].kind, DetectionKind::Word);
        assert_eq!(detections[2].text, None);
    }

    #[test]
    fn rejects_non_array_input() {
        assert!(parse_detections(r#"{"plate": "ABC 123"}"#).is_err());
    }

    #[tokio::test]
    async fn reports_plate_tier_and_lines() {
        let mut config = PlateScanConfig::default();
        config.denylist.words = vec!["WINNIPEG".into()];
        let detections = parse_detections(r#"["Winnipeg", "ABC", "123", "Jets"]"#).unwrap();

        let output = scan(&config, &detections).await.unwrap();
        assert_eq!(output.plate.as_deref(), Some("ABC 123"));
        assert_eq!(output.tier, Some(PlateTier::TwoLine));
        assert_eq!(output.lines, vec!["ABC", "123", "JETS"]);
    }

    #[tokio::test]
    async fn no_plate_prints_null() {
        let detections = parse_detections(r#"["12345678", "HI"]"#).unwrap();
        let output = scan(&PlateScanConfig::default(), &detections).await.unwrap();
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["plate"], serde_json::Value::Null);
        assert!(json.get("tier").is_none());
        assert_eq!(json["lines"], serde_json::json!(["12345678"]));
    }

    #[tokio::test]
    async fn reads_detections_file() {
        let path = std::env::temp_dir().join(format!("platescan-{}.json", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, r#"["ABC 123"]"#).await.unwrap();
        let text = read_input(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();
        assert_eq!(parse_detections(&text).unwrap().len(), 1);
    }
}
