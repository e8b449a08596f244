//! Config validation: checks with field paths and readable messages.

use crate::schema::{OcrProviderKind, PlateScanConfig};
use thiserror::Error;

/// A config validation finding with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return every error and warning found.
pub fn validate(config: &PlateScanConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_server(config, &mut report);
    validate_ocr(config, &mut report);
    validate_matcher(config, &mut report);
    validate_denylist(config, &mut report);
    report
}

fn validate_server(config: &PlateScanConfig, report: &mut ValidationReport) {
    let server = &config.server;
    match server.port {
        Some(0) => report.error("server.port", "Port must be non-zero"),
        Some(port) if port < 1024 && port != 80 && port != 443 => report.warn(
            "server.port",
            format!("Port {port} requires elevated privileges; consider using a port >= 1024"),
        ),
        _ => {}
    }
    if server.body_limit_bytes == Some(0) {
        report.error("server.bodyLimitBytes", "Body limit must be greater than zero");
    }
    if let Some(bind) = &server.bind {
        if bind.trim().is_empty() {
            report.error("server.bind", "Bind address cannot be empty");
        }
    }
}

fn validate_ocr(config: &PlateScanConfig, report: &mut ValidationReport) {
    let ocr = &config.ocr;
    match ocr.provider {
        OcrProviderKind::Rekognition => {
            match (&ocr.access_key_id, &ocr.secret_access_key) {
                (Some(_), None) => report.error(
                    "ocr.secretAccessKey",
                    "accessKeyId is set but secretAccessKey is missing",
                ),
                (None, Some(_)) => report.error(
                    "ocr.accessKeyId",
                    "secretAccessKey is set but accessKeyId is missing",
                ),
                _ => {}
            }
            if ocr.region.is_none() {
                report.warn(
                    "ocr.region",
                    "No region configured; the AWS default provider chain will be used",
                );
            }
        }
        OcrProviderKind::Static => {
            if ocr.static_lines.is_empty() {
                report.warn(
                    "ocr.staticLines",
                    "Static provider has no lines; every request will return no plate",
                );
            }
        }
    }
}

fn validate_matcher(config: &PlateScanConfig, report: &mut ValidationReport) {
    let Some(range) = config.matcher.two_line_token_length else { return };
    if range.min == 0 || range.min > range.max {
        report.error(
            "matcher.twoLineTokenLength",
            format!("Need 1 <= min <= max, got min={} max={}", range.min, range.max),
        );
    } else if range.min < 3 {
        report.warn(
            "matcher.twoLineTokenLength.min",
            "Lines shorter than 3 characters are discarded before matching; min below 3 has no effect",
        );
    }
}

fn validate_denylist(config: &PlateScanConfig, report: &mut ValidationReport) {
    let denylist = &config.denylist;
    for (i, word) in denylist.words.iter().enumerate() {
        if word.trim().is_empty() {
            report.warn(format!("denylist.words[{i}]"), "Blank entry is ignored");
        }
    }
    if denylist.watch == Some(true) && denylist.file.is_none() {
        report.warn("denylist.watch", "Watching is enabled but no denylist file is configured");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TokenLengthConfig;

    #[test]
    fn empty_config_is_valid() {
        let report = validate(&PlateScanConfig::default());
        assert!(report.is_valid());
    }

    #[test]
    fn zero_port_is_error() {
        let mut config = PlateScanConfig::default();
        config.server.port = Some(0);
        assert!(!validate(&config).is_valid());
    }

    #[test]
    fn half_configured_credentials_are_error() {
        let mut config = PlateScanConfig::default();
        config.ocr.region = Some("us-east-1".into());
        config.ocr.access_key_id = Some("AKIAEXAMPLE".into());
        let report = validate(&config);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].path, "ocr.secretAccessKey");
    }

    #[test]
    fn inverted_token_range_is_error() {
        let mut config = PlateScanConfig::default();
        config.matcher.two_line_token_length = Some(TokenLengthConfig { min: 4, max: 2 });
        let report = validate(&config);
        assert!(report.errors.iter().any(|e| e.path == "matcher.twoLineTokenLength"));
    }

    #[test]
    fn short_token_minimum_is_warning() {
        let mut config = PlateScanConfig::default();
        config.matcher.two_line_token_length = Some(TokenLengthConfig { min: 2, max: 4 });
        let report = validate(&config);
        assert!(report.is_valid());
        assert!(report
            .warnings
            .iter()
            .any(|w| w.path == "matcher.twoLineTokenLength.min"));
    }
}
