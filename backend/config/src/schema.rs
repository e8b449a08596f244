//! platescan configuration schema.
//!
//! Every section is optional in YAML; [`crate::defaults`] fills in whatever
//! is left unset so the effective config can be printed in full.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::defaults::{
    DEFAULT_BIND, DEFAULT_BODY_LIMIT_BYTES, DEFAULT_LOG_LEVEL, DEFAULT_PORT, DEFAULT_TWO_LINE_MAX,
    DEFAULT_TWO_LINE_MIN,
};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlateScanConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub ocr: OcrConfig,

    #[serde(default)]
    pub matcher: MatcherConfig,

    #[serde(default)]
    pub denylist: DenylistConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Maximum accepted request body, in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_limit_bytes: Option<usize>,
}

impl ServerConfig {
    pub fn bind(&self) -> &str {
        self.bind.as_deref().unwrap_or(DEFAULT_BIND)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn body_limit_bytes(&self) -> usize {
        self.body_limit_bytes.unwrap_or(DEFAULT_BODY_LIMIT_BYTES)
    }
}

// ---------------------------------------------------------------------------
// OCR
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OcrProviderKind {
    /// AWS Rekognition `DetectText`.
    #[default]
    Rekognition,
    /// Canned lines from `ocr.staticLines`; no network.
    Static,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrConfig {
    #[serde(default)]
    pub provider: OcrProviderKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_access_key: Option<String>,

    /// Lines returned by the `static` provider, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub static_lines: Vec<String>,
}

// ---------------------------------------------------------------------------
// Matcher
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatcherConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub two_line_token_length: Option<TokenLengthConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenLengthConfig {
    pub min: usize,
    pub max: usize,
}

impl Default for TokenLengthConfig {
    fn default() -> Self {
        Self {
            min: DEFAULT_TWO_LINE_MIN,
            max: DEFAULT_TWO_LINE_MAX,
        }
    }
}

impl MatcherConfig {
    pub fn two_line_token_length(&self) -> TokenLengthConfig {
        self.two_line_token_length.unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Denylist
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DenylistConfig {
    /// Inline entries, always applied.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<String>,

    /// Word file, one entry per line, `#` starts a comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// Reload the word file when it changes on disk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watch: Option<bool>,
}

impl DenylistConfig {
    pub fn watch(&self) -> bool {
        self.watch.unwrap_or(true)
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Emit console logs as JSON instead of human-readable text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,

    /// Directory for the daily rolling NDJSON log file. Unset disables it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl LoggingConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn json(&self) -> bool {
        self.json.unwrap_or(false)
    }
}
