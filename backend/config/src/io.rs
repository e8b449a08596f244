//! Config and denylist file reading.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Default config file name, resolved against the working directory.
pub const CONFIG_FILE_NAME: &str = "platescan.yaml";

/// Env var naming an explicit config file.
pub const ENV_CONFIG_PATH: &str = "PLATESCAN_CONFIG";

/// Resolve the config file path.
/// Priority: explicit path > `PLATESCAN_CONFIG` > `./platescan.yaml`.
pub fn config_file_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match std::env::var(ENV_CONFIG_PATH) {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => PathBuf::from(CONFIG_FILE_NAME),
    }
}

/// Read the config file as an untyped value tree.
///
/// Returns an empty object if the file doesn't exist, so a bare deployment
/// runs on defaults and environment variables alone.
pub async fn load_raw_config(path: &Path) -> Result<Value> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(Value::Object(Default::default()));
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    if raw.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }

    let value: Value = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    // A comment-only document parses as null.
    Ok(if value.is_null() {
        Value::Object(Default::default())
    } else {
        value
    })
}

/// Parse a denylist word file: one entry per line, blank lines skipped,
/// `#` starts a comment that runs to the end of the line.
pub fn parse_word_list(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.split_once('#').map_or(line, |(before, _)| before))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read and parse a denylist word file.
pub async fn read_word_list(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read denylist file: {}", path.display()))?;
    let words = parse_word_list(&text);
    debug!(path = %path.display(), count = words.len(), "Read denylist file");
    Ok(words)
}
