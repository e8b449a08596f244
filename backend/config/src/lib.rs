//! `platescan-config`: runtime configuration for the platescan service.
//!
//! Provides:
//! - Typed config schema (server, OCR provider, matcher, denylist, logging)
//! - YAML loading with `${ENV_VAR}` substitution
//! - Fixed env var overrides (`PLATESCAN_*`, `AWS_*`)
//! - Default value application and validation
//! - Credential redaction for safe logging/display
//! - Denylist word-file parsing

pub mod defaults;
pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{apply_env_overrides, process_env, resolve_env_vars, MissingEnvVarError};
pub use io::{config_file_path, load_raw_config, parse_word_list, read_word_list};
pub use redact::redact;
pub use schema::{
    DenylistConfig, LoggingConfig, MatcherConfig, OcrConfig, OcrProviderKind, PlateScanConfig,
    ServerConfig, TokenLengthConfig,
};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Load, substitute env vars, apply overrides and defaults, then validate.
///
/// This is the main entry point for loading a config at runtime. Warnings
/// are logged; any validation error aborts the load.
pub async fn load_and_prepare(path: &Path, env: &HashMap<String, String>) -> Result<PlateScanConfig> {
    let config = load_effective(path, env).await?;
    ensure_valid(&config)?;
    Ok(config)
}

/// Load the effective config without validating it.
pub async fn load_effective(path: &Path, env: &HashMap<String, String>) -> Result<PlateScanConfig> {
    let raw = load_raw_config(path).await?;
    prepare(raw, env)
}

/// Validate, log every finding, and fail on the first error.
pub fn ensure_valid(config: &PlateScanConfig) -> Result<ValidationReport> {
    let report = validate(config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
    if let Some(first) = report.errors.first() {
        bail!(
            "Invalid configuration ({} error(s)); first: {}",
            report.errors.len(),
            first
        );
    }
    Ok(report)
}

/// Turn a raw value tree into an effective config without touching disk.
pub fn prepare(raw: Value, env: &HashMap<String, String>) -> Result<PlateScanConfig> {
    let value = resolve_env_vars(&raw, env).context("Failed to resolve env vars in config")?;
    let config: PlateScanConfig =
        serde_json::from_value(value).context("Failed to deserialize config")?;
    let config = apply_env_overrides(config, env)?;
    Ok(apply_all_defaults(config))
}

/// The effective config as JSON with credentials masked.
pub fn redacted_json(config: &PlateScanConfig) -> Value {
    serde_json::to_value(config)
        .map(|v| redact(&v))
        .unwrap_or(Value::Null)
}
