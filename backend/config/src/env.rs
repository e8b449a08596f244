//! Environment handling for config values.
//!
//! Two mechanisms:
//! - `${VAR}` substitution inside string values of the YAML file
//!   (`$${VAR}` escapes to a literal `${VAR}`; only `[A-Z_][A-Z0-9_]*` names);
//! - fixed override variables applied on top of the file.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;

use crate::schema::PlateScanConfig;

/// Group 1 is an escaped reference, group 2 a real one.
static REFERENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\$\{([A-Z_][A-Z0-9_]*)\}|\$\{([A-Z_][A-Z0-9_]*)\}").unwrap()
});

pub const ENV_BIND: &str = "PLATESCAN_BIND";
pub const ENV_PORT: &str = "PLATESCAN_PORT";
pub const ENV_BODY_LIMIT: &str = "PLATESCAN_BODY_LIMIT";
pub const ENV_DENYLIST_FILE: &str = "PLATESCAN_DENYLIST_FILE";
pub const ENV_AWS_REGION: &str = "AWS_REGION";
pub const ENV_AWS_ACCESS_KEY: &str = "AWS_ACCESS_KEY";
pub const ENV_AWS_SECRET_KEY: &str = "AWS_SECRET_KEY";
pub const ENV_LOG_LEVEL: &str = "RUST_LOG";

#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Snapshot of the process environment.
pub fn process_env() -> HashMap<String, String> {
    std::env::vars().collect()
}

/// Substitute `${VAR}` references in every string leaf of `value`.
///
/// Unset or empty variables are an error naming the config path.
pub fn resolve_env_vars(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    resolve_at(value, env, "")
}

fn resolve_at(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value> {
    Ok(match value {
        Value::String(s) => Value::String(substitute(s, env, path)?),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, v)| resolve_at(v, env, &format!("{path}[{i}]")))
                .collect::<Result<_>>()?,
        ),
        Value::Object(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (key, v) in map {
                let child = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                out.insert(key.clone(), resolve_at(v, env, &child)?);
            }
            Value::Object(out)
        }
        other => other.clone(),
    })
}

fn substitute(s: &str, env: &HashMap<String, String>, path: &str) -> Result<String> {
    if !s.contains("${") {
        return Ok(s.to_string());
    }
    let mut missing: Option<MissingEnvVarError> = None;
    let replaced = REFERENCE_RE.replace_all(s, |caps: &Captures| {
        if let Some(escaped) = caps.get(1) {
            return format!("${{{}}}", escaped.as_str());
        }
        let name = &caps[2];
        match env.get(name) {
            Some(value) if !value.is_empty() => value.clone(),
            _ => {
                missing.get_or_insert_with(|| MissingEnvVarError {
                    var_name: name.to_string(),
                    config_path: path.to_string(),
                });
                String::new()
            }
        }
    });
    match missing {
        Some(err) => Err(err.into()),
        None => Ok(replaced.into_owned()),
    }
}

/// Apply the fixed override variables on top of `config`.
///
/// Empty values are treated as unset.
pub fn apply_env_overrides(
    mut config: PlateScanConfig,
    env: &HashMap<String, String>,
) -> Result<PlateScanConfig> {
    let get = |name: &str| env.get(name).map(|v| v.trim()).filter(|v| !v.is_empty());

    if let Some(bind) = get(ENV_BIND) {
        config.server.bind = Some(bind.to_string());
    }
    if let Some(port) = get(ENV_PORT) {
        let port = port
            .parse::<u16>()
            .with_context(|| format!("{ENV_PORT} must be a port number, got {port:?}"))?;
        config.server.port = Some(port);
    }
    if let Some(limit) = get(ENV_BODY_LIMIT) {
        let limit = limit
            .parse::<usize>()
            .with_context(|| format!("{ENV_BODY_LIMIT} must be a byte count, got {limit:?}"))?;
        config.server.body_limit_bytes = Some(limit);
    }
    if let Some(file) = get(ENV_DENYLIST_FILE) {
        config.denylist.file = Some(file.into());
    }
    if let Some(region) = get(ENV_AWS_REGION) {
        config.ocr.region = Some(region.to_string());
    }
    if let Some(key) = get(ENV_AWS_ACCESS_KEY) {
        config.ocr.access_key_id = Some(key.to_string());
    }
    if let Some(secret) = get(ENV_AWS_SECRET_KEY) {
        config.ocr.secret_access_key = Some(secret.to_string());
    }
    if let Some(level) = get(ENV_LOG_LEVEL) {
        config.logging.level = Some(level.to_string());
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn substitutes_nested_strings() {
        let v = json!({"ocr": {"secretAccessKey": "${AWS_SECRET_KEY}", "region": "ca-${ZONE}-1"}});
        let out = resolve_env_vars(&v, &env(&[("AWS_SECRET_KEY", "s3cr3t"), ("ZONE", "central")]))
            .unwrap();
        assert_eq!(out["ocr"]["secretAccessKey"], "s3cr3t");
        assert_eq!(out["ocr"]["region"], "ca-central-1");
    }

    #[test]
    fn substitutes_inside_arrays() {
        let v = json!({"denylist": {"words": ["${SPONSOR}", "PLAIN"]}});
        let out = resolve_env_vars(&v, &env(&[("SPONSOR", "ACME")])).unwrap();
        assert_eq!(out["denylist"]["words"], json!(["ACME", "PLAIN"]));
    }

    #[test]
    fn missing_var_names_the_path() {
        let v = json!({"ocr": {"region": "${NOPE}"}});
        let err = resolve_env_vars(&v, &HashMap::new()).unwrap_err().to_string();
        assert!(err.contains("NOPE"));
        assert!(err.contains("ocr.region"));
    }

    #[test]
    fn escaped_reference_is_kept_literally() {
        let v = json!({"k": "$${HOME}"});
        let out = resolve_env_vars(&v, &HashMap::new()).unwrap();
        assert_eq!(out["k"], "${HOME}");
    }

    #[test]
    fn overrides_take_precedence() {
        let mut config = PlateScanConfig::default();
        config.server.port = Some(5000);
        let config = apply_env_overrides(
            config,
            &env(&[
                ("PLATESCAN_PORT", "8080"),
                ("AWS_REGION", "us-east-1"),
                ("AWS_ACCESS_KEY", "AKIAEXAMPLE"),
                ("PLATESCAN_BIND", ""),
            ]),
        )
        .unwrap();
        assert_eq!(config.server.port, Some(8080));
        assert_eq!(config.server.bind, None);
        assert_eq!(config.ocr.region.as_deref(), Some("us-east-1"));
        assert_eq!(config.ocr.access_key_id.as_deref(), Some("AKIAEXAMPLE"));
    }

    #[test]
    fn bad_port_is_rejected() {
        let result = apply_env_overrides(PlateScanConfig::default(), &env(&[("PLATESCAN_PORT", "http")]));
        assert!(result.unwrap_err().to_string().contains("PLATESCAN_PORT"));
    }
}
