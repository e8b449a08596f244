//! Config defaults: applies default values to a parsed config.

use crate::schema::{PlateScanConfig, TokenLengthConfig};

pub const DEFAULT_BIND: &str = "0.0.0.0";

pub const DEFAULT_PORT: u16 = 5000;

/// 10 MiB, enough for a phone photo as Base64.
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

pub const DEFAULT_TWO_LINE_MIN: usize = 3;

pub const DEFAULT_TWO_LINE_MAX: usize = 3;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: PlateScanConfig) -> PlateScanConfig {
    let config = apply_server_defaults(config);
    let config = apply_matcher_defaults(config);
    let config = apply_denylist_defaults(config);
    apply_logging_defaults(config)
}

fn apply_server_defaults(mut config: PlateScanConfig) -> PlateScanConfig {
    let server = &mut config.server;
    server.bind.get_or_insert_with(|| DEFAULT_BIND.to_string());
    server.port.get_or_insert(DEFAULT_PORT);
    server.body_limit_bytes.get_or_insert(DEFAULT_BODY_LIMIT_BYTES);
    config
}

fn apply_matcher_defaults(mut config: PlateScanConfig) -> PlateScanConfig {
    config
        .matcher
        .two_line_token_length
        .get_or_insert_with(TokenLengthConfig::default);
    config
}

/// Watching only matters when a word file is configured.
fn apply_denylist_defaults(mut config: PlateScanConfig) -> PlateScanConfig {
    if config.denylist.file.is_some() && config.denylist.watch.is_none() {
        config.denylist.watch = Some(true);
    }
    config
}

fn apply_logging_defaults(mut config: PlateScanConfig) -> PlateScanConfig {
    let logging = &mut config.logging;
    logging.level.get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
    logging.json.get_or_insert(false);
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_unset_fields() {
        let config = apply_all_defaults(PlateScanConfig::default());
        assert_eq!(config.server.port, Some(DEFAULT_PORT));
        assert_eq!(config.server.bind.as_deref(), Some(DEFAULT_BIND));
        assert_eq!(config.server.body_limit_bytes, Some(DEFAULT_BODY_LIMIT_BYTES));
        assert_eq!(
            config.matcher.two_line_token_length,
            Some(TokenLengthConfig { min: 3, max: 3 })
        );
        assert_eq!(config.logging.level.as_deref(), Some("info"));
        assert_eq!(config.denylist.watch, None);
    }

    #[test]
    fn keeps_explicit_values() {
        let mut config = PlateScanConfig::default();
        config.server.port = Some(9000);
        config.denylist.file = Some("words.txt".into());
        config.denylist.watch = Some(false);
        let config = apply_all_defaults(config);
        assert_eq!(config.server.port, Some(9000));
        assert_eq!(config.denylist.watch, Some(false));
    }

    #[test]
    fn enables_watch_for_word_files() {
        let mut config = PlateScanConfig::default();
        config.denylist.file = Some("words.txt".into());
        let config = apply_all_defaults(config);
        assert_eq!(config.denylist.watch, Some(true));
    }
}
