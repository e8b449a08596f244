mod config_cmd;
mod scan_cmd;
mod serve_cmd;
mod status_cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use platescan_config::{config_file_path, load_effective, process_env, PlateScanConfig};
use platescan_logging::{init_logger, LogOptions};

#[derive(Parser)]
#[command(name = "platescan")]
#[command(about = "platescan: licence plates from photos")]
#[command(version)]
struct Cli {
    /// Config file (defaults to $PLATESCAN_CONFIG, then ./platescan.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP service
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
        /// Address to bind the HTTP server to
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Run the plate matcher over a JSON file of detections ("-" reads stdin)
    Scan { file: PathBuf },
    /// Query a running service's health endpoint
    Status {
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Validate the config and print the effective values
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let path = config_file_path(cli.config.as_deref());
    let config = load_effective(&path, &process_env()).await?;

    init_logger(&log_options(&config));

    match cli.command {
        Commands::Serve { port, bind } => {
            let mut config = config;
            if let Some(port) = port {
                config.server.port = Some(port);
            }
            if let Some(bind) = bind {
                config.server.bind = Some(bind);
            }
            serve_cmd::run(config).await?;
        }
        Commands::Scan { file } => scan_cmd::run(&config, &file).await?,
        Commands::Status { port } => {
            status_cmd::run(port.unwrap_or_else(|| config.server.port())).await?;
        }
        Commands::CheckConfig => config_cmd::run(&config, &path)?,
    }

    Ok(())
}

fn log_options(config: &PlateScanConfig) -> LogOptions {
    LogOptions {
        level: config.logging.level().to_string(),
        json: config.logging.json(),
        dir: config.logging.dir.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serve_overrides() {
        let cli = Cli::parse_from(["platescan", "serve", "--port", "8080", "--bind", "127.0.0.1"]);
        match cli.command {
            Commands::Serve { port, bind } => {
                assert_eq!(port, Some(8080));
                assert_eq!(bind.as_deref(), Some("127.0.0.1"));
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::parse_from(["platescan", "check-config", "--config", "/etc/platescan.yaml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/platescan.yaml")));
        assert!(matches!(cli.command, Commands::CheckConfig));
    }

    #[test]
    fn log_options_follow_config() {
        let mut config = PlateScanConfig::default();
        config.logging.level = Some("debug".into());
        config.logging.json = Some(true);
        let options = log_options(&config);
        assert_eq!(options.level, "debug");
        assert!(options.json);
        assert!(options.dir.is_none());
    }
}
