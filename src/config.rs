use std::net::SocketAddr;

use anyhow::{Context, Result};

use crate::cli::Cli;

/// Validated runtime configuration, built once at startup and passed by
/// reference to the server and the poller.
#[derive(Debug, Clone)]
pub struct ExporterConfig {
    pub telemetry_path: String,
    pub listen_address: SocketAddr,
    pub log_level: String,
}

impl ExporterConfig {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let listen_address = cli
            .listen_address
            .parse()
            .with_context(|| format!("invalid listen address {}", cli.listen_address))?;

        let cfg = Self {
            telemetry_path: cli.telemetry_path,
            listen_address,
            log_level: cli.log_level,
        };

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.telemetry_path.starts_with('/') {
            anyhow::bail!(
                "telemetry path {} must start with '/'",
                self.telemetry_path
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut full = vec!["ses-quota-exporter"];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    #[test]
    fn default_cli_produces_valid_config() {
        let config = ExporterConfig::from_cli(cli(&[])).expect("defaults must validate");
        assert_eq!(config.telemetry_path, "/metrics");
        assert_eq!(config.listen_address.port(), 9101);
    }

    #[test]
    fn telemetry_path_must_start_with_slash() {
        let err = ExporterConfig::from_cli(cli(&["--web.telemetry-path", "metrics"]))
            .expect_err("relative path must be rejected");
        assert!(err.to_string().contains("must start with '/'"));
    }

    #[test]
    fn unparseable_listen_address_is_rejected() {
        let err = ExporterConfig::from_cli(cli(&["--web.listen-address", ":9101"]))
            .expect_err("address without host must be rejected");
        assert!(err.to_string().contains("invalid listen address"));
    }

    #[test]
    fn root_telemetry_path_is_allowed() {
        let config = ExporterConfig::from_cli(cli(&["--web.telemetry-path", "/"]))
            .expect("root path must validate");
        assert_eq!(config.telemetry_path, "/");
    }
}
