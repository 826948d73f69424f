use clap::Parser;

/// Prometheus exporter for Amazon SES send quotas.
///
/// Credentials and region are resolved through the standard AWS chain
/// (environment, shared config files, instance metadata).
#[derive(Debug, Parser)]
#[command(name = "ses-quota-exporter", version, about)]
pub struct Cli {
    /// Path under which to expose metrics.
    #[arg(long = "web.telemetry-path", default_value = "/metrics")]
    pub telemetry_path: String,

    /// Address to listen on for web interface and telemetry.
    #[arg(long = "web.listen-address", default_value = "0.0.0.0:9101")]
    pub listen_address: String,

    /// Initial log filter; RUST_LOG takes precedence when set.
    #[arg(long = "log.level", default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_exporter_conventions() {
        let cli = Cli::parse_from(["ses-quota-exporter"]);
        assert_eq!(cli.telemetry_path, "/metrics");
        assert_eq!(cli.listen_address, "0.0.0.0:9101");
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn dotted_long_flags_are_accepted() {
        let cli = Cli::parse_from([
            "ses-quota-exporter",
            "--web.telemetry-path",
            "/ses",
            "--web.listen-address",
            "127.0.0.1:9999",
        ]);
        assert_eq!(cli.telemetry_path, "/ses");
        assert_eq!(cli.listen_address, "127.0.0.1:9999");
    }
}
