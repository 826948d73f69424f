use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use ses_quota_exporter::cli::Cli;
use ses_quota_exporter::config::ExporterConfig;
use ses_quota_exporter::metrics::QuotaGauges;
use ses_quota_exporter::poller::{self, POLL_INTERVAL};
use ses_quota_exporter::quota::SesQuotaClient;
use ses_quota_exporter::server::ExporterServer;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("ses-quota-exporter failed: {err:#}");
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = ExporterConfig::from_cli(cli).context("failed to load configuration")?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        address = %config.listen_address,
        path = %config.telemetry_path,
        "starting ses-quota-exporter"
    );

    let gauges = QuotaGauges::new().context("failed to build quota gauges")?;
    let client = Arc::new(SesQuotaClient::from_env().await);

    let shutdown = CancellationToken::new();
    let poller = poller::spawn(client, gauges.clone(), POLL_INTERVAL, shutdown.clone());

    // The landing page is built here; a failure exits before binding.
    let server = ExporterServer::new(config, gauges)?;

    tokio::select! {
        result = server.run(shutdown.clone()) => result?,
        _ = shutdown_signal() => {
            info!("received shutdown signal");
        }
    }

    shutdown.cancel();
    let _ = poller.await;

    info!("ses-quota-exporter stopped");
    Ok(())
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
