use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::ExporterConfig;
use crate::metrics::QuotaGauges;

const CONTENT_TYPE_TEXT: &str = "text/plain; version=0.0.4";

/// HTTP exposition server. Serves the current gauge values at the telemetry
/// path and, unless that path is the root, a static landing page at `/`.
pub struct ExporterServer {
    config: ExporterConfig,
    router: Router,
}

impl ExporterServer {
    /// Build the router, including the landing page. Fails before any
    /// socket is bound, so a bad landing configuration is a startup error.
    pub fn new(config: ExporterConfig, gauges: QuotaGauges) -> Result<Self> {
        let router = build_router(&config, gauges)?;
        Ok(Self { config, router })
    }

    /// Bind the listener and serve until `shutdown` is cancelled.
    pub async fn run(self, shutdown: CancellationToken) -> Result<()> {
        let listener = TcpListener::bind(self.config.listen_address)
            .await
            .with_context(|| format!("failed to bind {}", self.config.listen_address))?;

        info!(
            address = %self.config.listen_address,
            path = %self.config.telemetry_path,
            "metrics endpoint ready"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await
            .context("metrics server failed")?;

        Ok(())
    }
}

pub fn build_router(config: &ExporterConfig, gauges: QuotaGauges) -> Result<Router> {
    let mut router = Router::new().route(&config.telemetry_path, get(serve_metrics));

    if config.telemetry_path != "/" {
        let page =
            landing_page(&config.telemetry_path).context("failed to build landing page")?;
        router = router.route("/", get(move || async move { Html(page) }));
    }

    Ok(router
        .with_state(Arc::new(gauges))
        .layer(TraceLayer::new_for_http()))
}

/// Static landing page linking to the telemetry path.
pub fn landing_page(telemetry_path: &str) -> Result<String> {
    if !telemetry_path.starts_with('/') {
        anyhow::bail!("telemetry path {telemetry_path} must start with '/'");
    }

    Ok(format!(
        "<html>\n\
         <head><title>SES Quota Exporter</title></head>\n\
         <body>\n\
         <h1>SES Quota Exporter</h1>\n\
         <p>Amazon Simple Email Service exporter for Prometheus.</p>\n\
         <p><a href=\"{telemetry_path}\">Metrics</a></p>\n\
         </body>\n\
         </html>\n"
    ))
}

/// Read-only view of the gauges; never blocks on or triggers a poll.
async fn serve_metrics(State(gauges): State<Arc<QuotaGauges>>) -> Response {
    match gauges.render() {
        Ok(body) => ([(header::CONTENT_TYPE, CONTENT_TYPE_TEXT)], body).into_response(),
        Err(err) => {
            error!(error = %err, "failed to render metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
