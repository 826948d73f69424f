use anyhow::{Context, Result};
use prometheus::{Encoder, Gauge, Opts, Registry, TextEncoder};

use crate::quota::QuotaSnapshot;

/// The three account-level quota gauges and the registry they live on.
///
/// Constructed once at startup; the poller holds one clone and overwrites
/// the gauges, the exposition path holds another and only reads. The
/// underlying `Gauge` is an atomic scalar, so no extra locking is needed;
/// a scrape racing a poll may observe a mix of old and new values across
/// the three gauges, which is accepted.
#[derive(Clone)]
pub struct QuotaGauges {
    registry: Registry,
    max_daily_send: Gauge,
    max_send_rate: Gauge,
    sent_last_24h: Gauge,
}

impl QuotaGauges {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let max_daily_send = Gauge::with_opts(Opts::new(
            "ses_quota_max",
            "The maximum number of emails the user is allowed to send in a 24-hour interval.",
        ))?;
        let max_send_rate = Gauge::with_opts(Opts::new(
            "ses_quota_rate",
            "The maximum number of emails that Amazon SES can accept from the user's account per second.",
        ))?;
        let sent_last_24h = Gauge::with_opts(Opts::new(
            "ses_quota_sent",
            "The number of emails sent during the previous 24 hours.",
        ))?;

        registry
            .register(Box::new(max_daily_send.clone()))
            .context("failed to register ses_quota_max")?;
        registry
            .register(Box::new(max_send_rate.clone()))
            .context("failed to register ses_quota_rate")?;
        registry
            .register(Box::new(sent_last_24h.clone()))
            .context("failed to register ses_quota_sent")?;

        #[cfg(target_os = "linux")]
        registry
            .register(Box::new(
                prometheus::process_collector::ProcessCollector::for_self(),
            ))
            .context("failed to register process collector")?;

        Ok(Self {
            registry,
            max_daily_send,
            max_send_rate,
            sent_last_24h,
        })
    }

    /// Overwrite all three gauges from the latest snapshot. Last write wins.
    pub fn set_snapshot(&self, snapshot: &QuotaSnapshot) {
        self.max_daily_send.set(snapshot.max_daily_send);
        self.max_send_rate.set(snapshot.max_send_rate);
        self.sent_last_24h.set(snapshot.sent_last_24h);
    }

    /// Render the registry contents in the Prometheus text exposition format.
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder
            .encode(&self.registry.gather(), &mut buffer)
            .context("failed to encode metrics")?;
        String::from_utf8(buffer).context("encoded metrics were not valid UTF-8")
    }
}
