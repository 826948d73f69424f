pub mod client;
pub mod error;

pub use client::SesQuotaClient;
pub use error::QuotaError;

use async_trait::async_trait;

/// One reading of the account-level SES sending limits.
///
/// Values are copied verbatim from the API response; SES reports `-1` for
/// an unlimited 24-hour quota and that sentinel passes through unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuotaSnapshot {
    /// Maximum number of emails the account may send in a 24-hour interval.
    pub max_daily_send: f64,
    /// Maximum number of emails per second SES accepts from the account.
    pub max_send_rate: f64,
    /// Number of emails sent during the previous 24 hours.
    pub sent_last_24h: f64,
}

/// Source of quota snapshots. The poller only depends on this trait, so
/// tests can substitute a scripted source for the real SES client.
#[async_trait]
pub trait QuotaSource: Send + Sync {
    async fn fetch_quota(&self) -> Result<QuotaSnapshot, QuotaError>;
}
