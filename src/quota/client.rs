use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_ses::error::DisplayErrorContext;
use aws_sdk_ses::Client;

use super::{QuotaError, QuotaSnapshot, QuotaSource};

/// SES-backed quota source.
pub struct SesQuotaClient {
    client: Client,
}

impl SesQuotaClient {
    /// Resolve credentials and region once through the standard AWS chain.
    pub async fn from_env() -> Self {
        let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self {
            client: Client::new(&sdk_config),
        }
    }

    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl QuotaSource for SesQuotaClient {
    async fn fetch_quota(&self) -> Result<QuotaSnapshot, QuotaError> {
        let output = self
            .client
            .get_send_quota()
            .send()
            .await
            .map_err(|err| QuotaError::Remote(DisplayErrorContext(err).to_string()))?;

        Ok(QuotaSnapshot {
            max_daily_send: output.max24_hour_send(),
            max_send_rate: output.max_send_rate(),
            sent_last_24h: output.sent_last24_hours(),
        })
    }
}
