use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::metrics::QuotaGauges;
use crate::quota::QuotaSource;

/// How often the SES quota endpoint is polled.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Spawn the background quota poll loop.
///
/// Every tick fetches a fresh snapshot and overwrites the gauges. A failed
/// fetch is logged and the gauges keep their previous values until the next
/// tick; every tick is an equal-weight retry. The loop runs until
/// `shutdown` is cancelled.
pub fn spawn(
    source: Arc<dyn QuotaSource>,
    gauges: QuotaGauges,
    poll_interval: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    debug!("quota poller stopping");
                    break;
                }
                _ = ticker.tick() => {}
            }

            match source.fetch_quota().await {
                Ok(snapshot) => {
                    gauges.set_snapshot(&snapshot);
                    debug!(
                        max_daily_send = snapshot.max_daily_send,
                        max_send_rate = snapshot.max_send_rate,
                        sent_last_24h = snapshot.sent_last_24h,
                        "updated SES quota gauges"
                    );
                }
                Err(err) => {
                    error!(error = %err, "failed to retrieve the sending limits for the SES account");
                }
            }
        }
    })
}
