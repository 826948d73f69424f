use thiserror::Error;

/// Remote call failures. Network errors, auth failures and malformed
/// responses all end a poll cycle the same way, so they collapse into a
/// single variant carrying the SDK's full error context.
#[derive(Debug, Error)]
pub enum QuotaError {
    #[error("GetSendQuota call failed: {0}")]
    Remote(String),
}
