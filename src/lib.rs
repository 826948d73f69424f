//! Prometheus exporter for Amazon SES send quotas.
//!
//! Polls the SES `GetSendQuota` API on a fixed interval and republishes the
//! account-level sending limits as gauges on a pull-based `/metrics` endpoint.

pub mod cli;
pub mod config;
pub mod metrics;
pub mod poller;
pub mod quota;
pub mod server;
