// SPDX-FileCopyrightText: 2026 OffChain Luxembourg
//
// SPDX-License-Identifier: MIT

//! HTTP POST with bounded retries and exponential backoff
//!
//! Retries cover transient failure classes only: HTTP 429/503 and
//! transport-level errors (connection failure, per-attempt timeout). Any
//! other status is terminal for the call. Attempt `n` backs off for
//! `base_delay * 2^n`; backoff suspends the calling task without blocking
//! other tasks.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use tokio_retry::{Retry, strategy::ExponentialBackoff};
use tracing::warn;

use crate::{config::EngineSettings, error::TransportError};

/// Reusable transport for JSON-RPC POST calls.
#[derive(Debug, Clone)]
pub struct RetryingTransport {
    client: Client,
    max_retries: u32,
    base_delay_ms: u64,
}

impl RetryingTransport {
    /// Create a transport with the given per-attempt timeout and retry budget.
    pub fn new(timeout_seconds: u64, max_retries: u32, base_delay_ms: u64) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(concat!("oclt-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            max_retries,
            base_delay_ms: base_delay_ms.max(2),
        })
    }

    /// Create a transport from fetch-layer settings.
    pub fn from_settings(settings: &EngineSettings) -> Result<Self, TransportError> {
        Self::new(settings.timeout_seconds, settings.max_retries, settings.base_delay_ms)
    }

    /// POST `body` as JSON to `url`, retrying transient failures.
    ///
    /// Returns the response only on a success status; terminal statuses
    /// become [`TransportError::Status`] without consuming a retry.
    pub async fn send(&self, url: &str, body: &Value) -> Result<Response, TransportError> {
        // from_millis(2) yields 2, 4, 8...; the factor scales that to
        // base_delay * 2^attempt.
        let strategy = ExponentialBackoff::from_millis(2)
            .factor(self.base_delay_ms / 2)
            .take(self.max_retries as usize);

        let mut attempt: u32 = 0;
        let response = Retry::spawn(strategy, || {
            let call = attempt;
            attempt += 1;
            async move {
                match self.client.post(url).json(body).send().await {
                    Ok(response) => {
                        let status = response.status();
                        if is_retryable(status) {
                            warn!(
                                url,
                                status = status.as_u16(),
                                attempt = call,
                                delay_ms = self.backoff_ms(call),
                                "retryable status, backing off"
                            );
                            return Err(TransportError::RetriesExhausted {
                                status: status.as_u16(),
                                url: url.to_string(),
                            });
                        }
                        Ok(response)
                    }
                    Err(error) => {
                        warn!(
                            url,
                            attempt = call,
                            delay_ms = self.backoff_ms(call),
                            error = %error,
                            "transport failure, backing off"
                        );
                        Err(TransportError::Http(error))
                    }
                }
            }
        })
        .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }

    fn backoff_ms(&self, attempt: u32) -> u64 {
        self.base_delay_ms.saturating_mul(1_u64 << attempt.min(32))
    }
}

fn is_retryable(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS | StatusCode::SERVICE_UNAVAILABLE
    )
}
