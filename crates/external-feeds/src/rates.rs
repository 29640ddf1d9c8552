// SPDX-FileCopyrightText: 2026 OffChain Luxembourg
//
// SPDX-License-Identifier: MIT

//! Daily USD/EUR reference rate from the ECB data API
//!
//! One GET against the EXR dataflow, asking for the latest observation only.
//! The SDMX-JSON envelope buries the value several levels deep; everything
//! around it is ignored.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tokio_retry::{Retry, strategy::ExponentialBackoff};
use tracing::{debug, warn};
use url::Url;

use crate::{FeedError, FeedSettings};

const SERIES_PATH: &str = "/service/data/EXR/D.USD.EUR.SP00.A";
const TIMEOUT_SECONDS: u64 = 10;
const MAX_RETRIES: usize = 2;
const BASE_DELAY_MS: u64 = 150;

/// Client for the ECB exchange-rate feed.
#[derive(Debug)]
pub struct RateClient {
    client: Client,
    series_url: Url,
}

impl RateClient {
    /// Create a client against the configured ECB API base.
    pub fn new(settings: &FeedSettings) -> Result<Self, FeedError> {
        let mut series_url = Url::parse(&settings.rate_api)
            .map_err(|error| FeedError::Malformed(format!("bad rate API base: {error}")))?;
        series_url.set_path(SERIES_PATH);
        series_url.set_query(Some("lastNObservations=1&format=jsondata"));

        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECONDS))
            .user_agent(concat!("oclt-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, series_url })
    }

    /// Latest USD-per-EUR reference rate.
    pub async fn usd_per_eur(&self) -> Result<f64, FeedError> {
        let strategy = ExponentialBackoff::from_millis(2)
            .factor(BASE_DELAY_MS / 2)
            .take(MAX_RETRIES);

        let response = Retry::spawn(strategy, || async {
            match self.client.get(self.series_url.clone()).send().await {
                Ok(response) if response.status().is_server_error() => {
                    warn!(status = response.status().as_u16(), "rate feed unavailable, backing off");
                    Err(FeedError::Malformed(format!(
                        "HTTP {} from rate feed",
                        response.status().as_u16()
                    )))
                }
                Ok(response) => Ok(response),
                Err(error) => {
                    warn!(error = %error, "rate feed transport failure, backing off");
                    Err(FeedError::Http(error))
                }
            }
        })
        .await?
        .error_for_status()
        .map_err(FeedError::Http)?;

        let body: Value = response.json().await?;
        let rate = extract_rate(&body)
            .ok_or_else(|| FeedError::Malformed("no observation in EXR response".to_string()))?;
        debug!(rate, "fetched USD/EUR reference rate");
        Ok(rate)
    }
}

/// Pull the single observation out of the SDMX-JSON envelope:
/// `dataSets[0].series["0:0:0:0:0"].observations["0"][0]`.
fn extract_rate(body: &Value) -> Option<f64> {
    body.get("dataSets")?
        .get(0)?
        .get("series")?
        .get("0:0:0:0:0")?
        .get("observations")?
        .get("0")?
        .get(0)?
        .as_f64()
}
