// SPDX-FileCopyrightText: 2026 OffChain Luxembourg
//
// SPDX-License-Identifier: MIT

//! Black-box data providers consumed by the dashboard
//!
//! Two single-call collaborators sit outside the side-chain fetch core: the
//! ECB data API for the daily USD/EUR reference rate, and a main-chain
//! condenser node for the treasury account's HBD holdings. Both are wrapped
//! in the same bounded-retry idiom as the core so a transient provider
//! hiccup does not blank the dashboard.

use serde::Deserialize;
use thiserror::Error;

pub mod ledger;
pub mod rates;

pub use ledger::LedgerClient;
pub use rates::RateClient;

/// Failure of one provider call.
#[derive(Debug, Error)]
pub enum FeedError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The JSON-RPC transport gave up after retries.
    #[error(transparent)]
    Transport(#[from] engine_rpc::TransportError),

    /// The provider answered with a shape we cannot read.
    #[error("malformed provider response: {0}")]
    Malformed(String),
}

/// Endpoints for the black-box providers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    /// Main-chain condenser JSON-RPC node.
    pub ledger_node: String,
    /// ECB data API base URL.
    pub rate_api: String,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            ledger_node: "https://api.hive.blog".to_string(),
            rate_api: "https://data-api.ecb.europa.eu".to_string(),
        }
    }
}
