// SPDX-FileCopyrightText: 2026 OffChain Luxembourg
//
// SPDX-License-Identifier: MIT

//! HBD holdings from a base-layer ledger node
//!
//! A single `condenser_api.get_accounts` call per account. Liquid and
//! savings HBD are summed; an account the node does not know about counts
//! as holding nothing.

use engine_rpc::RetryingTransport;
use serde_json::{Value, json};
use tracing::debug;

use crate::{FeedError, FeedSettings};

const TIMEOUT_SECONDS: u64 = 10;
const MAX_RETRIES: u32 = 2;
const BASE_DELAY_MS: u64 = 150;

/// Client for base-layer account lookups.
#[derive(Debug, Clone)]
pub struct LedgerClient {
    transport: RetryingTransport,
    node_url: String,
}

impl LedgerClient {
    /// Create a client against the configured ledger node.
    pub fn new(settings: &FeedSettings) -> Result<Self, FeedError> {
        let transport = RetryingTransport::new(TIMEOUT_SECONDS, MAX_RETRIES, BASE_DELAY_MS)?;
        Ok(Self {
            transport,
            node_url: settings.ledger_node.clone(),
        })
    }

    /// Total HBD held by `account`, liquid plus savings.
    ///
    /// An account absent from the node resolves to `0.0` rather than an
    /// error, so treasury math never stalls on a renamed account.
    pub async fn hbd_balance(&self, account: &str) -> Result<f64, FeedError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "method": "condenser_api.get_accounts",
            "params": [[account]],
            "id": 1,
        });

        let response = self.transport.send(&self.node_url, &payload).await?;
        let body: Value = response.json().await?;

        let Some(entry) = body.get("result").and_then(|result| result.get(0)) else {
            debug!(account, "account not found on ledger node");
            return Ok(0.0);
        };

        let liquid = parse_asset(entry.get("hbd_balance"));
        let savings = parse_asset(entry.get("savings_hbd_balance"));
        debug!(account, liquid, savings, "fetched HBD holdings");
        Ok(liquid + savings)
    }
}

/// Parse an asset string like `"12.345 HBD"` into its amount.
///
/// Missing or malformed fields fold to `0.0`.
fn parse_asset(field: Option<&Value>) -> f64 {
    field
        .and_then(Value::as_str)
        .and_then(|asset| asset.split_whitespace().next())
        .and_then(|amount| amount.parse().ok())
        .unwrap_or(0.0)
}
