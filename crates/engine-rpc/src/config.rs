// SPDX-FileCopyrightText: 2026 OffChain Luxembourg
//
// SPDX-License-Identifier: MIT

//! Client tuning knobs, externally supplied at startup
//!
//! Everything the fetch layer needs — the ordered mirror list, chunk size,
//! retry budget, backoff base — lives in one immutable value passed into the
//! client at construction time, so tests can swap in mock endpoint lists.

use serde::Deserialize;

use crate::endpoint::{Dialect, Endpoint};

const DEFAULT_SYMBOL: &str = "OCLT";
const DEFAULT_CHUNK_SIZE: usize = 10;
const DEFAULT_MAX_RETRIES: u32 = 2;
const DEFAULT_BASE_DELAY_MS: u64 = 150;
const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Configuration for the fetch layer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Candidate mirrors in fallback priority order.
    pub endpoints: Vec<Endpoint>,
    /// Token symbol all balance queries are scoped to.
    pub symbol: String,
    /// Accounts per wire call when a dialect has no native batch operator.
    pub chunk_size: usize,
    /// Retries per HTTP call after the initial attempt.
    pub max_retries: u32,
    /// Base backoff delay; attempt `n` waits `base * 2^n`.
    pub base_delay_ms: u64,
    /// Per-attempt request timeout.
    pub timeout_seconds: u64,
    /// Accept a chunked batch in which some chunks failed, instead of
    /// preferring a fully successful alternate mirror.
    pub accept_partial_chunks: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            endpoints: default_endpoints(),
            symbol: DEFAULT_SYMBOL.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay_ms: DEFAULT_BASE_DELAY_MS,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            accept_partial_chunks: false,
        }
    }
}

/// Production mirror list, in observed reliability order.
fn default_endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint::new("https://api.hive-engine.com", "/rpc/contracts", Dialect::Standard),
        Endpoint::new("https://api2.hive-engine.com", "/rpc", Dialect::Standard),
        Endpoint::new("https://herpc.dtools.dev", "", Dialect::Standard),
        Endpoint::new("https://he.c0ff33a.uk", "", Dialect::Standard),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let settings = EngineSettings::default();
        assert_eq!(settings.symbol, "OCLT");
        assert_eq!(settings.chunk_size, 10);
        assert_eq!(settings.endpoints.len(), 4);
        assert!(!settings.accept_partial_chunks);
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let settings: EngineSettings = serde_json::from_value(serde_json::json!({
            "chunk_size": 20,
            "endpoints": [
                { "base_url": "https://mirror.example", "path_suffix": "/rpc", "dialect": "standard" }
            ]
        }))
        .unwrap();
        assert_eq!(settings.chunk_size, 20);
        assert_eq!(settings.endpoints.len(), 1);
        assert_eq!(settings.max_retries, DEFAULT_MAX_RETRIES);
        assert_eq!(settings.base_delay_ms, DEFAULT_BASE_DELAY_MS);
    }
}
