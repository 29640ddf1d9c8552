// SPDX-FileCopyrightText: 2026 OffChain Luxembourg
//
// SPDX-License-Identifier: MIT

//! RPC mirror endpoints and the ordered registry that ranks them
//!
//! Each endpoint is one independently operated mirror of the side-chain RPC
//! service. The registry order defines fallback priority: the first endpoint
//! that yields validated data wins and later entries are never contacted.

use serde::{Deserialize, Serialize};

/// The request/response shape a given endpoint expects and returns.
///
/// The set of dialects is fixed and discovered per endpoint at configuration
/// time, so a closed sum type with exhaustive matching is used rather than a
/// trait object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    /// Single JSON-RPC `find` call against the `balances`/`tokens` tables,
    /// with an `$in` set operator for batch lookups.
    Standard,
    /// No `$in` support; batch lookups are sent as arrays of individual
    /// JSON-RPC requests against the `stakes` table, correlated by local id.
    EngineCompat,
}

/// One configured RPC mirror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Scheme and host, without a trailing slash.
    pub base_url: String,
    /// Path appended to the base URL (some mirrors serve at the root).
    #[serde(default)]
    pub path_suffix: String,
    /// Query dialect this mirror speaks.
    pub dialect: Dialect,
}

impl Endpoint {
    /// Create an endpoint from its parts.
    pub fn new(base_url: impl Into<String>, path_suffix: impl Into<String>, dialect: Dialect) -> Self {
        Self {
            base_url: base_url.into(),
            path_suffix: path_suffix.into(),
            dialect,
        }
    }

    /// Full request URL for this endpoint.
    pub fn url(&self) -> String {
        format!("{}{}", self.base_url, self.path_suffix)
    }
}

/// Ordered, read-only list of candidate endpoints.
///
/// Initialized once at startup and shared by reference across concurrent
/// queries; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRegistry {
    endpoints: Vec<Endpoint>,
}

impl EndpointRegistry {
    /// Create a registry from an ordered endpoint list.
    pub fn new(endpoints: Vec<Endpoint>) -> Self {
        Self { endpoints }
    }

    /// Iterate endpoints in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.iter()
    }

    /// Number of configured endpoints.
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Whether no endpoints are configured.
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
