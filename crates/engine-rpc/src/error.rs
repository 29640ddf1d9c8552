// SPDX-FileCopyrightText: 2026 OffChain Luxembourg
//
// SPDX-License-Identifier: MIT

//! Error taxonomy for the fetch layer
//!
//! Transport, parse, and validation failures are local to one endpoint
//! attempt and never escape the orchestrator directly; only exhaustion of the
//! whole registry surfaces to callers, carrying the ordered per-endpoint
//! causes for diagnostics.

use std::fmt;

use thiserror::Error;

use crate::endpoint::Dialect;

/// Failure of one HTTP call, after the retry budget is spent.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection error, per-attempt timeout, or other transport-level
    /// failure from the HTTP client.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Terminal status the transport does not retry.
    #[error("HTTP {status} from {url}")]
    Status {
        /// Response status code.
        status: u16,
        /// Request URL.
        url: String,
    },

    /// Rate-limit or unavailable status that was retried until the budget
    /// ran out.
    #[error("HTTP {status} from {url} after retries")]
    RetriesExhausted {
        /// Last retryable status observed.
        status: u16,
        /// Request URL.
        url: String,
    },
}

/// Failure of one endpoint attempt within a fallback pass.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The HTTP call failed outright.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body did not match the expected dialect shape.
    #[error("malformed {dialect:?} response: {message}")]
    Parse {
        /// Dialect the endpoint was expected to speak.
        dialect: Dialect,
        /// What failed to parse.
        message: String,
    },

    /// The endpoint answered with no rows where at least one was required.
    #[error("empty result")]
    EmptyResult,

    /// The response parsed but failed the caller-supplied semantic check.
    #[error("response failed validation")]
    ValidationFailed,

    /// Chunked batch dispatch lost one or more chunks.
    #[error("{failed} of {total} batch chunks failed")]
    ChunksFailed {
        /// Chunks that errored.
        failed: usize,
        /// Chunks attempted.
        total: usize,
    },
}

/// Every configured endpoint failed for one logical query.
///
/// Terminal for single-account and token-info queries; for batch queries the
/// client degrades to per-account single queries instead of surfacing this.
#[derive(Debug)]
pub struct AllEndpointsExhausted {
    /// Per-endpoint causes, in the order the endpoints were tried.
    pub attempts: Vec<(String, QueryError)>,
}

impl fmt::Display for AllEndpointsExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no valid data from any endpoint ({} tried)", self.attempts.len())?;
        for (url, cause) in &self.attempts {
            write!(f, "; {url}: {cause}")?;
        }
        Ok(())
    }
}

impl std::error::Error for AllEndpointsExhausted {}

/// Consumer-facing error for the fetch layer.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The endpoint list or tuning values were unusable.
    #[error("configuration error: {0}")]
    Config(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client construction failed: {0}")]
    Client(#[from] reqwest::Error),

    /// Every configured endpoint failed.
    #[error(transparent)]
    Exhausted(#[from] AllEndpointsExhausted),
}
