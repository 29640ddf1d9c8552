// SPDX-FileCopyrightText: 2026 OffChain Luxembourg
//
// SPDX-License-Identifier: MIT

//! Resilient multi-endpoint RPC client for side-chain token data
//!
//! This crate queries a set of interchangeable, independently operated RPC
//! mirrors for account balance/stake data and token supply data. It tolerates
//! transient failures, rate limiting, inconsistent response shapes across
//! mirrors, and partial batch failures, while keeping the number of network
//! round trips for bulk lookups low.
//!
//! # Architecture
//!
//! - [`transport::RetryingTransport`] — one HTTP POST with bounded retries and
//!   exponential backoff on transient failure classes
//! - [`endpoint::EndpointRegistry`] — ordered list of candidate mirrors, each
//!   tagged with the query [`endpoint::Dialect`] it speaks
//! - [`dialect`] — per-dialect request payload construction and response
//!   parsing into normalized records
//! - [`orchestrator::FallbackOrchestrator`] — tries endpoints in order until
//!   one yields a validated result, chunking oversized batches where a dialect
//!   has no native set operator
//! - [`client::EngineClient`] — the consumer-facing surface: single balance,
//!   batch balances aligned to input order, and token info
//!
//! Batch lookups degrade gracefully: when no endpoint satisfies a batch
//! query, the client falls back to independent per-account queries, and an
//! account that fails everywhere yields a zero record rather than an error.

pub mod client;
pub mod config;
pub mod dialect;
pub mod endpoint;
pub mod error;
pub mod orchestrator;
pub mod transport;
pub mod types;

pub use client::EngineClient;
pub use config::EngineSettings;
pub use endpoint::{Dialect, Endpoint, EndpointRegistry};
pub use error::{AllEndpointsExhausted, EngineError, QueryError, TransportError};
pub use orchestrator::{FallbackOrchestrator, FetchOutcome};
pub use transport::RetryingTransport;
pub use types::{BalanceRecord, LogicalQuery, TokenInfoRecord};
