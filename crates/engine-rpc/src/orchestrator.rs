// SPDX-FileCopyrightText: 2026 OffChain Luxembourg
//
// SPDX-License-Identifier: MIT

//! Ordered fallback across interchangeable RPC mirrors
//!
//! One `execute` call walks the registry in priority order and returns the
//! first endpoint attempt that yields validated records. Per-endpoint
//! failures are collected, never surfaced individually; exhausting the whole
//! registry surfaces [`AllEndpointsExhausted`] with the ordered causes. No
//! endpoint is revisited within one call.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    config::EngineSettings,
    dialect,
    endpoint::{Dialect, Endpoint, EndpointRegistry},
    error::{AllEndpointsExhausted, QueryError, TransportError},
    transport::RetryingTransport,
    types::LogicalQuery,
};

/// Semantic check applied to parsed records before an endpoint attempt is
/// accepted, e.g. "total stake across the batch must be positive".
pub type Validator<R> = dyn Fn(&[R]) -> bool + Send + Sync;

/// Records from the endpoint that ultimately produced valid data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome<T> {
    /// Parsed, normalized records.
    pub records: Vec<T>,
    /// The endpoint that answered, for observability.
    pub source_endpoint: Endpoint,
}

/// Tries endpoints in registry order for one logical query.
#[derive(Debug)]
pub struct FallbackOrchestrator {
    registry: EndpointRegistry,
    transport: RetryingTransport,
    chunk_size: usize,
    accept_partial_chunks: bool,
}

impl FallbackOrchestrator {
    /// Build an orchestrator from settings; constructs its own transport.
    pub fn new(settings: &EngineSettings) -> Result<Self, TransportError> {
        Ok(Self {
            registry: EndpointRegistry::new(settings.endpoints.clone()),
            transport: RetryingTransport::from_settings(settings)?,
            chunk_size: settings.chunk_size,
            accept_partial_chunks: settings.accept_partial_chunks,
        })
    }

    /// The registry this orchestrator walks.
    pub fn registry(&self) -> &EndpointRegistry {
        &self.registry
    }

    /// Execute one logical query against the registry.
    ///
    /// The first endpoint whose response parses and passes `validate` wins;
    /// its records and identity are returned and no further endpoints are
    /// contacted.
    pub async fn execute<R>(
        &self,
        query: &LogicalQuery,
        validate: Option<&Validator<R>>,
    ) -> Result<FetchOutcome<R>, AllEndpointsExhausted>
    where
        R: DeserializeOwned,
    {
        let mut attempts = Vec::new();

        for endpoint in self.registry.iter() {
            let url = endpoint.url();
            debug!(url, kind = query.kind(), dialect = ?endpoint.dialect, "trying endpoint");

            match self.attempt_endpoint(endpoint, query, validate).await {
                Ok(records) => {
                    info!(url, kind = query.kind(), count = records.len(), "endpoint produced valid data");
                    return Ok(FetchOutcome {
                        records,
                        source_endpoint: endpoint.clone(),
                    });
                }
                Err(error) => {
                    warn!(url, kind = query.kind(), error = %error, "endpoint attempt failed");
                    attempts.push((url, error));
                }
            }
        }

        Err(AllEndpointsExhausted { attempts })
    }

    async fn attempt_endpoint<R>(
        &self,
        endpoint: &Endpoint,
        query: &LogicalQuery,
        validate: Option<&Validator<R>>,
    ) -> Result<Vec<R>, QueryError>
    where
        R: DeserializeOwned,
    {
        if let LogicalQuery::BatchBalances { accounts, symbol } = query
            && endpoint.dialect == Dialect::EngineCompat
        {
            return self.attempt_chunked(endpoint, accounts, symbol).await;
        }

        let payload = dialect::find_payload(endpoint.dialect, query);
        let body = self.post_json(endpoint, &payload).await?;
        let records = dialect::parse_find_response(endpoint.dialect, query, body)?;

        if let Some(validate) = validate
            && !validate(&records)
        {
            return Err(QueryError::ValidationFailed);
        }
        Ok(records)
    }

    /// Dispatch one EngineCompat batch as sequential chunks.
    ///
    /// A failed chunk is skipped with a warning rather than aborting the
    /// remaining chunks, but by default any chunk failure (or an entirely
    /// empty accumulation) disqualifies the endpoint so that a fully
    /// successful alternate mirror is preferred over a partial one.
    async fn attempt_chunked<R>(
        &self,
        endpoint: &Endpoint,
        accounts: &[String],
        symbol: &str,
    ) -> Result<Vec<R>, QueryError>
    where
        R: DeserializeOwned,
    {
        let chunks = dialect::chunk_payloads(accounts, symbol, self.chunk_size);
        let total = chunks.len();
        debug!(url = endpoint.url(), total, chunk_size = self.chunk_size, "dispatching batch chunks");

        let mut records = Vec::new();
        let mut failed = 0_usize;

        for (index, (chunk_accounts, payload)) in chunks.iter().enumerate() {
            let outcome = async {
                let body = self.post_json(endpoint, payload).await?;
                dialect::parse_chunk_response::<R>(chunk_accounts, body)
            }
            .await;

            match outcome {
                Ok(mut rows) => records.append(&mut rows),
                Err(error) => {
                    warn!(
                        url = endpoint.url(),
                        chunk = index + 1,
                        total,
                        error = %error,
                        "chunk failed, skipping"
                    );
                    failed += 1;
                }
            }
        }

        if failed > 0 && !self.accept_partial_chunks {
            return Err(QueryError::ChunksFailed { failed, total });
        }
        if records.is_empty() {
            return Err(if failed > 0 {
                QueryError::ChunksFailed { failed, total }
            } else {
                QueryError::EmptyResult
            });
        }
        Ok(records)
    }

    async fn post_json(&self, endpoint: &Endpoint, payload: &Value) -> Result<Value, QueryError> {
        let response = self.transport.send(&endpoint.url(), payload).await?;
        response.json().await.map_err(|error| QueryError::Parse {
            dialect: endpoint.dialect,
            message: format!("invalid JSON body: {error}"),
        })
    }
}
