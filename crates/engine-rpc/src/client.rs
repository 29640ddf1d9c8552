// SPDX-FileCopyrightText: 2026 OffChain Luxembourg
//
// SPDX-License-Identifier: MIT

//! Consumer-facing fetch operations
//!
//! Three operations back the dashboard: one account's balance, a bulk lookup
//! aligned to input order, and token supply info. Bulk display favors partial
//! data over total failure: batch lookups never hard-fail, they degrade to
//! per-account queries and finally to zero records.

use std::collections::{HashMap, HashSet};

use futures::future::join_all;
use tracing::{debug, warn};

use crate::{
    config::EngineSettings,
    error::{EngineError, TransportError},
    orchestrator::FallbackOrchestrator,
    types::{BalanceRecord, LogicalQuery, TokenInfoRecord},
};

/// Client for the side-chain token RPC mirrors.
#[derive(Debug)]
pub struct EngineClient {
    orchestrator: FallbackOrchestrator,
    symbol: String,
}

impl EngineClient {
    /// Create a client from settings.
    ///
    /// # Errors
    ///
    /// Fails when no endpoints are configured or the HTTP client cannot be
    /// constructed.
    pub fn new(settings: EngineSettings) -> Result<Self, EngineError> {
        if settings.endpoints.is_empty() {
            return Err(EngineError::Config("no endpoints configured".to_string()));
        }
        let orchestrator = FallbackOrchestrator::new(&settings).map_err(|error| match error {
            TransportError::Http(cause) => EngineError::Client(cause),
            other => EngineError::Config(other.to_string()),
        })?;
        Ok(Self {
            orchestrator,
            symbol: settings.symbol,
        })
    }

    /// The orchestrator, for callers that need custom query policies.
    pub fn orchestrator(&self) -> &FallbackOrchestrator {
        &self.orchestrator
    }

    /// Fetch balance and stake for one account.
    ///
    /// # Errors
    ///
    /// Fails with [`EngineError::Exhausted`] when every endpoint fails.
    pub async fn single_balance(&self, account: &str) -> Result<BalanceRecord, EngineError> {
        let query = LogicalQuery::single(account, &self.symbol);
        let outcome = self.orchestrator.execute::<BalanceRecord>(&query, None).await?;

        let mut record = outcome
            .records
            .into_iter()
            .next()
            .unwrap_or_else(|| BalanceRecord::zero(account));
        if record.account.is_empty() {
            record.account = account.to_string();
        }
        Ok(record)
    }

    /// Fetch balances for a list of accounts, aligned to input order.
    ///
    /// Duplicates are collapsed before querying and re-expanded afterwards,
    /// receiving identical records. An account with no row at any provider
    /// yields a zero record. The batch is accepted only when the total stake
    /// across it is positive; use [`Self::batch_balances_with`] for a
    /// different policy.
    pub async fn batch_balances(&self, accounts: &[String]) -> Vec<BalanceRecord> {
        self.batch_balances_with(accounts, |records: &[BalanceRecord]| {
            records.iter().map(BalanceRecord::stake_amount).sum::<f64>() > 0.0
        })
        .await
    }

    /// Fetch balances for a list of accounts with a caller-supplied batch
    /// acceptance predicate.
    ///
    /// Never hard-fails: when the batch query exhausts every endpoint, the
    /// client degrades to independent per-account queries (issued
    /// concurrently), and an account whose single query also fails everywhere
    /// yields a zero record.
    pub async fn batch_balances_with<F>(&self, accounts: &[String], validate: F) -> Vec<BalanceRecord>
    where
        F: Fn(&[BalanceRecord]) -> bool + Send + Sync + 'static,
    {
        let unique = dedupe(accounts);
        let query = LogicalQuery::batch(unique.clone(), &self.symbol);
        debug!(total = accounts.len(), unique = unique.len(), "fetching batch balances");

        let by_account = match self
            .orchestrator
            .execute::<BalanceRecord>(&query, Some(&validate))
            .await
        {
            Ok(outcome) => {
                debug!(
                    endpoint = outcome.source_endpoint.url(),
                    count = outcome.records.len(),
                    "batch query succeeded"
                );
                index_by_account(outcome.records)
            }
            Err(error) => {
                warn!(error = %error, "batch query failed on all endpoints, degrading to single queries");
                self.degraded_batch(&unique).await
            }
        };

        accounts
            .iter()
            .map(|account| {
                by_account
                    .get(account.as_str())
                    .cloned()
                    .unwrap_or_else(|| BalanceRecord::zero(account))
            })
            .collect()
    }

    /// One single-balance query per account, concurrently. A failed account
    /// is left out of the map and resolves to a zero record downstream.
    async fn degraded_batch(&self, unique: &[String]) -> HashMap<String, BalanceRecord> {
        let fetches = unique.iter().map(|account| self.single_balance(account));
        let results = join_all(fetches).await;

        let mut by_account = HashMap::with_capacity(unique.len());
        for (account, result) in unique.iter().zip(results) {
            match result {
                Ok(record) => {
                    by_account.insert(account.clone(), record);
                }
                Err(error) => {
                    warn!(account, error = %error, "single-query fallback failed, using zero record");
                }
            }
        }
        by_account
    }

    /// Fetch token supply figures.
    ///
    /// An endpoint reporting a non-positive total supply is disqualified; use
    /// [`Self::token_info_with`] for a different policy.
    ///
    /// # Errors
    ///
    /// Fails with [`EngineError::Exhausted`] when every endpoint fails.
    pub async fn token_info(&self) -> Result<TokenInfoRecord, EngineError> {
        self.token_info_with(|records: &[TokenInfoRecord]| {
            records.first().is_some_and(|info| info.supply_amount() > 0.0)
        })
        .await
    }

    /// Fetch token supply figures with a caller-supplied acceptance predicate.
    ///
    /// # Errors
    ///
    /// Fails with [`EngineError::Exhausted`] when every endpoint fails.
    pub async fn token_info_with<F>(&self, validate: F) -> Result<TokenInfoRecord, EngineError>
    where
        F: Fn(&[TokenInfoRecord]) -> bool + Send + Sync + 'static,
    {
        let query = LogicalQuery::token_info(&self.symbol);
        let outcome = self
            .orchestrator
            .execute::<TokenInfoRecord>(&query, Some(&validate))
            .await?;
        Ok(outcome.records.into_iter().next().unwrap_or_default())
    }
}

/// Unique accounts in first-seen order.
fn dedupe(accounts: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for account in accounts {
        if seen.insert(account.as_str()) {
            unique.push(account.clone());
        }
    }
    unique
}

/// First row per account wins; later duplicates from a mirror are ignored.
fn index_by_account(records: Vec<BalanceRecord>) -> HashMap<String, BalanceRecord> {
    let mut by_account = HashMap::with_capacity(records.len());
    for record in records {
        by_account.entry(record.account.clone()).or_insert(record);
    }
    by_account
}
