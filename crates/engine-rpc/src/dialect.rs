// SPDX-FileCopyrightText: 2026 OffChain Luxembourg
//
// SPDX-License-Identifier: MIT

//! Per-dialect wire payload construction and response parsing
//!
//! Raw dialect-specific response shapes never escape this module; every
//! parser returns rows already deserialized into the normalized record types.

use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};

use crate::{
    endpoint::Dialect,
    error::QueryError,
    types::LogicalQuery,
};

const STANDARD_BATCH_LIMIT: u64 = 1000;

/// Table a query targets under a given dialect. EngineCompat mirrors name
/// their balance table `stakes`.
fn table_for(dialect: Dialect, query: &LogicalQuery) -> &'static str {
    match (query, dialect) {
        (LogicalQuery::TokenInfo { .. }, _) => "tokens",
        (_, Dialect::Standard) => "balances",
        (_, Dialect::EngineCompat) => "stakes",
    }
}

/// Build the single JSON-RPC `find` payload for a query.
///
/// Used for single and token-info queries under both dialects, and for batch
/// queries under Standard (which supports the `$in` set operator).
pub(crate) fn find_payload(dialect: Dialect, query: &LogicalQuery) -> Value {
    let query_object = match query {
        LogicalQuery::SingleBalance { account, symbol } => {
            json!({ "symbol": symbol, "account": account })
        }
        LogicalQuery::BatchBalances { accounts, symbol } => {
            json!({ "symbol": symbol, "account": { "$in": accounts } })
        }
        LogicalQuery::TokenInfo { symbol } => json!({ "symbol": symbol }),
    };
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "find",
        "params": {
            "contract": "tokens",
            "table": table_for(dialect, query),
            "query": query_object,
            "limit": if query.is_batch() { STANDARD_BATCH_LIMIT } else { 1 },
        },
    })
}

/// Partition a batch into fixed-size chunks and build one wire payload per
/// chunk: an array of individual requests keyed by a local correlation id.
pub(crate) fn chunk_payloads(
    accounts: &[String],
    symbol: &str,
    chunk_size: usize,
) -> Vec<(Vec<String>, Value)> {
    accounts
        .chunks(chunk_size.max(1))
        .map(|chunk| {
            let requests: Vec<Value> = chunk
                .iter()
                .enumerate()
                .map(|(id, account)| {
                    json!({
                        "jsonrpc": "2.0",
                        "id": id,
                        "method": "find",
                        "params": {
                            "contract": "tokens",
                            "table": "stakes",
                            "query": { "symbol": symbol, "account": account },
                        },
                    })
                })
                .collect();
            (chunk.to_vec(), Value::Array(requests))
        })
        .collect()
}

/// Parse a Standard-dialect response body.
///
/// `result` may be a single object or an array; both normalize to an array.
/// An empty array is a failure for single and token queries but valid for
/// batch queries.
pub(crate) fn parse_find_response<R: DeserializeOwned>(
    dialect: Dialect,
    query: &LogicalQuery,
    body: Value,
) -> Result<Vec<R>, QueryError> {
    let rows = match body.get("result").cloned().unwrap_or(Value::Null) {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        single => vec![single],
    };

    if rows.is_empty() && !query.is_batch() {
        return Err(QueryError::EmptyResult);
    }

    rows.into_iter()
        .map(|row| {
            serde_json::from_value(row).map_err(|error| QueryError::Parse {
                dialect,
                message: error.to_string(),
            })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct SubResponse {
    #[serde(default)]
    id: usize,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcFault>,
}

#[derive(Debug, Deserialize)]
struct RpcFault {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

/// Parse one EngineCompat chunk response.
///
/// The body must be an array of sub-responses, correlated back to the chunk's
/// accounts by local id. A `result: null` means the account has no stake row
/// (valid, skipped); an explicit `error` member fails the whole chunk. Rows
/// missing the `account` field get it injected from correlation.
pub(crate) fn parse_chunk_response<R: DeserializeOwned>(
    chunk_accounts: &[String],
    body: Value,
) -> Result<Vec<R>, QueryError> {
    let parse_error = |message: String| QueryError::Parse {
        dialect: Dialect::EngineCompat,
        message,
    };

    let Value::Array(entries) = body else {
        return Err(parse_error("expected array response for batch chunk".to_string()));
    };

    let mut rows = Vec::new();
    for entry in entries {
        let sub: SubResponse =
            serde_json::from_value(entry).map_err(|error| parse_error(error.to_string()))?;

        if let Some(fault) = sub.error {
            return Err(parse_error(format!(
                "sub-request {} failed: {} (code {})",
                sub.id, fault.message, fault.code
            )));
        }

        let Some(mut result) = sub.result else {
            continue;
        };

        if let Value::Object(ref mut fields) = result
            && !fields.contains_key("account")
        {
            let account = chunk_accounts
                .get(sub.id)
                .ok_or_else(|| parse_error(format!("unknown correlation id {}", sub.id)))?;
            fields.insert("account".to_string(), Value::String(account.clone()));
        }

        rows.push(serde_json::from_value(result).map_err(|error| parse_error(error.to_string()))?);
    }
    Ok(rows)
}
