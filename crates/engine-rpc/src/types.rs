// SPDX-FileCopyrightText: 2026 OffChain Luxembourg
//
// SPDX-License-Identifier: MIT

//! Logical queries and the normalized records they resolve to
//!
//! Records deserialize directly from per-dialect wire rows; serde defaults
//! guarantee the `balance`/`stake` invariant (always present, `"0"` when the
//! source omits them) without a separate normalization pass.

use serde::Deserialize;

/// One caller-facing query intent, independent of wire representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogicalQuery {
    /// Balance and stake for one account.
    SingleBalance {
        /// Account name on the side-chain.
        account: String,
        /// Token symbol.
        symbol: String,
    },
    /// Balances for a unique set of accounts.
    BatchBalances {
        /// Unique account names.
        accounts: Vec<String>,
        /// Token symbol.
        symbol: String,
    },
    /// Supply figures for one token.
    TokenInfo {
        /// Token symbol.
        symbol: String,
    },
}

impl LogicalQuery {
    /// Build a single-balance query.
    pub fn single(account: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self::SingleBalance {
            account: account.into(),
            symbol: symbol.into(),
        }
    }

    /// Build a batch-balances query. Callers pass accounts already deduplicated.
    pub fn batch(accounts: Vec<String>, symbol: impl Into<String>) -> Self {
        Self::BatchBalances {
            accounts,
            symbol: symbol.into(),
        }
    }

    /// Build a token-info query.
    pub fn token_info(symbol: impl Into<String>) -> Self {
        Self::TokenInfo {
            symbol: symbol.into(),
        }
    }

    /// Whether this is a batch query. Empty batch results are valid only here.
    pub fn is_batch(&self) -> bool {
        matches!(self, Self::BatchBalances { .. })
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::SingleBalance { .. } => "single",
            Self::BatchBalances { .. } => "batch",
            Self::TokenInfo { .. } => "token",
        }
    }
}

fn zero() -> String {
    "0".to_string()
}

/// Normalized balance row for one account.
///
/// `balance` and `stake` are decimal amounts kept as strings, exactly as the
/// mirrors return them; they default to `"0"` when a source row omits them
/// and are never null.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BalanceRecord {
    /// Account the row belongs to. Some dialects omit this on the wire; the
    /// parser fills it in from request correlation.
    #[serde(default)]
    pub account: String,
    /// Liquid balance, e.g. `"100.000"`.
    #[serde(default = "zero")]
    pub balance: String,
    /// Staked amount.
    #[serde(default = "zero")]
    pub stake: String,
    /// Amount currently unstaking, when the mirror reports one.
    #[serde(default, rename = "pendingUnstake")]
    pub pending_unstake: Option<String>,
}

impl BalanceRecord {
    /// All-zero record for an account with no row at any provider.
    pub fn zero(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            balance: zero(),
            stake: zero(),
            pending_unstake: None,
        }
    }

    /// Liquid balance as a number; unparseable amounts count as zero.
    pub fn balance_amount(&self) -> f64 {
        self.balance.parse().unwrap_or(0.0)
    }

    /// Staked amount as a number; unparseable amounts count as zero.
    pub fn stake_amount(&self) -> f64 {
        self.stake.parse().unwrap_or(0.0)
    }
}

/// Normalized token supply figures.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenInfoRecord {
    /// Total issued supply.
    #[serde(default = "zero")]
    pub supply: String,
    /// Circulating supply.
    #[serde(default = "zero", rename = "circulatingSupply")]
    pub circulating_supply: String,
}

impl Default for TokenInfoRecord {
    fn default() -> Self {
        Self {
            supply: zero(),
            circulating_supply: zero(),
        }
    }
}

impl TokenInfoRecord {
    /// Total supply as a number; unparseable amounts count as zero.
    pub fn supply_amount(&self) -> f64 {
        self.supply.parse().unwrap_or(0.0)
    }

    /// Circulating supply as a number; unparseable amounts count as zero.
    pub fn circulating_amount(&self) -> f64 {
        self.circulating_supply.parse().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_record_defaults_missing_amounts_to_zero() {
        let record: BalanceRecord =
            serde_json::from_value(serde_json::json!({ "account": "alice" })).unwrap();
        assert_eq!(record.balance, "0");
        assert_eq!(record.stake, "0");
        assert_eq!(record.pending_unstake, None);
    }

    #[test]
    fn balance_record_reads_wire_field_names() {
        let record: BalanceRecord = serde_json::from_value(serde_json::json!({
            "account": "alice",
            "symbol": "OCLT",
            "balance": "10.000",
            "stake": "5.000",
            "pendingUnstake": "1.000"
        }))
        .unwrap();
        assert_eq!(record.balance_amount(), 10.0);
        assert_eq!(record.stake_amount(), 5.0);
        assert_eq!(record.pending_unstake.as_deref(), Some("1.000"));
    }

    #[test]
    fn token_info_reads_circulating_supply() {
        let info: TokenInfoRecord = serde_json::from_value(serde_json::json!({
            "supply": "1000000.000",
            "circulatingSupply": "750000.000",
            "precision": 3
        }))
        .unwrap();
        assert_eq!(info.supply_amount(), 1_000_000.0);
        assert_eq!(info.circulating_amount(), 750_000.0);
    }

    #[test]
    fn unparseable_amounts_count_as_zero() {
        let record = BalanceRecord {
            account: "alice".to_string(),
            balance: "not-a-number".to_string(),
            stake: String::new(),
            pending_unstake: None,
        };
        assert_eq!(record.balance_amount(), 0.0);
        assert_eq!(record.stake_amount(), 0.0);
    }
}
