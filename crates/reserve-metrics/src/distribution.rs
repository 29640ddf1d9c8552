// SPDX-FileCopyrightText: 2026 OffChain Luxembourg
//
// SPDX-License-Identifier: MIT

//! Staked-vote distribution across DAO members

use engine_rpc::BalanceRecord;
use serde::Serialize;

/// One member's staked weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StakeShare {
    /// Member account name.
    pub account: String,
    /// Staked amount.
    pub stake: f64,
    /// Share of the total stake, in percent.
    pub percentage: f64,
}

/// Per-member shares, ordered by descending stake.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StakeDistribution {
    /// Shares, largest stake first.
    pub shares: Vec<StakeShare>,
    /// Sum of all member stakes.
    pub total_stake: f64,
}

/// Compute the stake distribution for the given member records.
///
/// If no member holds any stake every share reads zero percent rather
/// than dividing by zero.
pub fn stake_distribution(records: &[BalanceRecord]) -> StakeDistribution {
    let total_stake: f64 = records.iter().map(BalanceRecord::stake_amount).sum();

    let mut shares: Vec<StakeShare> = records
        .iter()
        .map(|record| {
            let stake = record.stake_amount();
            StakeShare {
                account: record.account.clone(),
                stake,
                percentage: if total_stake > 0.0 {
                    stake / total_stake * 100.0
                } else {
                    0.0
                },
            }
        })
        .collect();
    shares.sort_by(|a, b| b.stake.total_cmp(&a.stake));

    StakeDistribution { shares, total_stake }
}
