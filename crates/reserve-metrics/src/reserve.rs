// SPDX-FileCopyrightText: 2026 OffChain Luxembourg
//
// SPDX-License-Identifier: MIT

//! Treasury reserve ratio
//!
//! The treasury holds HBD; liabilities are the publicly circulating OCLT.
//! Both sides are converted to OCLT terms: HBD is taken as USD-pegged,
//! crossed through the USD/EUR rate, then through the fixed offering
//! price. The ratio is bucketed into the configured status bands.

use std::fmt;

use serde::Serialize;

use crate::config::ReserveLimits;

/// Traffic-light bucket for the reserve ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReserveStatus {
    /// Ratio at or above the soft limit.
    Healthy,
    /// Ratio below the soft limit.
    Caution,
    /// Ratio below the medium limit.
    Warning,
    /// Ratio below the hard limit.
    Critical,
}

impl fmt::Display for ReserveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Healthy => write!(f, "healthy"),
            Self::Caution => write!(f, "caution"),
            Self::Warning => write!(f, "warning"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Raw figures the report is computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReserveInputs {
    /// Treasury HBD holdings, liquid plus savings.
    pub treasury_hbd: f64,
    /// USD per EUR reference rate.
    pub usd_per_eur: f64,
    /// Fixed offering price, OCLT per EUR.
    pub oclt_per_eur: f64,
    /// Circulating supply reported by the token contract.
    pub circulating_supply: f64,
    /// OCLT parked on the offering account (balance plus stake).
    pub ito_holdings: f64,
}

/// Computed reserve figures plus the status bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReserveReport {
    /// Treasury value expressed in OCLT.
    pub reserves_oclt: f64,
    /// Circulating supply net of offering holdings.
    pub public_circulation: f64,
    /// Reserves over public circulation, in percent.
    pub ratio_percent: f64,
    /// Which band the ratio falls in.
    pub status: ReserveStatus,
}

/// Compute the reserve report for the given inputs and bands.
pub fn reserve_report(inputs: &ReserveInputs, limits: &ReserveLimits) -> ReserveReport {
    // HBD is USD-pegged: HBD -> EUR -> OCLT.
    let reserves_oclt = if inputs.usd_per_eur > 0.0 {
        inputs.treasury_hbd / inputs.usd_per_eur * inputs.oclt_per_eur
    } else {
        0.0
    };

    let public_circulation = (inputs.circulating_supply - inputs.ito_holdings).max(0.0);

    let ratio_percent = if public_circulation > 0.0 {
        reserves_oclt / public_circulation * 100.0
    } else {
        0.0
    };

    let status = if ratio_percent < limits.hard {
        ReserveStatus::Critical
    } else if ratio_percent < limits.medium {
        ReserveStatus::Warning
    } else if ratio_percent < limits.soft {
        ReserveStatus::Caution
    } else {
        ReserveStatus::Healthy
    };

    ReserveReport {
        reserves_oclt,
        public_circulation,
        ratio_percent,
        status,
    }
}
