// SPDX-FileCopyrightText: 2026 OffChain Luxembourg
//
// SPDX-License-Identifier: MIT

//! Governance metrics derived from fetched data
//!
//! Pure arithmetic over the values the fetch layer returns: the treasury
//! reserve ratio with its traffic-light status bands, and the staked-vote
//! distribution across DAO members. Nothing here talks to the network;
//! the `dashboard-snapshot` binary wires these to live clients.

pub mod config;
pub mod distribution;
pub mod reserve;

pub use config::DashboardConfig;
pub use distribution::{StakeDistribution, StakeShare, stake_distribution};
pub use reserve::{ReserveInputs, ReserveReport, ReserveStatus, reserve_report};
