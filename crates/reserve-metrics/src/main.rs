// SPDX-FileCopyrightText: 2026 OffChain Luxembourg
//
// SPDX-License-Identifier: MIT

//! OCLT dashboard snapshot
//!
//! Fetches everything the dashboard shows in one pass and prints it:
//! the staked-vote distribution across DAO members and the treasury
//! reserve report.

use anyhow::{Context, Result};
use engine_rpc::EngineClient;
use external_feeds::{LedgerClient, RateClient};
use reserve_metrics::{DashboardConfig, ReserveInputs, reserve_report, stake_distribution};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/dashboard.toml".to_string());
    let config = DashboardConfig::load(&config_path)
        .with_context(|| format!("failed to load configuration from {config_path}"))?;

    info!(
        members = config.members.len(),
        endpoints = config.engine.endpoints.len(),
        "taking dashboard snapshot"
    );

    let engine = EngineClient::new(config.engine.clone())?;
    let rates = RateClient::new(&config.feeds)?;
    let ledger = LedgerClient::new(&config.feeds)?;

    let (member_balances, ito_balance, token, treasury_hbd, usd_per_eur) = tokio::join!(
        engine.batch_balances(&config.members),
        engine.single_balance(&config.ito_account),
        engine.token_info(),
        ledger.hbd_balance(&config.treasury_account),
        rates.usd_per_eur(),
    );

    let ito_balance = ito_balance.context("offering account balance unavailable")?;
    let token = token.context("token supply unavailable")?;
    let treasury_hbd = treasury_hbd.context("treasury holdings unavailable")?;
    let usd_per_eur = usd_per_eur.context("USD/EUR rate unavailable")?;

    let distribution = stake_distribution(&member_balances);
    println!("Staked votes ({} members, {:.3} OCLT total):", distribution.shares.len(), distribution.total_stake);
    for share in &distribution.shares {
        println!("  {:<24} {:>14.3}  {:>6.2}%", share.account, share.stake, share.percentage);
    }

    let report = reserve_report(
        &ReserveInputs {
            treasury_hbd,
            usd_per_eur,
            oclt_per_eur: config.oclt_per_eur,
            circulating_supply: token.circulating_amount(),
            ito_holdings: ito_balance.balance_amount() + ito_balance.stake_amount(),
        },
        &config.limits,
    );

    println!();
    println!("Treasury reserve:");
    println!("  reserves            {:>14.3} OCLT", report.reserves_oclt);
    println!("  public circulation  {:>14.3} OCLT", report.public_circulation);
    println!("  ratio               {:>13.2}%  ({})", report.ratio_percent, report.status);

    Ok(())
}
