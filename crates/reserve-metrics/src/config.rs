// SPDX-FileCopyrightText: 2026 OffChain Luxembourg
//
// SPDX-License-Identifier: MIT

//! Dashboard configuration
//!
//! Layered the usual way: built-in defaults, then an optional TOML file,
//! then `DASHBOARD_`-prefixed environment variables. The fetch-layer and
//! provider settings nest under `[engine]` and `[feeds]`.

use config::{Config, ConfigError, Environment as ConfigEnv, File};
use engine_rpc::EngineSettings;
use external_feeds::FeedSettings;
use serde::Deserialize;

/// Reserve-ratio thresholds, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReserveLimits {
    /// Below this the ratio is merely cautionary.
    pub soft: f64,
    /// Below this the ratio is a warning.
    pub medium: f64,
    /// Below this the treasury is critically under-reserved.
    pub hard: f64,
}

impl Default for ReserveLimits {
    fn default() -> Self {
        Self {
            soft: 100.0,
            medium: 50.0,
            hard: 25.0,
        }
    }
}

/// Everything the dashboard needs to produce a snapshot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// DAO member accounts whose stake makes up the vote distribution.
    pub members: Vec<String>,
    /// Account holding the HBD treasury on the base layer.
    pub treasury_account: String,
    /// Account holding unsold initial-offering tokens.
    pub ito_account: String,
    /// Fixed offering price, OCLT per EUR.
    pub oclt_per_eur: f64,
    /// Reserve-ratio status bands.
    pub limits: ReserveLimits,
    /// Side-chain fetch-layer settings.
    pub engine: EngineSettings,
    /// Black-box provider endpoints.
    pub feeds: FeedSettings,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            members: Vec::new(),
            treasury_account: "oclt.treasury".to_string(),
            ito_account: "oclt.ito".to_string(),
            oclt_per_eur: 10.0,
            limits: ReserveLimits::default(),
            engine: EngineSettings::default(),
            feeds: FeedSettings::default(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from `path` (optional file) plus the environment.
    ///
    /// Precedence, lowest to highest: defaults, the file, then variables
    /// such as `DASHBOARD_OCLT_PER_EUR` or `DASHBOARD_ENGINE__CHUNK_SIZE`.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                ConfigEnv::with_prefix("DASHBOARD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_the_public_mirrors() {
        let config = DashboardConfig::default();
        assert!(!config.engine.endpoints.is_empty());
        assert_eq!(config.engine.symbol, "OCLT");
        assert!(config.limits.hard < config.limits.medium);
        assert!(config.limits.medium < config.limits.soft);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = DashboardConfig::load("/nonexistent/dashboard.toml").unwrap();
        assert_eq!(config, DashboardConfig::default());
    }
}
