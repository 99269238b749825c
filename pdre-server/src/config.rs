//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::warn;

use crate::domain::CalculationPeriod;

/// Address to bind when `PDRE_BIND_ADDR` is unset.
const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 3000);

/// Configuration for the capacity server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address the HTTP server listens on.
    pub bind_addr: SocketAddr,

    /// JSON dataset to seed the store from.
    /// The server starts with an empty store when unset.
    pub data_path: Option<PathBuf>,

    /// Where to write the store after each successful area calculation.
    pub snapshot_path: Option<PathBuf>,

    /// Period used when a calculation request does not name one.
    pub default_period: CalculationPeriod,
}

impl ServerConfig {
    /// Read configuration from `PDRE_*` environment variables.
    ///
    /// - `PDRE_BIND_ADDR`: socket address, e.g. `0.0.0.0:8080`
    /// - `PDRE_DATA_PATH`: dataset file to load at start-up
    /// - `PDRE_SNAPSHOT_PATH`: dataset file to write after calculations
    /// - `PDRE_DEFAULT_PERIOD`: `day`, `week`, `month`, `season` or `year`
    ///
    /// Unparseable values are logged and replaced by the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup("PDRE_BIND_ADDR") {
            match addr.parse() {
                Ok(addr) => config.bind_addr = addr,
                Err(e) => warn!(value = %addr, error = %e, "invalid PDRE_BIND_ADDR, using default"),
            }
        }

        config.data_path = lookup("PDRE_DATA_PATH")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        config.snapshot_path = lookup("PDRE_SNAPSHOT_PATH")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        if let Some(period) = lookup("PDRE_DEFAULT_PERIOD") {
            match CalculationPeriod::parse(&period) {
                Ok(period) => config.default_period = period,
                Err(e) => warn!(error = %e, "invalid PDRE_DEFAULT_PERIOD, using default"),
            }
        }

        config
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(DEFAULT_BIND_ADDR),
            data_path: None,
            snapshot_path: None,
            default_period: CalculationPeriod::Month,
        }
    }
}
