//! Configuration loading and representation.
//!
//! Everything comes from `STOCKSCAN_*` environment variables, read once at startup.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::catalog::open_food_facts::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

pub const BIND_ADDR_VAR: &str = "STOCKSCAN_BIND_ADDR";
pub const INVENTORY_PATH_VAR: &str = "STOCKSCAN_INVENTORY_PATH";
pub const CATALOG_URL_VAR: &str = "STOCKSCAN_CATALOG_URL";
pub const CATALOG_TIMEOUT_VAR: &str = "STOCKSCAN_CATALOG_TIMEOUT_SECS";
pub const BEEP_VAR: &str = "STOCKSCAN_BEEP";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{var}={value:?}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub inventory_path: PathBuf,
    pub catalog_url: String,
    pub catalog_timeout: Duration,
    /// Ring the terminal bell on successful scans.
    pub beep: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            inventory_path: PathBuf::from("products.csv"),
            catalog_url: DEFAULT_BASE_URL.to_string(),
            catalog_timeout: DEFAULT_TIMEOUT,
            beep: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable source; unset variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();

        if let Some(value) = lookup(BIND_ADDR_VAR) {
            cfg.bind_addr = value.parse().map_err(|_| ConfigError {
                var: BIND_ADDR_VAR,
                value: value.clone(),
                reason: "expected host:port",
            })?;
        }

        if let Some(value) = lookup(INVENTORY_PATH_VAR) {
            if value.trim().is_empty() {
                return Err(ConfigError {
                    var: INVENTORY_PATH_VAR,
                    value,
                    reason: "path cannot be empty",
                });
            }
            cfg.inventory_path = PathBuf::from(value);
        }

        if let Some(value) = lookup(CATALOG_URL_VAR) {
            cfg.catalog_url = value;
        }

        if let Some(value) = lookup(CATALOG_TIMEOUT_VAR) {
            let secs: u64 = value.trim().parse().map_err(|_| ConfigError {
                var: CATALOG_TIMEOUT_VAR,
                value: value.clone(),
                reason: "expected whole seconds",
            })?;
            if secs == 0 {
                return Err(ConfigError {
                    var: CATALOG_TIMEOUT_VAR,
                    value,
                    reason: "timeout must be at least one second",
                });
            }
            cfg.catalog_timeout = Duration::from_secs(secs);
        }

        if let Some(value) = lookup(BEEP_VAR) {
            cfg.beep = parse_flag(&value).ok_or(ConfigError {
                var: BEEP_VAR,
                value: value.clone(),
                reason: "expected true/false",
            })?;
        }

        Ok(cfg)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
