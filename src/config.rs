use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use crate::error::ConfigError;

pub const LISTEN_ADDR_VAR: &str = "PBP_LISTEN_ADDR";
pub const GAMES_URL_VAR: &str = "PBP_GAMES_URL";
pub const NBA_BASE_URL_VAR: &str = "PBP_NBA_BASE_URL";
pub const UPSTREAM_TIMEOUT_VAR: &str = "PBP_UPSTREAM_TIMEOUT_SECS";

pub const DEFAULT_LISTEN_ADDR: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8081);
pub const DEFAULT_GAMES_URL: &str = "http://localhost:8080/games";
pub const DEFAULT_NBA_BASE_URL: &str = "http://data.nba.net";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 5;

/// Runtime settings for the server and its two upstreams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub games_url: String,
    pub nba_base_url: String,
    pub upstream_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR,
            games_url: DEFAULT_GAMES_URL.to_string(),
            nba_base_url: DEFAULT_NBA_BASE_URL.to_string(),
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Read settings from the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Unset or blank values use the default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let listen_addr = match get(LISTEN_ADDR_VAR) {
            Some(raw) => raw.parse::<SocketAddr>().map_err(|source| ConfigError::ListenAddr {
                var: LISTEN_ADDR_VAR,
                value: raw.clone(),
                source,
            })?,
            None => DEFAULT_LISTEN_ADDR,
        };

        let upstream_timeout = match get(UPSTREAM_TIMEOUT_VAR) {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|source| ConfigError::Timeout {
                    var: UPSTREAM_TIMEOUT_VAR,
                    value: raw.clone(),
                    source,
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        };

        let games_url = get(GAMES_URL_VAR).unwrap_or_else(|| DEFAULT_GAMES_URL.to_string());
        let nba_base_url = get(NBA_BASE_URL_VAR)
            .unwrap_or_else(|| DEFAULT_NBA_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self { listen_addr, games_url, nba_base_url, upstream_timeout })
    }
}
