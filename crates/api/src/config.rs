//! Process configuration, read from the environment.
//!
//! | variable | default |
//! |---|---|
//! | `SUPPLYLINE_BIND_ADDR` | `0.0.0.0:8080` |
//! | `SUPPLYLINE_LOG_FORMAT` | `json` (`json` or `pretty`) |
//! | `SUPPLYLINE_SEED_DEFAULTS` | `true` |

use std::net::SocketAddr;

use anyhow::{Context, bail};

use supplyline_observability::LogFormat;

pub const BIND_ADDR_VAR: &str = "SUPPLYLINE_BIND_ADDR";
pub const LOG_FORMAT_VAR: &str = "SUPPLYLINE_LOG_FORMAT";
pub const SEED_DEFAULTS_VAR: &str = "SUPPLYLINE_SEED_DEFAULTS";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub log_format: LogFormat,
    /// Register "Plant A" and "Vendor A" on startup when the store is empty.
    pub seed_defaults: bool,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind_addr = lookup(BIND_ADDR_VAR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .with_context(|| format!("{BIND_ADDR_VAR} must be a socket address"))?;

        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(raw) => raw
                .parse::<LogFormat>()
                .with_context(|| format!("invalid {LOG_FORMAT_VAR}"))?,
            None => LogFormat::default(),
        };

        let seed_defaults = match lookup(SEED_DEFAULTS_VAR) {
            Some(raw) => parse_bool(&raw)
                .with_context(|| format!("invalid {SEED_DEFAULTS_VAR}"))?,
            None => true,
        };

        Ok(Self {
            bind_addr,
            log_format,
            seed_defaults,
        })
    }
}

fn parse_bool(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got '{other}'"),
    }
}
