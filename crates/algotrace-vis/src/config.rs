//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use algotrace_player::DEFAULT_DELAY;
use thiserror::Error;

/// Listen address used when `ALGOTRACE_ADDR` is unset.
pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";

/// Errors reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `ALGOTRACE_ADDR` is not a socket address
    #[error("invalid ALGOTRACE_ADDR {value:?}: {source}")]
    Addr {
        value: String,
        source: std::net::AddrParseError,
    },

    /// `ALGOTRACE_TICK_MS` is not a whole number of milliseconds
    #[error("invalid ALGOTRACE_TICK_MS {value:?}: {source}")]
    Tick {
        value: String,
        source: std::num::ParseIntError,
    },

    /// A zero tick delay would spin the player
    #[error("ALGOTRACE_TICK_MS must be greater than zero")]
    ZeroTick,
}

/// Runtime configuration for the visualization server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisConfig {
    /// Address to bind
    pub addr: SocketAddr,
    /// Delay between playback ticks
    pub tick: Duration,
    /// Directory of frontend assets served under `/`, if any
    pub static_dir: Option<PathBuf>,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            tick: DEFAULT_DELAY,
            static_dir: None,
        }
    }
}

impl VisConfig {
    /// Load config from environment variables.
    ///
    /// - `ALGOTRACE_ADDR`: listen address (default `0.0.0.0:3000`)
    /// - `ALGOTRACE_TICK_MS`: playback delay in milliseconds (default 500)
    /// - `ALGOTRACE_STATIC_DIR`: frontend assets to serve (default none)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load config through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr_value = lookup("ALGOTRACE_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_value
            .parse()
            .map_err(|source| ConfigError::Addr {
                value: addr_value.clone(),
                source,
            })?;

        let tick = match lookup("ALGOTRACE_TICK_MS") {
            Some(value) => {
                let ms: u64 = value
                    .trim()
                    .parse()
                    .map_err(|source| ConfigError::Tick {
                        value: value.clone(),
                        source,
                    })?;
                if ms == 0 {
                    return Err(ConfigError::ZeroTick);
                }
                Duration::from_millis(ms)
            }
            None => DEFAULT_DELAY,
        };

        let static_dir = lookup("ALGOTRACE_STATIC_DIR")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            addr,
            tick,
            static_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = VisConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, VisConfig::default());
        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.tick, Duration::from_millis(500));
    }

    #[test]
    fn reads_every_variable() {
        let config = VisConfig::from_lookup(lookup(&[
            ("ALGOTRACE_ADDR", "127.0.0.1:8080"),
            ("ALGOTRACE_TICK_MS", "120"),
            ("ALGOTRACE_STATIC_DIR", "web/dist"),
        ]))
        .unwrap();
        assert_eq!(config.addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.tick, Duration::from_millis(120));
        assert_eq!(config.static_dir, Some(PathBuf::from("web/dist")));
    }

    #[test]
    fn rejects_bad_values() {
        let err = VisConfig::from_lookup(lookup(&[("ALGOTRACE_ADDR", "localhost")])).unwrap_err();
        assert!(matches!(err, ConfigError::Addr { .. }));
        assert!(err.to_string().contains("\"localhost\""));

        let err = VisConfig::from_lookup(lookup(&[("ALGOTRACE_TICK_MS", "fast")])).unwrap_err();
        assert!(matches!(err, ConfigError::Tick { .. }));

        let err = VisConfig::from_lookup(lookup(&[("ALGOTRACE_TICK_MS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroTick));
    }
}
