use std::path::PathBuf;
use std::time::Duration;

use crate::apr::manager::DEFAULT_REFRESH;
use crate::error::ConfigError;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Tick interval of the simulation.
    ///
    /// Also the divisor for the noise step, so every tick inside one window
    /// samples the same noise.
    pub refresh: Duration,

    /// JSON array of pools to simulate. `None` => built-in demo pools.
    pub pools_file: Option<PathBuf>,

    /// How often the pool file is re-read. Each reload is a new upstream
    /// list and therefore re-seeds every pool. `None` => load once.
    pub reload_every: Option<Duration>,

    /// Emit JSON logs instead of pretty output.
    pub json_logs: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            refresh: DEFAULT_REFRESH,
            pools_file: None,
            reload_every: None,
            json_logs: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let refresh = match parse_ms(&lookup, "APR_REFRESH_MS")? {
            Some(0) => return Err(ConfigError::Zero { key: "APR_REFRESH_MS" }),
            Some(ms) => Duration::from_millis(ms),
            None => defaults.refresh,
        };

        let reload_every = match parse_ms(&lookup, "APR_RELOAD_MS")? {
            Some(0) | None => None,
            Some(ms) => Some(Duration::from_millis(ms)),
        };

        let pools_file = lookup("APR_POOLS_FILE")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let json_logs = lookup("APP_ENV").unwrap_or_default() == "production";

        Ok(Self {
            refresh,
            pools_file,
            reload_every,
            json_logs,
        })
    }
}

fn parse_ms<F>(lookup: &F, key: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };

    raw.trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidNumber { key, value: raw })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(cfg.refresh, Duration::from_millis(15_000));
        assert!(cfg.pools_file.is_none());
        assert!(cfg.reload_every.is_none());
        assert!(!cfg.json_logs);
    }

    #[test]
    fn reads_overrides() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("APR_REFRESH_MS", "5000"),
            ("APR_RELOAD_MS", "60000"),
            ("APR_POOLS_FILE", "pools.json"),
            ("APP_ENV", "production"),
        ]))
        .unwrap();

        assert_eq!(cfg.refresh, Duration::from_secs(5));
        assert_eq!(cfg.reload_every, Some(Duration::from_secs(60)));
        assert_eq!(cfg.pools_file, Some(PathBuf::from("pools.json")));
        assert!(cfg.json_logs);
    }

    #[test]
    fn rejects_zero_and_garbage_refresh() {
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[("APR_REFRESH_MS", "0")])),
            Err(ConfigError::Zero { .. })
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[("APR_REFRESH_MS", "15s")])),
            Err(ConfigError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn zero_reload_disables_reloading() {
        let cfg = AppConfig::from_lookup(lookup(&[("APR_RELOAD_MS", "0")])).unwrap();
        assert!(cfg.reload_every.is_none());
    }
}
