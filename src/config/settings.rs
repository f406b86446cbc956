//! Process settings read from the environment.

use std::env;
use std::path::PathBuf;

/// Default socket address of the HTTP server.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Default directory holding `payroll.yaml` and `weather.yaml`.
pub const DEFAULT_CONFIG_DIR: &str = "./config/default";

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "shift_payroll=info";

/// Settings that vary per deployment rather than per rate table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Address the HTTP server binds to (`PAYROLL_BIND_ADDR`).
    pub bind_addr: String,
    /// Directory with the YAML configuration (`PAYROLL_CONFIG_DIR`).
    pub config_dir: PathBuf,
    /// Forecast API key (`WEATHER_API_KEY`); weather is disabled without it.
    pub weather_api_key: Option<String>,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through an arbitrary lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            bind_addr: non_empty("PAYROLL_BIND_ADDR")
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            config_dir: non_empty("PAYROLL_CONFIG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            weather_api_key: non_empty("WEATHER_API_KEY"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let settings = Settings::from_lookup(lookup_from(&[]));

        assert_eq!(settings.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(settings.config_dir, PathBuf::from(DEFAULT_CONFIG_DIR));
        assert_eq!(settings.weather_api_key, None);
    }

    #[test]
    fn test_values_are_read_from_lookup() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("PAYROLL_BIND_ADDR", "0.0.0.0:8080"),
            ("PAYROLL_CONFIG_DIR", "/etc/shift-payroll"),
            ("WEATHER_API_KEY", "secret"),
        ]));

        assert_eq!(settings.bind_addr, "0.0.0.0:8080");
        assert_eq!(settings.config_dir, PathBuf::from("/etc/shift-payroll"));
        assert_eq!(settings.weather_api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let settings = Settings::from_lookup(lookup_from(&[("WEATHER_API_KEY", "  ")]));
        assert_eq!(settings.weather_api_key, None);
    }
}
