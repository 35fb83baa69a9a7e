//! Configurations for the Zeta editor.

use std::str::FromStr;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "ZETA_LOG";

/// Environment variable selecting the [`BenchmarkMode`].
pub const BENCHMARK_ENV: &str = "ZETA_BENCHMARK";

/// Default filter used when neither `RUST_LOG` nor [`LOG_ENV`] is set.
pub const DEFAULT_LOG_FILTER: &str = "info,winit=warn,calloop=warn";

#[derive(Debug, Clone)]
pub struct Config {
    pub benchmark: BenchmarkMode,
    /// `tracing-subscriber` env-filter directives.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            benchmark: BenchmarkMode::Off,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Build a configuration from the process environment.
    ///
    /// Unset or unparsable variables fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config::default();

        if let Some(filter) = lookup(LOG_ENV).filter(|f| !f.trim().is_empty()) {
            config.log_filter = filter;
        }

        if let Some(mode) = lookup(BENCHMARK_ENV) {
            match mode.parse() {
                Ok(mode) => config.benchmark = mode,
                Err(err) => tracing::warn!("ignoring {}: {}", BENCHMARK_ENV, err),
            }
        }

        config
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BenchmarkMode {
    /// Benchmarking is disabled
    #[default]
    Off,
    /// Benchmarking is enabled, and can be viewed using the built-in viewer
    On,
    /// Benchmarking is enabled, and can be viewed either using the built-in viewer or
    /// using external tools such as 'puffin_viewer'
    WithWebserver,
}

impl BenchmarkMode {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, BenchmarkMode::Off)
    }
}

impl FromStr for BenchmarkMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "off" | "0" | "false" => Ok(BenchmarkMode::Off),
            "on" | "1" | "true" => Ok(BenchmarkMode::On),
            "web" | "webserver" | "http" => Ok(BenchmarkMode::WithWebserver),
            other => Err(format!("unknown benchmark mode '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.benchmark, BenchmarkMode::Off);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_from_lookup() {
        let config = Config::from_lookup(|key| match key {
            LOG_ENV => Some("trace".to_string()),
            BENCHMARK_ENV => Some("web".to_string()),
            _ => None,
        });
        assert_eq!(config.log_filter, "trace");
        assert_eq!(config.benchmark, BenchmarkMode::WithWebserver);
        assert!(config.benchmark.is_enabled());
    }

    #[test]
    fn test_invalid_benchmark_mode_falls_back() {
        let config = Config::from_lookup(|key| (key == BENCHMARK_ENV).then(|| "fast".to_string()));
        assert_eq!(config.benchmark, BenchmarkMode::Off);
    }

    #[test]
    fn test_blank_log_filter_is_ignored() {
        let config = Config::from_lookup(|key| (key == LOG_ENV).then(|| "  ".to_string()));
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }
}
