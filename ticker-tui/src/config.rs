use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

const API_URL_ENV: &str = "TICKER_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerConfig {
    /// Base URL of the ticker-api server, e.g. "http://localhost:3000"
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// How often the full timer list is fetched from the server.
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
    /// Repaint period while a timer is running.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

fn default_api_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_refresh_interval_ms() -> u64 {
    ticker::DEFAULT_REFRESH_INTERVAL.as_millis() as u64
}

fn default_tick_interval_ms() -> u64 {
    ticker::DEFAULT_TICK_INTERVAL.as_millis() as u64
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            refresh_interval_ms: default_refresh_interval_ms(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl TickerConfig {
    fn config_dir() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("ticker-tui"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("ticker-tui.log"))
    }

    /// Load config from disk, then apply `TICKER_API_URL` if set.
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config at {}", path.display()))?;
            Self::parse(&raw)
                .with_context(|| format!("Failed to parse config at {}", path.display()))?
        } else {
            Self::default()
        };

        if let Ok(api_url) = std::env::var(API_URL_ENV) {
            config.api_url = api_url;
        }
        Ok(config)
    }

    fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)?;
        Ok(())
    }

    /// Write the defaults unless a config file already exists.
    pub fn ensure_exists() -> Result<PathBuf> {
        let path = Self::config_path()?;
        if !path.exists() {
            Self::default().save()?;
        }
        Ok(path)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let config = TickerConfig::parse("api_url = \"http://timers.local\"\n").unwrap();

        assert_eq!(config.api_url, "http://timers.local");
        assert_eq!(config.refresh_interval(), Duration::from_secs(5));
        assert_eq!(config.tick_interval(), Duration::from_millis(50));
    }

    #[test]
    fn defaults_survive_a_save_round_trip() {
        let raw = toml::to_string_pretty(&TickerConfig::default()).unwrap();
        assert_eq!(TickerConfig::parse(&raw).unwrap(), TickerConfig::default());
    }

    #[test]
    fn rejects_malformed_intervals() {
        assert!(TickerConfig::parse("refresh_interval_ms = \"soon\"").is_err());
    }
}
