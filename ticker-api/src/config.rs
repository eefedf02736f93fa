use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;
use serde_with::serde_as;
use strum::{Display, EnumString};

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    /// Start with a couple of demo timers instead of an empty list.
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub seed_demo_data: bool,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Layered settings: built-in defaults, `config/base.yaml`,
/// `config/<environment>.yaml`, then `TICKER__*` environment variables.
///
/// The config directory defaults to `./config` and can be moved with
/// `TICKER_CONFIG_DIR`.
pub fn read_config() -> Result<Settings, config::ConfigError> {
    let config_directory = std::env::var("TICKER_CONFIG_DIR")
        .map(PathBuf::from)
        .or_else(|_| std::env::current_dir().map(|dir| dir.join("config")))
        .map_err(|e| config::ConfigError::Message(format!("No config directory: {e}")))?;

    let environment = Environment::from_str(
        std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .as_str(),
    )
    .map_err(|e| config::ConfigError::Message(format!("Invalid APP_ENVIRONMENT: {e}")))?;
    let environment_filename = format!("{}.yaml", environment);

    let settings = config::Config::builder()
        .set_default("application.host", "127.0.0.1")?
        .set_default("application.port", "3000")?
        .set_default("application.seed_demo_data", "false")?
        .add_source(config::File::from(config_directory.join("base.yaml")).required(false))
        .add_source(
            config::File::from(config_directory.join(environment_filename)).required(false),
        )
        .add_source(
            config::Environment::with_prefix("TICKER")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[derive(Display, Debug, EnumString, PartialEq, Eq)]
pub enum Environment {
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parses_case_insensitively() {
        assert_eq!(Environment::from_str("PRODUCTION").unwrap(), Environment::Production);
        assert_eq!(Environment::Local.to_string(), "local");
        assert!(Environment::from_str("staging").is_err());
    }

    #[test]
    fn address_joins_host_and_port() {
        let settings = ApplicationSettings {
            port: 8080,
            host: "0.0.0.0".to_string(),
            seed_demo_data: false,
        };
        assert_eq!(settings.address(), "0.0.0.0:8080");
    }
}
