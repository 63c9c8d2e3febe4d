//! Configuration management for realty-admin
//!
//! Sources, lowest precedence first: `conf/application.yml` (optional),
//! `REALTY_*` environment variables (`__` separates nesting levels), then
//! command line flags.

use std::path::PathBuf;

use config::{Config, Environment, File};
use realty_client::{ClientConfig, config::DEFAULT_TIMEOUT_MS};
use tracing::Level;

use crate::{
    cli::Cli,
    logging::{LogRotation, LoggingConfig},
};

const ENV_PREFIX: &str = "REALTY";

pub const API_BASE_URL: &str = "api.base_url";
pub const API_TIMEOUT_MS: &str = "api.timeout_ms";
pub const API_TOKEN: &str = "api.token";
pub const API_LANG: &str = "api.lang";
pub const LOGGING_LEVEL: &str = "logging.level";
pub const LOGGING_FILE: &str = "logging.file";
pub const LOGGING_DIR: &str = "logging.dir";
pub const LOGGING_ROTATION: &str = "logging.rotation";

/// `REALTY_API__TIMEOUT_MS` maps to `api.timeout_ms`
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Application configuration loaded from config files and environment
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    pub config: Config,
}

impl Configuration {
    /// Load configuration, applying CLI flags as overrides
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let mut overrides: Vec<(&str, String)> = Vec::new();
        if let Some(v) = &cli.api_url {
            overrides.push((API_BASE_URL, v.clone()));
        }
        if let Some(v) = cli.timeout_ms {
            overrides.push((API_TIMEOUT_MS, v.to_string()));
        }
        if let Some(v) = &cli.token {
            overrides.push((API_TOKEN, v.clone()));
        }
        if let Some(v) = &cli.lang {
            overrides.push((API_LANG, v.clone()));
        }
        if let Some(v) = &cli.log_level {
            overrides.push((LOGGING_LEVEL, v.clone()));
        }

        Self::build(&cli.config, Some(environment()), &overrides)
    }

    fn build(
        config_file: &str,
        environment: Option<Environment>,
        overrides: &[(&str, String)],
    ) -> anyhow::Result<Self> {
        let mut config_builder =
            Config::builder().add_source(File::with_name(config_file).required(false));

        if let Some(environment) = environment {
            config_builder = config_builder.add_source(environment);
        }

        for (key, value) in overrides {
            config_builder = config_builder.set_override(*key, value.as_str())?;
        }

        Ok(Configuration {
            config: config_builder.build()?,
        })
    }

    // ========================================================================
    // API Configuration
    // ========================================================================

    /// `api.base_url`, else `REALTY_API_URL`, else the local default
    pub fn api_base_url(&self) -> String {
        self.config
            .get_string(API_BASE_URL)
            .unwrap_or_else(|_| ClientConfig::from_env().base_url)
    }

    pub fn api_timeout_ms(&self) -> u64 {
        self.config
            .get_int(API_TIMEOUT_MS)
            .ok()
            .and_then(|v| u64::try_from(v).ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS)
    }

    pub fn api_token(&self) -> Option<String> {
        self.config
            .get_string(API_TOKEN)
            .ok()
            .filter(|t| !t.is_empty())
    }

    pub fn api_lang(&self) -> Option<String> {
        self.config
            .get_string(API_LANG)
            .ok()
            .filter(|l| !l.is_empty())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.api_base_url()).with_timeout(self.api_timeout_ms())
    }

    // ========================================================================
    // Logging Configuration
    // ========================================================================

    pub fn logging_level(&self) -> Level {
        self.config
            .get_string(LOGGING_LEVEL)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(Level::WARN)
    }

    pub fn logging_file(&self) -> bool {
        self.config.get_bool(LOGGING_FILE).unwrap_or(false)
    }

    pub fn logging_dir(&self) -> PathBuf {
        self.config
            .get_string(LOGGING_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("logs"))
    }

    pub fn logging_rotation(&self) -> LogRotation {
        self.config
            .get_string(LOGGING_ROTATION)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(LogRotation::Daily)
    }

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            log_dir: self.logging_dir(),
            level: self.logging_level(),
            file_logging: self.logging_file(),
            rotation: self.logging_rotation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use realty_client::config::DEFAULT_BASE_URL;

    #[test]
    fn test_defaults_without_file() {
        let configuration = Configuration::build("does/not/exist.yml", None, &[]).unwrap();

        assert_eq!(configuration.api_base_url(), DEFAULT_BASE_URL);
        assert_eq!(configuration.api_timeout_ms(), DEFAULT_TIMEOUT_MS);
        assert_eq!(configuration.api_token(), None);
        assert_eq!(configuration.logging_level(), Level::WARN);
        assert!(!configuration.logging_file());
        assert!(matches!(configuration.logging_rotation(), LogRotation::Daily));
    }

    #[test]
    fn test_overrides_take_effect() {
        let overrides = [
            (API_BASE_URL, "https://api.example.com/api".to_string()),
            (API_TIMEOUT_MS, "2500".to_string()),
            (API_TOKEN, "secret".to_string()),
            (LOGGING_LEVEL, "debug".to_string()),
        ];
        let configuration = Configuration::build("does/not/exist.yml", None, &overrides).unwrap();

        let client = configuration.client_config();
        assert_eq!(client.base_url, "https://api.example.com/api");
        assert_eq!(client.timeout_ms, 2500);
        assert_eq!(configuration.api_token().as_deref(), Some("secret"));
        assert_eq!(configuration.logging_level(), Level::DEBUG);
    }

    #[test]
    fn test_environment_variables_map_to_nested_keys() {
        let vars: config::Map<String, String> = [
            ("REALTY_API__TIMEOUT_MS", "1234"),
            ("REALTY_LOGGING__LEVEL", "debug"),
            ("REALTY_LOGGING__FILE", "true"),
            ("OTHER_API__TIMEOUT_MS", "1"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let environment = environment().source(Some(vars));
        let configuration =
            Configuration::build("does/not/exist.yml", Some(environment), &[]).unwrap();

        assert_eq!(configuration.api_timeout_ms(), 1234);
        assert_eq!(configuration.logging_level(), Level::DEBUG);
        assert!(configuration.logging_file());
    }

    #[test]
    fn test_cli_overrides_environment() {
        let vars: config::Map<String, String> =
            [("REALTY_API__TIMEOUT_MS".to_string(), "1234".to_string())]
                .into_iter()
                .collect();
        let overrides = [(API_TIMEOUT_MS, "50".to_string())];

        let configuration = Configuration::build(
            "does/not/exist.yml",
            Some(environment().source(Some(vars))),
            &overrides,
        )
        .unwrap();

        assert_eq!(configuration.api_timeout_ms(), 50);
    }

    #[test]
    fn test_empty_token_is_none() {
        let overrides = [(API_TOKEN, String::new())];
        let configuration = Configuration::build("does/not/exist.yml", None, &overrides).unwrap();
        assert_eq!(configuration.api_token(), None);
    }

    #[test]
    fn test_sample_file_parses() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/conf/application.yml");
        let configuration = Configuration::build(path, None, &[]).unwrap();

        assert_eq!(configuration.api_base_url(), "http://127.0.0.1:8000/api");
        assert_eq!(configuration.api_lang().as_deref(), Some("en"));
        assert_eq!(configuration.logging_level(), Level::INFO);
        assert_eq!(configuration.logging_dir(), PathBuf::from("logs"));
    }
}
