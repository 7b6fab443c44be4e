#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use toml_config::TomlConfig;

use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, validate_url, Validate};
use std::path::PathBuf;
use std::time::Duration;

/// CLI 參數覆蓋 TOML，TOML 覆蓋預設值
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: Option<String>,
    pub timeout: Duration,
    pub session_path: PathBuf,
    pub log_level: Option<String>,
}

impl ClientSettings {
    pub fn from_parts(
        toml: &TomlConfig,
        session: Option<&str>,
        timeout_secs: Option<u64>,
    ) -> Result<Self> {
        toml.validate()?;

        let settings = Self {
            base_url: toml.base_url().map(str::to_string),
            timeout: Duration::from_secs(timeout_secs.unwrap_or_else(|| toml.timeout_seconds())),
            session_path: PathBuf::from(session.unwrap_or_else(|| toml.session_path())),
            log_level: toml.log_level().map(str::to_string),
        };
        settings.validate()?;
        Ok(settings)
    }

    #[cfg(feature = "cli")]
    pub fn from_cli(cli: &CliConfig) -> Result<Self> {
        let toml = match &cli.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        Self::from_parts(&toml, cli.session.as_deref(), cli.timeout_secs)
    }
}

impl Validate for ClientSettings {
    fn validate(&self) -> Result<()> {
        if let Some(url) = &self.base_url {
            validate_url("service.base_url", url)?;
        }
        validate_range("timeout_secs", self.timeout.as_secs(), 1, 600)?;
        validate_path("session", &self.session_path.to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_values_override_toml() {
        let toml = TomlConfig::from_toml_str(
            r#"
[service]
base_url = "http://localhost:3001/"
timeout_seconds = 10

[session]
path = "./from-toml.json"
"#,
        )
        .unwrap();

        let settings = ClientSettings::from_parts(&toml, Some("./cli.json"), Some(5)).unwrap();
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.session_path, PathBuf::from("./cli.json"));
        assert_eq!(settings.base_url.as_deref(), Some("http://localhost:3001/"));

        let defaults = ClientSettings::from_parts(&toml, None, None).unwrap();
        assert_eq!(defaults.timeout, Duration::from_secs(10));
        assert_eq!(defaults.session_path, PathBuf::from("./from-toml.json"));
    }

    #[test]
    fn test_rejects_zero_timeout_flag() {
        assert!(ClientSettings::from_parts(&TomlConfig::default(), None, Some(0)).is_err());
    }
}
