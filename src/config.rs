use crate::error::{config_error, env_error, AgendaResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Default listening port
pub const DEFAULT_PORT: u16 = 10000;

/// Default UI locale
pub const DEFAULT_LOCALE: &str = "pt-BR";

/// Optional file with defaults, overridden by the environment
pub const CONFIG_FILE: &str = "config/agenda.toml";

/// Main configuration structure for the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Address to bind the HTTP listener to
    pub bind_address: String,
    /// Port to listen on
    pub port: u16,
    /// Redis connection string; in-memory store when absent
    pub redis_url: Option<String>,
    /// Shared secret for bearer authentication on the API
    pub secret_key: Option<String>,
    /// Base URL the calendar page uses to reach the event API
    pub api_base_url: String,
    /// Locale for the calendar page
    pub locale: String,
    /// Directory holding static assets
    pub public_dir: PathBuf,
}

/// Values accepted in the config file; every field is optional
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    bind_address: Option<String>,
    port: Option<u16>,
    redis_url: Option<String>,
    secret_key: Option<String>,
    api_base_url: Option<String>,
    locale: Option<String>,
    public_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from `.env`, the config file and the environment
    pub fn load() -> AgendaResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let file = match fs::read_to_string(CONFIG_FILE) {
            Ok(content) => toml::from_str::<FileConfig>(&content)?,
            Err(_) => FileConfig::default(),
        };

        Self::from_sources(file, |key| env::var(key).ok())
    }

    fn from_sources(
        file: FileConfig,
        var: impl Fn(&str) -> Option<String>,
    ) -> AgendaResult<Self> {
        let port = match var("PORT") {
            Some(p) => p.parse::<u16>().map_err(|_| env_error("PORT"))?,
            None => file.port.unwrap_or(DEFAULT_PORT),
        };

        let bind_address = var("BIND_ADDRESS")
            .or(file.bind_address)
            .unwrap_or_else(|| "0.0.0.0".to_string());

        // Empty values mean "not configured"
        let redis_url = var("REDIS_URL")
            .or(file.redis_url)
            .filter(|s| !s.trim().is_empty());
        let secret_key = var("SECRET_KEY")
            .or(file.secret_key)
            .filter(|s| !s.trim().is_empty());

        let api_base_url = var("AGENDA_API_URL")
            .or(file.api_base_url)
            .unwrap_or_else(|| format!("http://127.0.0.1:{}", port));
        url::Url::parse(&api_base_url)
            .map_err(|e| config_error(&format!("Invalid AGENDA_API_URL: {}", e)))?;

        let locale = var("AGENDA_LOCALE")
            .or(file.locale)
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string());
        if !crate::i18n::is_supported(&locale) {
            return Err(config_error(&format!("Unsupported locale: {}", locale)));
        }

        let public_dir = var("PUBLIC_DIR")
            .map(PathBuf::from)
            .or(file.public_dir)
            .unwrap_or_else(|| PathBuf::from("public"));

        Ok(Config {
            bind_address,
            port,
            redis_url,
            secret_key,
            api_base_url,
            locale,
            public_dir,
        })
    }

    /// Whether bearer authentication is enforced on the API
    pub fn auth_enabled(&self) -> bool {
        self.secret_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)], file: FileConfig) -> AgendaResult<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_sources(file, |key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[], FileConfig::default()).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.api_base_url, "http://127.0.0.1:10000");
        assert_eq!(config.locale, "pt-BR");
        assert!(config.redis_url.is_none());
        assert!(!config.auth_enabled());
    }

    #[test]
    fn test_env_overrides_file() {
        let file: FileConfig = toml::from_str("port = 8080\nlocale = \"en\"").unwrap();
        let config = load(&[("PORT", "9000"), ("SECRET_KEY", "s3cret")], file).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.locale, "en");
        assert_eq!(config.api_base_url, "http://127.0.0.1:9000");
        assert!(config.auth_enabled());
    }

    #[test]
    fn test_empty_secret_disables_auth() {
        let config = load(&[("SECRET_KEY", "  ")], FileConfig::default()).unwrap();
        assert!(!config.auth_enabled());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(load(&[("PORT", "not-a-port")], FileConfig::default()).is_err());
        assert!(load(&[("AGENDA_API_URL", "::")], FileConfig::default()).is_err());
        assert!(load(&[("AGENDA_LOCALE", "xx")], FileConfig::default()).is_err());
    }
}
