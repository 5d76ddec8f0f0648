use crate::constants::{CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH, DEFAULT_SHEET_NAME, DEFAULT_USER_AGENT};
use crate::error::{Result, ScraperError};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    /// Extra attempts after the first failed request.
    pub retries: u32,
    pub retry_backoff_ms: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            retries: 2,
            retry_backoff_ms: 500,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(u64::from(attempt)))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub sheet_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }
}

impl Config {
    /// Load from `explicit`, then `$EQUIPMENT_SCRAPER_CONFIG`, then `scraper.toml`.
    ///
    /// Only the fallback file may be absent; a named file that cannot be read is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let named = explicit
            .map(|p| p.to_path_buf())
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(Into::into));

        match named {
            Some(path) => Self::from_file(&path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_PATH))
            }
            None => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ScraperError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.http.timeout_secs == 0 {
            return Err(ScraperError::Config("http.timeout_secs must be positive".into()));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::from_toml("[http]\nretries = 5\n").unwrap();
        assert_eq!(config.http.retries, 5);
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.output.sheet_name, "Scraped Data");
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = Config::from_toml("[http]\ntimeout_secs = 0\n").unwrap_err();
        assert!(matches!(err, ScraperError::Config(_)));
    }

    #[test]
    fn missing_named_file_is_a_config_error() {
        let err = Config::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ScraperError::Config(_)));
    }

    #[test]
    fn backoff_grows_linearly() {
        let http = HttpConfig {
            retry_backoff_ms: 100,
            ..HttpConfig::default()
        };
        assert_eq!(http.backoff(1), Duration::from_millis(100));
        assert_eq!(http.backoff(3), Duration::from_millis(300));
    }
}
