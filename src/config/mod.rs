//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `REFCHECK_*` environment variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_FALLBACK_LANG, DEFAULT_HALLUCINATION_THRESHOLD, DEFAULT_NATIVE_LANG,
    DEFAULT_OVERRIDES_PATH, LANG_PLACEHOLDER,
};

/// Default Wikidata action API endpoint.
pub const DEFAULT_WIKIDATA_API: &str = "https://www.wikidata.org/w/api.php";

/// Default Wikipedia action API endpoint template (`{lang}` is substituted).
pub const DEFAULT_WIKIPEDIA_API: &str = "https://{lang}.wikipedia.org/w/api.php";

/// Default timeout for a single HTTP request.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Fact-checker configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `REFCHECK_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON override file (question → reference answer). Default: `faq.json`.
    pub overrides_path: PathBuf,

    /// Wikidata action API endpoint.
    pub wikidata_api: String,

    /// Wikipedia action API endpoint template; must contain `{lang}`.
    pub wikipedia_api: String,

    /// Language tried first for encyclopedia lookups and entity labels. Default: `vi`.
    pub native_lang: String,

    /// Language tried second for encyclopedia lookups. Default: `en`.
    pub fallback_lang: String,

    /// Per-request HTTP timeout. Default: 10 seconds.
    pub http_timeout: Duration,

    /// User agent sent to the public knowledge services.
    pub user_agent: String,

    /// Scores below this are labelled a possible hallucination. Default: `0.7`.
    pub hallucination_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            overrides_path: PathBuf::from(DEFAULT_OVERRIDES_PATH),
            wikidata_api: DEFAULT_WIKIDATA_API.to_string(),
            wikipedia_api: DEFAULT_WIKIPEDIA_API.to_string(),
            native_lang: DEFAULT_NATIVE_LANG.to_string(),
            fallback_lang: DEFAULT_FALLBACK_LANG.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            user_agent: default_user_agent(),
            hallucination_threshold: DEFAULT_HALLUCINATION_THRESHOLD,
        }
    }
}

fn default_user_agent() -> String {
    format!("refcheck/{}", env!("CARGO_PKG_VERSION"))
}

impl Config {
    const ENV_OVERRIDES_PATH: &'static str = "REFCHECK_OVERRIDES_PATH";
    const ENV_WIKIDATA_API: &'static str = "REFCHECK_WIKIDATA_API";
    const ENV_WIKIPEDIA_API: &'static str = "REFCHECK_WIKIPEDIA_API";
    const ENV_NATIVE_LANG: &'static str = "REFCHECK_NATIVE_LANG";
    const ENV_FALLBACK_LANG: &'static str = "REFCHECK_FALLBACK_LANG";
    const ENV_HTTP_TIMEOUT_SECS: &'static str = "REFCHECK_HTTP_TIMEOUT_SECS";
    const ENV_USER_AGENT: &'static str = "REFCHECK_USER_AGENT";
    const ENV_THRESHOLD: &'static str = "REFCHECK_THRESHOLD";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let overrides_path =
            Self::parse_path_from_env(Self::ENV_OVERRIDES_PATH, defaults.overrides_path);
        let wikidata_api = Self::parse_string_from_env(Self::ENV_WIKIDATA_API, defaults.wikidata_api);
        let wikipedia_api =
            Self::parse_string_from_env(Self::ENV_WIKIPEDIA_API, defaults.wikipedia_api);
        let native_lang = Self::parse_string_from_env(Self::ENV_NATIVE_LANG, defaults.native_lang);
        let fallback_lang =
            Self::parse_string_from_env(Self::ENV_FALLBACK_LANG, defaults.fallback_lang);
        let http_timeout = Self::parse_timeout_from_env(defaults.http_timeout)?;
        let user_agent = Self::parse_string_from_env(Self::ENV_USER_AGENT, defaults.user_agent);
        let hallucination_threshold =
            Self::parse_threshold_from_env(defaults.hallucination_threshold)?;

        Ok(Self {
            overrides_path,
            wikidata_api,
            wikipedia_api,
            native_lang,
            fallback_lang,
            http_timeout,
            user_agent,
            hallucination_threshold,
        })
    }

    /// Validates paths and basic invariants (does not create the override file).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.overrides_path.is_dir() {
            return Err(ConfigError::NotAFile {
                path: self.overrides_path.clone(),
            });
        }

        if self.native_lang.trim().is_empty() {
            return Err(ConfigError::EmptyLanguage {
                name: Self::ENV_NATIVE_LANG,
            });
        }
        if self.fallback_lang.trim().is_empty() {
            return Err(ConfigError::EmptyLanguage {
                name: Self::ENV_FALLBACK_LANG,
            });
        }

        if !self.wikipedia_api.contains(LANG_PLACEHOLDER) {
            return Err(ConfigError::MissingLangPlaceholder {
                value: self.wikipedia_api.clone(),
            });
        }

        if !(0.0..=1.0).contains(&self.hallucination_threshold) {
            return Err(ConfigError::ThresholdOutOfRange {
                value: self.hallucination_threshold,
            });
        }

        if self.http_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(())
    }

    /// Returns the Wikipedia endpoint for `lang`.
    pub fn wikipedia_api_for(&self, lang: &str) -> String {
        self.wikipedia_api.replace(LANG_PLACEHOLDER, lang)
    }

    fn parse_timeout_from_env(default: Duration) -> Result<Duration, ConfigError> {
        match env::var(Self::ENV_HTTP_TIMEOUT_SECS) {
            Ok(value) => value
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| ConfigError::TimeoutParseError { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_threshold_from_env(default: f64) -> Result<f64, ConfigError> {
        match env::var(Self::ENV_THRESHOLD) {
            Ok(value) => value
                .trim()
                .parse::<f64>()
                .map_err(|e| ConfigError::ThresholdParseError { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or(default)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }
}
