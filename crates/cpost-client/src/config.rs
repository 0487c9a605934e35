//! Czech Post client configuration.
//!
//! Defaults point to the public production endpoint. Override via environment
//! variables or explicit construction for testing.

use std::fmt;
use std::str::FromStr;

use url::Url;

/// Default base URL of the Czech Post B2C services.
pub const DEFAULT_BASE_URL: &str = "https://b2c.cpost.cz";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Language of the state descriptions returned by the carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Czech,
    English,
}

impl Language {
    /// Value of the `language` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Czech => "cz",
            Self::English => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cz" | "cs" => Ok(Self::Czech),
            "en" => Ok(Self::English),
            other => Err(ConfigError::InvalidLanguage(other.to_string())),
        }
    }
}

/// Configuration for connecting to the Czech Post tracking API.
#[derive(Debug, Clone)]
pub struct CzechPostConfig {
    /// Base URL of the B2C services host.
    pub base_url: Url,
    /// Language of state descriptions.
    pub language: Language,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl CzechPostConfig {
    /// Defaults for everything but the base URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            language: Language::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: default_user_agent(),
        }
    }

    /// Production endpoint with default settings.
    pub fn production() -> Result<Self, ConfigError> {
        let base_url = Url::parse(DEFAULT_BASE_URL)
            .map_err(|e| ConfigError::InvalidUrl(DEFAULT_BASE_URL.to_string(), e.to_string()))?;
        Ok(Self::new(base_url))
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `CPOST_BASE_URL` (default: `https://b2c.cpost.cz`)
    /// - `CPOST_LANGUAGE` (`cz` or `en`, default: `cz`)
    /// - `CPOST_TIMEOUT_SECS` (default: 30; `0` or garbage fall back to the default)
    /// - `CPOST_USER_AGENT` (default: `cpost/<version>`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(ConfigOverrides::default())
    }

    /// Like [`from_env`](Self::from_env), but values present in `overrides`
    /// win and their variables are never read.
    pub fn from_env_with(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok(), overrides)
    }

    fn from_vars(
        var: impl Fn(&str) -> Option<String>,
        overrides: ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let base_url = match overrides.base_url {
            Some(raw) => parse_url("--base-url", &raw)?,
            None => parse_url(
                "CPOST_BASE_URL",
                &var("CPOST_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            )?,
        };

        let language = match overrides.language {
            Some(language) => language,
            None => match var("CPOST_LANGUAGE") {
                Some(raw) => raw.parse()?,
                None => Language::default(),
            },
        };

        Ok(Self {
            base_url,
            language,
            timeout_secs: var("CPOST_TIMEOUT_SECS")
                .and_then(|s| s.trim().parse().ok())
                .filter(|secs: &u64| *secs > 0)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            user_agent: var("CPOST_USER_AGENT").unwrap_or_else(default_user_agent),
        })
    }

    /// Configuration pointing at a local mock server (for testing).
    pub fn local_mock(base_url: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(base_url)
            .map_err(|e| ConfigError::InvalidUrl(base_url.to_string(), e.to_string()))?;
        Ok(Self {
            timeout_secs: 5,
            ..Self::new(url)
        })
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }
}

fn default_user_agent() -> String {
    format!("cpost/{}", env!("CARGO_PKG_VERSION"))
}

fn parse_url(source: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(source.to_string(), e.to_string()))
}

/// Values that take precedence over the environment, e.g. from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub language: Option<Language>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("unsupported language \"{0}\", expected \"cz\" or \"en\"")]
    InvalidLanguage(String),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_uses_defaults() {
        let cfg = CzechPostConfig::production().unwrap();
        assert_eq!(cfg.base_url.as_str(), "https://b2c.cpost.cz/");
        assert_eq!(cfg.language, Language::Czech);
        assert_eq!(cfg.timeout_secs, 30);
        assert!(cfg.user_agent.starts_with("cpost/"));
    }

    #[test]
    fn local_mock_builds_valid_config() {
        let cfg = CzechPostConfig::local_mock("http://127.0.0.1:9000").unwrap();
        assert_eq!(cfg.base_url.as_str(), "http://127.0.0.1:9000/");
        assert_eq!(cfg.timeout_secs, 5);
    }

    #[test]
    fn local_mock_rejects_garbage() {
        assert!(matches!(
            CzechPostConfig::local_mock("not a url"),
            Err(ConfigError::InvalidUrl(_, _))
        ));
    }

    #[test]
    fn language_parses_known_values() {
        assert_eq!("cz".parse::<Language>().unwrap(), Language::Czech);
        assert_eq!("CS".parse::<Language>().unwrap(), Language::Czech);
        assert_eq!(" en ".parse::<Language>().unwrap(), Language::English);
        assert!("de".parse::<Language>().is_err());
    }

    #[test]
    fn language_query_value() {
        assert_eq!(Language::Czech.as_str(), "cz");
        assert_eq!(Language::English.to_string(), "en");
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: std::collections::HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn from_vars_uses_defaults_when_unset() {
        let cfg = CzechPostConfig::from_vars(vars(&[]), ConfigOverrides::default()).unwrap();
        assert_eq!(cfg.base_url.as_str(), "https://b2c.cpost.cz/");
        assert_eq!(cfg.language, Language::Czech);
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn from_vars_reads_all_variables() {
        let cfg = CzechPostConfig::from_vars(
            vars(&[
                ("CPOST_BASE_URL", "http://127.0.0.1:8080"),
                ("CPOST_LANGUAGE", "en"),
                ("CPOST_TIMEOUT_SECS", "7"),
                ("CPOST_USER_AGENT", "tracker/1"),
            ]),
            ConfigOverrides::default(),
        )
        .unwrap();
        assert_eq!(cfg.base_url.as_str(), "http://127.0.0.1:8080/");
        assert_eq!(cfg.language, Language::English);
        assert_eq!(cfg.timeout_secs, 7);
        assert_eq!(cfg.user_agent, "tracker/1");
    }

    #[test]
    fn invalid_base_url_variable_is_rejected() {
        let result = CzechPostConfig::from_vars(
            vars(&[("CPOST_BASE_URL", "not a url")]),
            ConfigOverrides::default(),
        );
        assert!(matches!(result, Err(ConfigError::InvalidUrl(_, _))));
    }

    #[test]
    fn invalid_language_variable_is_rejected() {
        let result = CzechPostConfig::from_vars(
            vars(&[("CPOST_LANGUAGE", "de")]),
            ConfigOverrides::default(),
        );
        assert!(matches!(result, Err(ConfigError::InvalidLanguage(_))));
    }

    #[test]
    fn overrides_win_over_invalid_variables() {
        let cfg = CzechPostConfig::from_vars(
            vars(&[("CPOST_BASE_URL", "not a url"), ("CPOST_LANGUAGE", "de")]),
            ConfigOverrides {
                base_url: Some("http://127.0.0.1:8080".into()),
                language: Some(Language::English),
            },
        )
        .unwrap();
        assert_eq!(cfg.base_url.as_str(), "http://127.0.0.1:8080/");
        assert_eq!(cfg.language, Language::English);
    }

    #[test]
    fn invalid_override_url_is_rejected() {
        let result = CzechPostConfig::from_vars(
            vars(&[]),
            ConfigOverrides {
                base_url: Some("not a url".into()),
                language: None,
            },
        );
        assert!(matches!(result, Err(ConfigError::InvalidUrl(_, _))));
    }

    #[test]
    fn zero_or_garbage_timeout_falls_back_to_default() {
        for raw in ["0", " 0 ", "soon", "-5"] {
            let cfg = CzechPostConfig::from_vars(
                vars(&[("CPOST_TIMEOUT_SECS", raw)]),
                ConfigOverrides::default(),
            )
            .unwrap();
            assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS, "raw: {raw:?}");
        }
    }
}
