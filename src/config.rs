//! Client configuration parsed from environment variables.

use crate::i18n::Locale;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {var}")]
    Missing { var: String },

    #[error("invalid value for {var}: {value}")]
    Invalid { var: String, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API origin, no trailing slash.
    pub api_base_url: String,
    pub timeouts: Timeouts,
    pub locale: Locale,
}

impl ClientConfig {
    /// Config with default timeouts and locale.
    #[must_use]
    pub fn new(api_base_url: impl Into<String>) -> Self {
        let api_base_url: String = api_base_url.into();
        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_owned(),
            timeouts: Timeouts::default(),
            locale: Locale::default(),
        }
    }

    /// Build typed client config from environment variables.
    ///
    /// Required:
    /// - `BACKOFFICE_API_BASE_URL`
    ///
    /// Optional:
    /// - `BACKOFFICE_REQUEST_TIMEOUT_SECS`: default 10
    /// - `BACKOFFICE_CONNECT_TIMEOUT_SECS`: default 5
    /// - `BACKOFFICE_LOCALE`: `en-US` (default) or `id-ID`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the base URL is missing or a value does
    /// not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] over an arbitrary lookup.
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("BACKOFFICE_API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::Missing { var: "BACKOFFICE_API_BASE_URL".into() })?;

        let timeouts = Timeouts {
            request_secs: parse_u64(&lookup, "BACKOFFICE_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: parse_u64(&lookup, "BACKOFFICE_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };

        let locale = match lookup("BACKOFFICE_LOCALE") {
            None => Locale::default(),
            Some(raw) => Locale::from_code(&raw)
                .ok_or(ConfigError::Invalid { var: "BACKOFFICE_LOCALE".into(), value: raw })?,
        };

        Ok(Self { timeouts, locale, ..Self::new(api_base_url.trim()) })
    }
}

fn parse_u64<F>(lookup: &F, key: &str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::Invalid { var: key.into(), value: raw }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
