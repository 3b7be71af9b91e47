//! Client configuration shared by every Farmhand front end.
//!
//! A `ClientConfig` names the farm backend, the optional weather provider and
//! transport settings. Values are normalized on read so callers can assemble a
//! config from files, environment variables and flags without pre-cleaning.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::{is_http_url, normalize_text_option};

pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub weather_api_key: Option<String>,
    #[serde(default)]
    pub weather_base_url: Option<String>,
    /// Per-request timeout; `None` leaves timeouts to the transport.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Config pointing at an explicit backend base URL.
    pub fn for_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: Some(api_base_url.into()),
            ..Self::default()
        }
    }

    /// Normalized backend base URL. Required for every backend call.
    pub fn api_base_url(&self) -> Result<String> {
        let raw = normalize_text_option(self.api_base_url.clone()).ok_or_else(|| {
            Error::InvalidConfiguration("api_base_url must not be empty".to_string())
        })?;
        normalize_base_url(&raw, "api_base_url")
    }

    pub fn weather_api_key(&self) -> Option<String> {
        normalize_text_option(self.weather_api_key.clone())
    }

    pub fn weather_base_url(&self) -> Result<String> {
        match normalize_text_option(self.weather_base_url.clone()) {
            Some(url) => normalize_base_url(&url, "weather_base_url"),
            None => Ok(DEFAULT_WEATHER_BASE_URL.to_string()),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Returns a config where every value set in `overrides` replaces ours.
    #[must_use]
    pub fn merged_with(self, overrides: Self) -> Self {
        Self {
            api_base_url: normalize_text_option(overrides.api_base_url)
                .or_else(|| normalize_text_option(self.api_base_url)),
            weather_api_key: normalize_text_option(overrides.weather_api_key)
                .or_else(|| normalize_text_option(self.weather_api_key)),
            weather_base_url: normalize_text_option(overrides.weather_base_url)
                .or_else(|| normalize_text_option(self.weather_base_url)),
            request_timeout_secs: overrides.request_timeout_secs.or(self.request_timeout_secs),
        }
    }

    /// Builds the HTTP client every API call goes through.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}

/// Trim, require an http(s) scheme and drop trailing slashes.
pub fn normalize_base_url(raw: &str, field: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::InvalidConfiguration(format!(
            "{field} must not be empty"
        )));
    }
    if !is_http_url(trimmed) {
        return Err(Error::InvalidConfiguration(format!(
            "{field} must include http:// or https://"
        )));
    }
    Ok(trimmed.to_string())
}
