//! Today's forecast from OpenWeatherMap.

use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::models::required_text;
use crate::util::local_today_iso;

const UNREACHABLE: &str = "Unable to connect. Check your internet connection.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Provider timestamp, `YYYY-MM-DD HH:MM:SS` in UTC.
    pub dt_txt: String,
    pub main: ForecastMain,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

impl ForecastEntry {
    /// `HH:MM` part of the timestamp.
    pub fn time(&self) -> &str {
        self.dt_txt
            .split_once(' ')
            .map_or(self.dt_txt.as_str(), |(_, time)| time.get(..5).unwrap_or(time))
    }

    pub fn description(&self) -> &str {
        self.weather
            .first()
            .map_or("", |condition| condition.description.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastMain {
    pub temp: f64,
    #[serde(default)]
    pub humidity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    list: Vec<ForecastEntry>,
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    base_url: Url,
    api_key: String,
    client: Client,
}

impl WeatherClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let api_key = config.weather_api_key().ok_or_else(|| {
            Error::InvalidConfiguration("weather_api_key must not be empty".to_string())
        })?;
        let base_url = Url::parse(&config.weather_base_url()?)
            .map_err(|error| Error::InvalidConfiguration(format!("weather_base_url: {error}")))?;

        Ok(Self {
            base_url,
            api_key,
            client: config.http_client()?,
        })
    }

    /// Forecast entries for `location` falling on today's local date.
    ///
    /// An empty result means the provider knows the location but has no
    /// entries left for today.
    pub async fn today_forecast(&self, location: &str) -> Result<Vec<ForecastEntry>> {
        self.forecast_on(location, &local_today_iso()).await
    }

    /// Forecast entries for `location` whose timestamp starts with `date`.
    pub async fn forecast_on(&self, location: &str, date: &str) -> Result<Vec<ForecastEntry>> {
        let location = required_text("location", location, "Please enter a valid location.")?;

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                Error::InvalidConfiguration(
                    "weather_base_url cannot be used as a base URL".to_string(),
                )
            })?
            .pop_if_empty()
            .extend(["data", "2.5", "forecast"]);

        let response = self
            .client
            .get(url)
            .query(&[
                ("q", location.as_str()),
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|source| Error::Transport {
                fallback: UNREACHABLE.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), %location, "Forecast request failed");
            return Err(Error::Remote {
                status: status.as_u16(),
                message: status_message(status),
            });
        }

        let body = response.text().await.map_err(|source| Error::Transport {
            fallback: UNREACHABLE.to_string(),
            source,
        })?;
        let forecast: ForecastResponse = serde_json::from_str(&body)?;
        if forecast.list.is_empty() {
            return Err(Error::NoData("No weather data available for this location."));
        }

        let entries: Vec<_> = forecast
            .list
            .into_iter()
            .filter(|entry| entry.dt_txt.starts_with(date))
            .collect();
        tracing::debug!(%location, date, count = entries.len(), "Fetched forecast");
        Ok(entries)
    }
}

fn status_message(status: StatusCode) -> String {
    match status {
        StatusCode::UNAUTHORIZED => "Invalid API key. Please check your API key.".to_string(),
        StatusCode::NOT_FOUND => "Location not found. Please enter a valid location.".to_string(),
        other => format!("Error: {}. Please try again.", other.as_u16()),
    }
}
