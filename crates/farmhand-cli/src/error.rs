use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] farmhand_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(
        "Profile '{0}' has no backend URL. Run `farmhand config init --api-base-url <URL>` or set FARMHAND_API_URL."
    )]
    MissingApiUrl(String),
    #[error(
        "Profile '{0}' has no weather API key. Run `farmhand config init --weather-api-key <KEY>` or set OPENWEATHER_API_KEY."
    )]
    MissingWeatherKey(String),
}
