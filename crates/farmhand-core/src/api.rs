//! HTTP transport for the farm backend.
//!
//! Every backend call goes through `ApiClient`: it builds endpoint URLs from
//! the configured base, attaches the session's bearer token and turns non-2xx
//! responses into `Error::Remote` carrying the server's message, or the
//! caller's fallback when the body has none.

use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::session::Session;
use crate::util::compact_text;

/// Acknowledgement body returned by write endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiMessage {
    /// Server message, or `fallback` when the server sent none.
    pub fn or_fallback(self, fallback: &str) -> String {
        self.message
            .map(|message| message.trim().to_string())
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    client: Client,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = config.api_base_url()?;
        let base_url = Url::parse(&base_url)
            .map_err(|error| Error::InvalidConfiguration(format!("api_base_url: {error}")))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidConfiguration(
                "api_base_url cannot be used as a base URL".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            client: config.http_client()?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Appends percent-encoded path segments to the base URL.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                Error::InvalidConfiguration("api_base_url cannot be used as a base URL".to_string())
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Unauthenticated request (login, registration, password reset).
    pub fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        Ok(self
            .client
            .request(method, self.endpoint(segments)?)
            .header(reqwest::header::ACCEPT, "application/json"))
    }

    /// Request carrying the session's bearer token.
    ///
    /// Fails with `NotAuthenticated` before anything is sent when the session
    /// holds no token.
    pub fn authorized(
        &self,
        session: &Session,
        method: Method,
        segments: &[&str],
    ) -> Result<RequestBuilder> {
        let token = session.token()?;
        Ok(self
            .request(method, segments)?
            .bearer_auth(token.expose()))
    }

    /// Sends `request` and decodes a JSON body.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        fallback: &str,
    ) -> Result<T> {
        let body = read_success_body(request, fallback).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Sends a write request and returns its acknowledgement.
    ///
    /// An empty success body is treated as an acknowledgement without message.
    pub async fn submit(&self, request: RequestBuilder, fallback: &str) -> Result<ApiMessage> {
        let body = read_success_body(request, fallback).await?;
        if body.trim().is_empty() {
            return Ok(ApiMessage::default());
        }
        Ok(serde_json::from_str(&body)?)
    }
}

async fn read_success_body(request: RequestBuilder, fallback: &str) -> Result<String> {
    let response = request
        .send()
        .await
        .map_err(|source| transport_error(fallback, source))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| transport_error(fallback, source))?;

    if !status.is_success() {
        tracing::warn!(
            status = status.as_u16(),
            body = %compact_text(&body),
            "Backend request failed"
        );
        return Err(Error::Remote {
            status: status.as_u16(),
            message: parse_api_error(&body).unwrap_or_else(|| fallback.to_string()),
        });
    }

    Ok(body)
}

fn transport_error(fallback: &str, source: reqwest::Error) -> Error {
    tracing::warn!("Backend request did not complete: {}", source);
    Error::Transport {
        fallback: fallback.to_string(),
        source,
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    error: Option<String>,
    msg: Option<String>,
}

/// Extracts the server's human-readable message from an error body.
pub fn parse_api_error(body: &str) -> Option<String> {
    let payload = serde_json::from_str::<ApiErrorBody>(body).ok()?;
    payload
        .message
        .or(payload.error)
        .or(payload.msg)
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
}
