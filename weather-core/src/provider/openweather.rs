use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::FetchError;

use super::WeatherProvider;

#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

// Keeps the API key out of logs.
impl std::fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn fetch(&self, endpoint: &str, city: &str, units: &str) -> Result<Value, FetchError> {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!(%url, city, units, "requesting OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", units)])
            .send()
            .await
            .map_err(strip_url)?;

        let status = res.status();
        let body = res.text().await.map_err(strip_url)?;

        if !status.is_success() {
            let err = FetchError::Http {
                status: status.as_u16(),
                message: upstream_message(status, &body),
                body: truncate_body(&body),
            };
            warn!(endpoint, city, "{err}");
            return Err(err);
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, city: &str, units: &str) -> Result<Value, FetchError> {
        self.fetch("weather", city, units).await
    }

    async fn forecast(&self, city: &str, units: &str) -> Result<Value, FetchError> {
        self.fetch("forecast", city, units).await
    }
}

// The request URL carries `appid`; it must not leak into error messages.
fn strip_url(err: reqwest::Error) -> FetchError {
    FetchError::Transport(err.without_url())
}

/// Best message for a failed call.
///
/// A JSON body yields its `message` field (e.g. `{"cod":"404","message":"city not found"}`),
/// or nothing when that field is absent or blank. Any other body is described by
/// the status line alone, so the request URL never ends up in the message.
fn upstream_message(status: StatusCode, body: &str) -> Option<String> {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => value
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_owned),
        Err(_) => Some(
            format!("{} {}", status.as_u16(), status.canonical_reason().unwrap_or_default())
                .trim_end()
                .to_string(),
        ),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
