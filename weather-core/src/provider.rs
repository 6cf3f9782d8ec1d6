use crate::{Config, error::FetchError, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

pub mod openweather;

/// Source of raw weather payloads.
///
/// Both calls return the upstream JSON body untouched; reshaping happens in
/// [`crate::current`] and [`crate::forecast`].
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for `city`.
    async fn current(&self, city: &str, units: &str) -> Result<Value, FetchError>;

    /// 5-day forecast in 3-hour steps for `city`.
    async fn forecast(&self, city: &str, units: &str) -> Result<Value, FetchError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key()?;

    let provider =
        OpenWeatherProvider::new(api_key.to_owned(), config.base_url(), config.timeout())?;

    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No OpenWeather API key configured"));
    }

    #[test]
    fn provider_from_config_works_when_configured() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        let provider = provider_from_config(&cfg);
        assert!(provider.is_ok());
    }
}
