use std::sync::Arc;

use tracing::info;

use crate::{
    ApiError, WeatherProvider, current::map_current, forecast::daily_forecast,
    model::WeatherReport,
};

/// Assembles a [`WeatherReport`] from the two upstream calls.
#[derive(Debug, Clone)]
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherService {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Current conditions plus the daily forecast for `city`.
    ///
    /// A blank city is rejected before any upstream call. Either upstream
    /// failure fails the whole report.
    pub async fn report(&self, city: &str, units: &str) -> Result<WeatherReport, ApiError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(ApiError::MissingCity);
        }

        info!(city, units, "fetching weather report");

        let current = self.provider.current(city, units).await?;
        let forecast = self.provider.forecast(city, units).await?;

        Ok(WeatherReport {
            units: units.to_string(),
            current: map_current(&current),
            forecast: daily_forecast(&forecast),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FetchError;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Mutex<Vec<(String, String, String)>>,
        fail_forecast: bool,
    }

    impl Recorder {
        fn record(&self, op: &str, city: &str, units: &str) {
            self.calls.lock().unwrap().push((op.into(), city.into(), units.into()));
        }
    }

    #[async_trait]
    impl WeatherProvider for Recorder {
        async fn current(&self, city: &str, units: &str) -> Result<Value, FetchError> {
            self.record("current", city, units);
            Ok(json!({ "name": city, "main": { "temp": 21.5 } }))
        }

        async fn forecast(&self, city: &str, units: &str) -> Result<Value, FetchError> {
            self.record("forecast", city, units);
            if self.fail_forecast {
                return Err(FetchError::Http {
                    status: 429,
                    message: Some("rate limited".into()),
                    body: String::new(),
                });
            }
            Ok(json!({ "list": [ { "dt_txt": "2024-05-21 12:00:00", "main": { "temp": 19 } } ] }))
        }
    }

    #[tokio::test]
    async fn blank_city_never_reaches_provider() {
        let recorder = Arc::new(Recorder::default());
        let service = WeatherService::new(recorder.clone());

        for city in ["", "   ", "\t\n"] {
            assert_eq!(service.report(city, "metric").await, Err(ApiError::MissingCity));
        }
        assert!(recorder.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn calls_current_then_forecast_with_trimmed_city() {
        let recorder = Arc::new(Recorder::default());
        let service = WeatherService::new(recorder.clone());

        let report = service.report("  Paris ", "imperial").await.expect("report");

        assert_eq!(report.units, "imperial");
        assert_eq!(report.current.city.as_deref(), Some("Paris"));
        assert_eq!(report.forecast.len(), 1);
        assert_eq!(report.forecast[0].date, "2024-05-21");

        let calls = recorder.calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![
                ("current".into(), "Paris".into(), "imperial".into()),
                ("forecast".into(), "Paris".into(), "imperial".into()),
            ]
        );
    }

    #[tokio::test]
    async fn forecast_failure_fails_whole_report() {
        let recorder = Arc::new(Recorder { fail_forecast: true, ..Default::default() });
        let service = WeatherService::new(recorder);

        let err = service.report("Oslo", "metric").await.unwrap_err();
        assert_eq!(err, ApiError::Upstream { status: 429, message: "rate limited".into() });
    }
}
