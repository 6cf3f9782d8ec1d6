//! HTTP surface: the front-end page and `GET /api/weather`.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    response::Html,
    routing::get,
};
use std::future::Future;
use tokio::net::TcpListener;
use tracing::info;

use crate::{ApiError, WeatherService, config::DEFAULT_UNITS, model::WeatherReport};

const INDEX_HTML: &str = include_str!("../static/index.html");

#[derive(Debug, PartialEq)]
pub struct WeatherQuery {
    /// A missing city is handled like a blank one.
    pub city: String,
    pub units: String,
}

impl WeatherQuery {
    /// Build from raw query pairs. A repeated parameter keeps its first value.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let first = |name: &str| {
            pairs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
        };

        Self {
            city: first("city").unwrap_or_default(),
            units: first("units").unwrap_or_else(|| DEFAULT_UNITS.to_string()),
        }
    }
}

pub fn router(service: WeatherService) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/weather", get(weather))
        .with_state(service)
}

/// Serve the router on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, service: WeatherService, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn weather(
    State(service): State<WeatherService>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<WeatherReport>, ApiError> {
    let Query(pairs) = query.map_err(|rejection| ApiError::BadQuery(rejection.body_text()))?;
    let query = WeatherQuery::from_pairs(&pairs);

    let report = service.report(&query.city, &query.units).await?;
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn missing_parameters_use_defaults() {
        let query = WeatherQuery::from_pairs(&[]);
        assert_eq!(query, WeatherQuery { city: String::new(), units: "metric".into() });
    }

    #[test]
    fn first_value_wins_for_repeated_parameters() {
        let query = WeatherQuery::from_pairs(&pairs(&[
            ("city", "London"),
            ("units", "imperial"),
            ("city", "Paris"),
            ("units", "metric"),
        ]));

        assert_eq!(query.city, "London");
        assert_eq!(query.units, "imperial");
    }

    #[test]
    fn explicit_empty_units_are_kept() {
        let query = WeatherQuery::from_pairs(&pairs(&[("city", "Oslo"), ("units", "")]));
        assert_eq!(query.units, "");
    }
}
