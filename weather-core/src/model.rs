use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Current conditions for the requested city.
///
/// Every field is optional: a value missing from the upstream payload is
/// serialized as `null` instead of failing the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub city: Option<String>,
    pub country: Option<String>,
    pub temp: Option<Number>,
    pub feels_like: Option<Number>,
    pub humidity: Option<Number>,
    pub pressure: Option<Number>,
    pub wind_speed: Option<Number>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

/// One representative forecast sample per calendar day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    /// Calendar day, `YYYY-MM-DD`.
    pub date: String,
    pub temp: Option<Number>,
    pub temp_min: Option<Number>,
    pub temp_max: Option<Number>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

/// Envelope returned by `GET /api/weather`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub units: String,
    pub current: CurrentConditions,
    pub forecast: Vec<DailyForecast>,
}
