//! Reduction of the OpenWeather 3-hour forecast feed into daily summaries.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde_json::{Number, Value};

use crate::current::{first_weather, number_at, string_at};
use crate::model::DailyForecast;

/// Maximum number of days returned to the front end.
pub const FORECAST_DAYS: usize = 5;

/// Time-of-day of the sample preferred as the day's representative.
pub const MIDDAY: &str = "12:00:00";

const NO_TIME: &str = "00:00:00";

/// A raw 3-hour sample as found in the forecast `list`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastEntry {
    pub dt_txt: String,
    pub temp: Option<Number>,
    pub temp_min: Option<Number>,
    pub temp_max: Option<Number>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

impl ForecastEntry {
    pub fn from_json(item: &Value) -> Self {
        let weather = first_weather(item);

        Self {
            dt_txt: string_at(item, &["dt_txt"]).unwrap_or_default(),
            temp: number_at(item, &["main", "temp"]),
            temp_min: number_at(item, &["main", "temp_min"]),
            temp_max: number_at(item, &["main", "temp_max"]),
            description: weather.and_then(|w| string_at(w, &["description"])),
            icon: weather.and_then(|w| string_at(w, &["icon"])),
        }
    }

    fn into_daily(self, date: String) -> DailyForecast {
        DailyForecast {
            date,
            temp: self.temp,
            temp_min: self.temp_min,
            temp_max: self.temp_max,
            description: self.description,
            icon: self.icon,
        }
    }
}

/// Raw entries of a forecast body. A missing or malformed `list` yields none.
pub fn entries(body: &Value) -> Vec<ForecastEntry> {
    body.get("list")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(ForecastEntry::from_json).collect())
        .unwrap_or_default()
}

/// Split `"YYYY-MM-DD HH:MM:SS"` into its date and time-of-day parts.
pub fn split_dt_txt(dt_txt: &str) -> (&str, &str) {
    let mut parts = dt_txt.split(' ');
    let date = parts.next().unwrap_or_default();
    let time = parts.next().unwrap_or(NO_TIME);
    (date, time)
}

/// Keep one entry per date and return at most [`FORECAST_DAYS`] of them, oldest first.
///
/// The first entry seen for a date is kept unless a `12:00:00` entry shows up,
/// which always replaces the current pick (so the last midday sample wins).
pub fn aggregate<I>(entries: I) -> Vec<DailyForecast>
where
    I: IntoIterator<Item = ForecastEntry>,
{
    let daily = entries
        .into_iter()
        .fold(BTreeMap::new(), |mut daily, entry| {
            let (date, time) = split_dt_txt(&entry.dt_txt);
            let is_midday = time == MIDDAY;
            let date = date.to_owned();

            match daily.entry(date) {
                Entry::Vacant(slot) => {
                    slot.insert(entry);
                }
                Entry::Occupied(mut slot) if is_midday => {
                    slot.insert(entry);
                }
                Entry::Occupied(_) => {}
            }
            daily
        });

    // BTreeMap iterates in ascending key order; zero-padded dates sort correctly as strings.
    daily
        .into_iter()
        .take(FORECAST_DAYS)
        .map(|(date, entry)| entry.into_daily(date))
        .collect()
}

pub fn daily_forecast(body: &Value) -> Vec<DailyForecast> {
    aggregate(entries(body))
}
