//! Mapping of the OpenWeather `/weather` payload into [`CurrentConditions`].
//!
//! The accessors below are total: a missing key, a `null`, or a value of the
//! wrong JSON type all come back as `None`.

use serde_json::{Number, Value};

use crate::model::CurrentConditions;

/// Walk `path` through nested objects.
pub(crate) fn field<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |node, key| node.get(*key))
}

pub(crate) fn number_at(value: &Value, path: &[&str]) -> Option<Number> {
    match field(value, path)? {
        Value::Number(n) => Some(n.clone()),
        _ => None,
    }
}

pub(crate) fn string_at(value: &Value, path: &[&str]) -> Option<String> {
    field(value, path)?.as_str().map(str::to_owned)
}

/// First element of the `weather` list, if any.
pub(crate) fn first_weather(value: &Value) -> Option<&Value> {
    value.get("weather")?.as_array()?.first()
}

pub fn map_current(body: &Value) -> CurrentConditions {
    let weather = first_weather(body);

    CurrentConditions {
        city: string_at(body, &["name"]),
        country: string_at(body, &["sys", "country"]),
        temp: number_at(body, &["main", "temp"]),
        feels_like: number_at(body, &["main", "feels_like"]),
        humidity: number_at(body, &["main", "humidity"]),
        pressure: number_at(body, &["main", "pressure"]),
        wind_speed: number_at(body, &["wind", "speed"]),
        description: weather.and_then(|w| string_at(w, &["description"])),
        icon: weather.and_then(|w| string_at(w, &["icon"])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn london() -> Value {
        json!({
            "name": "London",
            "sys": { "country": "GB", "sunrise": 1716263000 },
            "main": { "temp": 14.27, "feels_like": 13.61, "humidity": 81, "pressure": 1012 },
            "wind": { "speed": 4.63, "deg": 230 },
            "weather": [
                { "id": 500, "main": "Rain", "description": "light rain", "icon": "10d" },
                { "id": 701, "main": "Mist", "description": "mist", "icon": "50d" }
            ]
        })
    }

    #[test]
    fn maps_full_payload() {
        let current = map_current(&london());

        assert_eq!(current.city.as_deref(), Some("London"));
        assert_eq!(current.country.as_deref(), Some("GB"));
        assert_eq!(current.temp, Some(Number::from_f64(14.27).unwrap()));
        assert_eq!(current.humidity, Some(Number::from(81)));
        assert_eq!(current.pressure, Some(Number::from(1012)));
        assert_eq!(current.description.as_deref(), Some("light rain"));
        assert_eq!(current.icon.as_deref(), Some("10d"));
    }

    #[test]
    fn missing_wind_maps_to_null() {
        let mut body = london();
        body.as_object_mut().unwrap().remove("wind");

        let current = map_current(&body);
        assert_eq!(current.wind_speed, None);

        let json = serde_json::to_value(&current).unwrap();
        assert_eq!(json["wind_speed"], Value::Null);
    }

    #[test]
    fn empty_weather_list_maps_to_null() {
        let mut body = london();
        body["weather"] = json!([]);

        let current = map_current(&body);
        assert_eq!(current.description, None);
        assert_eq!(current.icon, None);
    }

    #[test]
    fn arbitrary_json_never_fails() {
        for body in [json!(null), json!([]), json!("x"), json!({ "main": 3, "sys": [] })] {
            assert_eq!(map_current(&body), CurrentConditions::default());
        }
    }

    #[test]
    fn wrongly_typed_values_are_dropped() {
        let body = json!({ "name": 42, "main": { "temp": "warm" } });

        let current = map_current(&body);
        assert_eq!(current.city, None);
        assert_eq!(current.temp, None);
    }

    #[test]
    fn serialization_keeps_numbers_exact() {
        let current = map_current(&london());
        let json = serde_json::to_string(&current).unwrap();

        assert!(json.contains(r#""temp":14.27"#));
        assert!(json.contains(r#""humidity":81,"#));
        assert!(json.contains(r#""pressure":1012,"#));

        let back: CurrentConditions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, current);
    }
}
