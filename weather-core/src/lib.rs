//! Core library for the `weather` proxy.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather provider (current conditions and 5-day forecast)
//! - Mapping of upstream payloads into the simplified front-end models
//! - The request service and its HTTP router
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod current;
pub mod error;
pub mod forecast;
pub mod model;
pub mod provider;
pub mod server;
pub mod service;

pub use config::Config;
pub use error::{ApiError, FetchError};
pub use model::{CurrentConditions, DailyForecast, WeatherReport};
pub use provider::{WeatherProvider, provider_from_config};
pub use service::WeatherService;
