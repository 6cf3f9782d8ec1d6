use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;
use weather_core::{
    Config, CurrentConditions, DailyForecast, WeatherReport, WeatherService, provider_from_config,
    server,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather proxy for the OpenWeather API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server (`GET /` and `GET /api/weather`).
    Serve {
        /// Address to bind, e.g. "0.0.0.0:8080". Defaults to the configured one.
        #[arg(long)]
        listen: Option<String>,
    },

    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Show current weather and the 5-day forecast for a city.
    Show {
        /// City name, optionally with country code ("Paris,FR").
        city: String,

        #[arg(long, value_parser = ["metric", "imperial", "standard"])]
        units: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Serve { listen } => serve(listen).await,
            Command::Configure => configure(),
            Command::Show { city, units } => show(&city, units).await,
        }
    }
}

fn service(config: &Config) -> anyhow::Result<WeatherService> {
    let provider = provider_from_config(config)?;
    Ok(WeatherService::new(Arc::from(provider)))
}

async fn serve(listen: Option<String>) -> anyhow::Result<()> {
    let config = Config::load()?.with_env();
    let service = service(&config)?;

    let addr = listen.as_deref().unwrap_or(config.listen_addr());
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    server::serve(listener, service, async {
        tokio::signal::ctrl_c().await.ok();
        info!("shutting down");
    })
    .await
    .context("HTTP server failed")
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key.trim().to_string());
    config.api_key()?;
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(city: &str, units: Option<String>) -> anyhow::Result<()> {
    let config = Config::load()?.with_env();
    let units = units.unwrap_or_else(|| config.default_units().to_string());

    let report = service(&config)?.report(city, &units).await?;
    print!("{}", render(&report));
    Ok(())
}

fn temp_unit(units: &str) -> &'static str {
    match units {
        "imperial" => "°F",
        "standard" => " K",
        _ => "°C",
    }
}

fn or_dash<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map_or_else(|| "-".to_string(), ToString::to_string)
}

/// Human-readable report, one line per forecast day.
fn render(report: &WeatherReport) -> String {
    let unit = temp_unit(&report.units);
    let CurrentConditions {
        city,
        country,
        temp,
        feels_like,
        humidity,
        pressure,
        wind_speed,
        description,
        ..
    } = &report.current;

    let mut out = format!(
        "{}, {}\n  {}{unit} (feels like {}{unit}), {}\n  humidity {}%, pressure {} hPa, wind {}\n\n",
        or_dash(city),
        or_dash(country),
        or_dash(temp),
        or_dash(feels_like),
        or_dash(description),
        or_dash(humidity),
        or_dash(pressure),
        or_dash(wind_speed),
    );

    for day in &report.forecast {
        out.push_str(&render_day(day, unit));
    }
    out
}

fn render_day(day: &DailyForecast, unit: &str) -> String {
    let label = NaiveDate::parse_from_str(&day.date, "%Y-%m-%d")
        .map(|d| d.format("%a %d %b").to_string())
        .unwrap_or_else(|_| day.date.clone());

    format!(
        "  {label:<10} {}{unit} ({} .. {}), {}\n",
        or_dash(&day.temp),
        or_dash(&day.temp_min),
        or_dash(&day.temp_max),
        or_dash(&day.description),
    )
}
