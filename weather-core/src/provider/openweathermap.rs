use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::{
    config::ProviderSettings,
    error::WeatherError,
    model::{
        Clouds, CurrentConditions, DEFAULT_LANG, Location, Precipitation, Units, WeatherCondition,
        WeatherReport, Wind,
    },
};

use super::WeatherProvider;

/// Constant identifier stamped on every report from this adapter,
/// independent of what the upstream payload says.
pub const PROVIDER_NAME: &str = "openweathermap";

#[derive(Debug, Clone)]
pub struct OpenWeatherMapProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherMapProvider {
    /// Build the adapter from validated settings. The request timeout is
    /// baked into the HTTP client; a slow upstream ends the request with a
    /// transport error, there is no retry.
    pub fn new(settings: &ProviderSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(settings.timeout())
            .build()
            .context("Failed to build HTTP client for OpenWeatherMap")?;

        Ok(Self {
            api_key: settings.api_key.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn fetch(&self, mut params: Vec<(&'static str, String)>) -> Result<WeatherReport, WeatherError> {
        params.push(("appid", self.api_key.clone()));

        let url = format!("{}/weather", self.base_url);
        debug!(url = %url, "requesting current weather");

        let res = self.http.get(&url).query(&params).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(provider_error(status, &body));
        }

        let parsed: OwmResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::Decode(format!("unexpected current-weather payload: {e}")))?;

        to_report(parsed)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherMapProvider {
    async fn current_by_city(
        &self,
        city: &str,
        units: Units,
        lang: &str,
    ) -> Result<WeatherReport, WeatherError> {
        let params = vec![
            ("q", city.to_string()),
            ("units", units.as_str().to_string()),
            ("lang", normalize_lang(lang).to_string()),
        ];

        self.fetch(params).await
    }

    async fn current_by_coordinates(
        &self,
        lat: f64,
        lon: f64,
        units: Units,
        lang: &str,
    ) -> Result<WeatherReport, WeatherError> {
        let params = vec![
            ("lat", coord_param(lat)),
            ("lon", coord_param(lon)),
            ("units", units.as_str().to_string()),
            ("lang", normalize_lang(lang).to_string()),
        ];

        self.fetch(params).await
    }
}

// Wire schema of the upstream current-weather endpoint.

#[derive(Debug, Deserialize)]
struct OwmResponse {
    coord: OwmCoord,
    weather: Vec<OwmWeather>,
    main: OwmMain,
    #[serde(default)]
    visibility: u32,
    wind: OwmWind,
    clouds: OwmClouds,
    rain: Option<OwmPrecipitation>,
    snow: Option<OwmPrecipitation>,
    dt: i64,
    sys: OwmSys,
    timezone: i32,
    name: String,
}

#[derive(Debug, Deserialize)]
struct OwmCoord {
    lon: f64,
    lat: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    id: u32,
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: u32,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
    #[serde(default)]
    deg: i32,
    gust: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmClouds {
    all: u8,
}

#[derive(Debug, Deserialize)]
struct OwmPrecipitation {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
    #[serde(rename = "3h")]
    three_hour: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmSys {
    #[serde(default)]
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwmErrorBody {
    cod: u16,
    message: String,
}

/// Map a non-success upstream response. The structured error body wins
/// when it parses; otherwise only the raw HTTP status is carried.
fn provider_error(status: StatusCode, body: &str) -> WeatherError {
    match serde_json::from_str::<OwmErrorBody>(body) {
        Ok(err) => WeatherError::Provider { code: err.cod, message: err.message },
        Err(_) => WeatherError::Provider {
            code: status.as_u16(),
            message: format!("request failed with status {status}"),
        },
    }
}

/// Convert the provider payload into the canonical report. Rain and snow
/// stay absent unless the payload carried them; an empty condition list is
/// rejected rather than passed through.
fn to_report(owm: OwmResponse) -> Result<WeatherReport, WeatherError> {
    if owm.weather.is_empty() {
        return Err(WeatherError::Decode(
            "provider returned no weather conditions".to_string(),
        ));
    }

    let weather = owm
        .weather
        .into_iter()
        .map(|w| WeatherCondition {
            id: w.id,
            main: w.main,
            description: w.description,
            icon: w.icon,
        })
        .collect();

    Ok(WeatherReport {
        location: Location {
            name: owm.name,
            country: owm.sys.country,
            latitude: owm.coord.lat,
            longitude: owm.coord.lon,
            timezone: owm.timezone,
        },
        current: CurrentConditions {
            temperature: owm.main.temp,
            feels_like: owm.main.feels_like,
            temp_min: owm.main.temp_min,
            temp_max: owm.main.temp_max,
            pressure: owm.main.pressure,
            humidity: owm.main.humidity,
            visibility: owm.visibility,
            uv_index: 0.0, // not part of the current-weather payload
            weather,
            wind: Wind {
                speed: owm.wind.speed,
                direction: owm.wind.deg,
                gust: owm.wind.gust,
            },
            clouds: Clouds { all: owm.clouds.all },
            rain: owm.rain.map(to_precipitation),
            snow: owm.snow.map(to_precipitation),
            sunrise: owm.sys.sunrise,
            sunset: owm.sys.sunset,
            updated_at: DateTime::from_timestamp(owm.dt, 0).unwrap_or_else(Utc::now),
        },
        timestamp: Utc::now().timestamp(),
        provider: PROVIDER_NAME.to_string(),
    })
}

fn to_precipitation(p: OwmPrecipitation) -> Precipitation {
    Precipitation { one_hour: p.one_hour, three_hour: p.three_hour }
}

/// Coordinates go on the wire as decimal strings with 6 digits of
/// precision.
fn coord_param(value: f64) -> String {
    format!("{value:.6}")
}

fn normalize_lang(lang: &str) -> &str {
    if lang.is_empty() { DEFAULT_LANG } else { lang }
}
