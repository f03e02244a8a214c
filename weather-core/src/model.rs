use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

/// Language code sent upstream when the caller does not specify one.
pub const DEFAULT_LANG: &str = "zh_cn";

/// Unit system accepted by the gateway and forwarded to providers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
    Standard,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Standard => "standard",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = WeatherError;

    /// An empty string means "not specified" and maps to the default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Units::default()),
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            "standard" => Ok(Units::Standard),
            other => Err(WeatherError::Validation(format!(
                "units must be one of metric, imperial, standard (got '{other}')"
            ))),
        }
    }
}

/// Canonical, provider-independent answer to a single weather query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: Location,
    pub current: CurrentConditions,
    /// Epoch seconds at which this response was generated, not when the
    /// provider captured the observation.
    pub timestamp: i64,
    pub provider: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    /// ISO country code.
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Offset from UTC in seconds.
    pub timezone: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Atmospheric pressure in hPa.
    pub pressure: u32,
    /// Relative humidity in percent.
    pub humidity: u8,
    /// Visibility in meters.
    pub visibility: u32,
    pub uv_index: f64,
    /// Ordered; a provider may report several simultaneous conditions.
    pub weather: Vec<WeatherCondition>,
    pub wind: Wind,
    pub clouds: Clouds,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rain: Option<Precipitation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snow: Option<Precipitation>,
    /// Epoch seconds.
    pub sunrise: i64,
    /// Epoch seconds.
    pub sunset: i64,
    /// When the provider captured the observation.
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherCondition {
    pub id: u32,
    /// Short category label, e.g. "Rain".
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
    /// Direction in degrees.
    pub direction: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gust: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clouds {
    /// Cloud cover percentage.
    pub all: u8,
}

/// Accumulated rain or snow. Present in a report only when the provider
/// reported the block; absent means "not reported", not zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Precipitation {
    #[serde(rename = "1h", skip_serializing_if = "Option::is_none")]
    pub one_hour: Option<f64>,
    #[serde(rename = "3h", skip_serializing_if = "Option::is_none")]
    pub three_hour: Option<f64>,
}
