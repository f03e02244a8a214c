use std::fmt::Debug;

use async_trait::async_trait;

use crate::{
    config::ProviderSettings,
    error::WeatherError,
    model::{Units, WeatherReport},
    provider::openweathermap::OpenWeatherMapProvider,
};

pub mod openweathermap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenWeatherMap,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenWeatherMap => "openweathermap",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::OpenWeatherMap]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "openweathermap" => Ok(ProviderId::OpenWeatherMap),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: openweathermap."
            )),
        }
    }
}

/// The contract every weather provider adapter implements.
///
/// Implementations must apply a bounded request timeout, never return a
/// partially populated report, and map every upstream failure into a
/// [`WeatherError`].
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for a city given by free-text name.
    async fn current_by_city(
        &self,
        city: &str,
        units: Units,
        lang: &str,
    ) -> Result<WeatherReport, WeatherError>;

    /// Current conditions for a geographic coordinate pair.
    async fn current_by_coordinates(
        &self,
        lat: f64,
        lon: f64,
        units: Units,
        lang: &str,
    ) -> Result<WeatherReport, WeatherError>;
}

/// Construct the adapter for `id` from validated provider settings.
///
/// Adding a provider means adding a `ProviderId` variant and one arm here;
/// the gateway never changes.
pub fn provider_from_settings(
    id: ProviderId,
    settings: &ProviderSettings,
) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let boxed: Box<dyn WeatherProvider> = match id {
        ProviderId::OpenWeatherMap => Box::new(OpenWeatherMapProvider::new(settings)?),
    };

    Ok(boxed)
}
