//! Core library for the weather gateway.
//!
//! This crate defines:
//! - The canonical, provider-independent weather model
//! - The abstraction over weather data providers and its registry
//! - The OpenWeatherMap adapter and its wire-format conversion
//! - Provider and server settings
//!
//! It is used by `weather-server`, but can also be reused by other binaries
//! or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use config::{DEFAULT_BASE_URL, ProviderSettings, RunMode, ServerConfig};
pub use error::WeatherError;
pub use model::{
    Clouds, CurrentConditions, DEFAULT_LANG, Location, Precipitation, Units, WeatherCondition,
    WeatherReport, Wind,
};
pub use provider::{ProviderId, WeatherProvider, provider_from_settings};
