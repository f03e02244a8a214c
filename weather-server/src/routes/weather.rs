use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use weather_core::{DEFAULT_LANG, Units, WeatherError, WeatherReport};

use crate::{
    response::{ApiError, ApiResponse},
    startup::AppState,
};

/// Raw query shape. Numbers arrive as strings so malformed values produce
/// the JSON error envelope rather than a framework rejection.
#[derive(Debug, Default, Deserialize)]
pub struct WeatherQuery {
    pub city: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub units: Option<String>,
    pub lang: Option<String>,
}

/// A validated lookup, ready to dispatch to the configured provider.
#[derive(Debug, PartialEq)]
struct Lookup {
    target: LookupTarget,
    units: Units,
    lang: String,
}

#[derive(Debug, PartialEq)]
enum LookupTarget {
    City(String),
    Coordinates { lat: f64, lon: f64 },
}

/// `GET /weather`: city or coordinate lookup via query parameters.
pub async fn weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<ApiResponse<WeatherReport>>, ApiError> {
    let lookup = parse_query(query)?;
    dispatch(&state, lookup).await
}

/// `GET /weather/city/{city}`
pub async fn weather_by_city(
    State(state): State<AppState>,
    Path(city): Path<String>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<ApiResponse<WeatherReport>>, ApiError> {
    let lookup = parse_query(WeatherQuery {
        city: Some(city),
        lat: None,
        lon: None,
        units: query.units,
        lang: query.lang,
    })?;

    dispatch(&state, lookup).await
}

/// `GET /weather/coordinates/{lat}/{lon}`
pub async fn weather_by_coordinates(
    State(state): State<AppState>,
    Path((lat, lon)): Path<(String, String)>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<ApiResponse<WeatherReport>>, ApiError> {
    let lookup = parse_query(WeatherQuery {
        city: None,
        lat: Some(lat),
        lon: Some(lon),
        units: query.units,
        lang: query.lang,
    })?;

    dispatch(&state, lookup).await
}

async fn dispatch(
    state: &AppState,
    lookup: Lookup,
) -> Result<Json<ApiResponse<WeatherReport>>, ApiError> {
    let report = match lookup.target {
        LookupTarget::City(city) => {
            state
                .provider
                .current_by_city(&city, lookup.units, &lookup.lang)
                .await?
        }
        LookupTarget::Coordinates { lat, lon } => {
            state
                .provider
                .current_by_coordinates(lat, lon, lookup.units, &lookup.lang)
                .await?
        }
    };

    Ok(Json(ApiResponse::ok(report)))
}

/// Validate the raw query and apply defaults. Runs entirely before any
/// provider call; every rejection here is a 400.
fn parse_query(query: WeatherQuery) -> Result<Lookup, WeatherError> {
    let units: Units = query.units.as_deref().unwrap_or("").parse()?;

    let lang = match query.lang {
        Some(lang) if !lang.is_empty() => lang,
        _ => DEFAULT_LANG.to_string(),
    };

    // An empty city string counts as "not supplied".
    let city = query.city.filter(|c| !c.is_empty());

    let target = match (city, query.lat, query.lon) {
        (Some(city), _, _) => LookupTarget::City(city),
        (None, Some(lat), Some(lon)) => {
            let lat = parse_coordinate(&lat, "latitude")?;
            let lon = parse_coordinate(&lon, "longitude")?;
            validate_coordinates(lat, lon)?;
            LookupTarget::Coordinates { lat, lon }
        }
        (None, Some(_), None) | (None, None, Some(_)) => {
            return Err(WeatherError::Validation(
                "latitude and longitude must be provided together".to_string(),
            ));
        }
        (None, None, None) => {
            return Err(WeatherError::Validation(
                "either a city name or lat/lon coordinates are required".to_string(),
            ));
        }
    };

    Ok(Lookup { target, units, lang })
}

fn parse_coordinate(raw: &str, name: &str) -> Result<f64, WeatherError> {
    raw.parse::<f64>()
        .map_err(|_| WeatherError::Validation(format!("{name} must be a number (got '{raw}')")))
}

fn validate_coordinates(lat: f64, lon: f64) -> Result<(), WeatherError> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(WeatherError::Validation(format!(
            "latitude must be between -90 and 90 (got {lat})"
        )));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(WeatherError::Validation(format!(
            "longitude must be between -180 and 180 (got {lon})"
        )));
    }
    Ok(())
}
