use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use chrono::Utc;
use tower::ServiceExt;
use weather_core::{
    Clouds, CurrentConditions, Location, Units, WeatherCondition, WeatherError, WeatherProvider,
    WeatherReport, Wind,
};
use weather_server::{AppState, app};

/// Canned behavior for the spy.
#[derive(Debug, Default, Clone, Copy)]
pub enum Outcome {
    #[default]
    Success,
    ProviderFailure,
}

/// Records every contract call so tests can assert how, and whether, the
/// gateway dispatched.
#[derive(Debug, Default)]
pub struct SpyProvider {
    calls: AtomicUsize,
    recorded: Mutex<Vec<RecordedCall>>,
    outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    City { city: String, units: Units, lang: String },
    Coordinates { lat: f64, lon: f64, units: Units, lang: String },
}

impl SpyProvider {
    pub fn succeeding() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self { outcome: Outcome::ProviderFailure, ..Self::default() })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn recorded(&self) -> Vec<RecordedCall> {
        self.recorded.lock().unwrap().clone()
    }

    fn respond(&self, location_name: &str) -> Result<WeatherReport, WeatherError> {
        match self.outcome {
            Outcome::Success => Ok(report_named(location_name)),
            Outcome::ProviderFailure => Err(WeatherError::Provider {
                code: 500,
                message: "request failed with status 500 Internal Server Error".to_string(),
            }),
        }
    }
}

#[async_trait]
impl WeatherProvider for SpyProvider {
    async fn current_by_city(
        &self,
        city: &str,
        units: Units,
        lang: &str,
    ) -> Result<WeatherReport, WeatherError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.recorded.lock().unwrap().push(RecordedCall::City {
            city: city.to_string(),
            units,
            lang: lang.to_string(),
        });
        self.respond(city)
    }

    async fn current_by_coordinates(
        &self,
        lat: f64,
        lon: f64,
        units: Units,
        lang: &str,
    ) -> Result<WeatherReport, WeatherError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.recorded.lock().unwrap().push(RecordedCall::Coordinates {
            lat,
            lon,
            units,
            lang: lang.to_string(),
        });
        self.respond("Test City")
    }
}

/// A fully-populated canonical report named after the queried location.
pub fn report_named(name: &str) -> WeatherReport {
    WeatherReport {
        location: Location {
            name: name.to_string(),
            country: "CN".to_string(),
            latitude: 39.9042,
            longitude: 116.4074,
            timezone: 28800,
        },
        current: CurrentConditions {
            temperature: 25.5,
            feels_like: 27.0,
            temp_min: 20.0,
            temp_max: 30.0,
            pressure: 1013,
            humidity: 60,
            visibility: 10000,
            uv_index: 0.0,
            weather: vec![WeatherCondition {
                id: 800,
                main: "Clear".to_string(),
                description: "clear sky".to_string(),
                icon: "01d".to_string(),
            }],
            wind: Wind { speed: 3.5, direction: 180, gust: Some(5.0) },
            clouds: Clouds { all: 0 },
            rain: None,
            snow: None,
            sunrise: 1_640_995_200,
            sunset: 1_641_031_200,
            updated_at: Utc::now(),
        },
        timestamp: Utc::now().timestamp(),
        provider: "openweathermap".to_string(),
    }
}

pub fn test_app(provider: Arc<SpyProvider>) -> Router {
    let provider: Arc<dyn WeatherProvider> = provider;
    app(AppState { provider })
}

/// Drive one GET through the router and decode the JSON body.
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to execute request.");

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).expect("body must be JSON");

    (status, json)
}
