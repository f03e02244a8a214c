use weather_core::Units;

use crate::helpers::{RecordedCall, SpyProvider, get_json, test_app};

#[tokio::test]
async fn city_query_returns_canonical_report() {
    let spy = SpyProvider::succeeding();
    let app = test_app(spy.clone());

    let (status, body) = get_json(&app, "/weather?city=Beijing").await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["location"]["name"], "Beijing");
    assert_eq!(body["data"]["provider"], "openweathermap");
    assert!(body.get("error").is_none());

    assert_eq!(
        spy.recorded(),
        vec![RecordedCall::City {
            city: "Beijing".to_string(),
            units: Units::Metric,
            lang: "zh_cn".to_string(),
        }]
    );
}

#[tokio::test]
async fn city_path_route_dispatches() {
    let spy = SpyProvider::succeeding();
    let app = test_app(spy.clone());

    let (status, body) = get_json(&app, "/weather/city/Shanghai?units=imperial&lang=en").await;

    assert_eq!(status, 200);
    assert_eq!(body["data"]["location"]["name"], "Shanghai");
    assert_eq!(
        spy.recorded(),
        vec![RecordedCall::City {
            city: "Shanghai".to_string(),
            units: Units::Imperial,
            lang: "en".to_string(),
        }]
    );
}

#[tokio::test]
async fn coordinates_path_route_dispatches() {
    let spy = SpyProvider::succeeding();
    let app = test_app(spy.clone());

    let (status, _) = get_json(&app, "/weather/coordinates/39.9042/116.4074").await;

    assert_eq!(status, 200);
    assert_eq!(
        spy.recorded(),
        vec![RecordedCall::Coordinates {
            lat: 39.9042,
            lon: 116.4074,
            units: Units::Metric,
            lang: "zh_cn".to_string(),
        }]
    );
}

#[tokio::test]
async fn out_of_range_latitude_rejected_before_any_provider_call() {
    let spy = SpyProvider::succeeding();
    let app = test_app(spy.clone());

    let (status, body) = get_json(&app, "/weather?lat=91&lon=0").await;

    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], 400);
    assert_eq!(body["error"]["error"], "invalid request parameters");
    assert_eq!(spy.call_count(), 0);
}

#[tokio::test]
async fn missing_parameters_rejected() {
    let spy = SpyProvider::succeeding();
    let app = test_app(spy.clone());

    let (status, body) = get_json(&app, "/weather").await;

    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert_eq!(spy.call_count(), 0);
}

#[tokio::test]
async fn incomplete_coordinate_pair_rejected() {
    let spy = SpyProvider::succeeding();
    let app = test_app(spy.clone());

    let (status, _) = get_json(&app, "/weather?lat=10").await;

    assert_eq!(status, 400);
    assert_eq!(spy.call_count(), 0);
}

/// (0,0) is a valid coordinate pair and must reach the provider.
#[tokio::test]
async fn zero_island_coordinates_are_forwarded() {
    let spy = SpyProvider::succeeding();
    let app = test_app(spy.clone());

    let (status, _) = get_json(&app, "/weather?lat=0&lon=0").await;

    assert_eq!(status, 200);
    assert_eq!(
        spy.recorded(),
        vec![RecordedCall::Coordinates {
            lat: 0.0,
            lon: 0.0,
            units: Units::Metric,
            lang: "zh_cn".to_string(),
        }]
    );
}

#[tokio::test]
async fn unknown_units_rejected() {
    let spy = SpyProvider::succeeding();
    let app = test_app(spy.clone());

    let (status, body) = get_json(&app, "/weather?city=Beijing&units=kelvin").await;

    assert_eq!(status, 400);
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("units must be one of")
    );
    assert_eq!(spy.call_count(), 0);
}

#[tokio::test]
async fn empty_units_default_to_metric() {
    let spy = SpyProvider::succeeding();
    let app = test_app(spy.clone());

    let (status, _) = get_json(&app, "/weather?city=Beijing&units=").await;

    assert_eq!(status, 200);
    match &spy.recorded()[0] {
        RecordedCall::City { units, .. } => assert_eq!(*units, Units::Metric),
        other => panic!("expected a city call, got {other:?}"),
    }
}

#[tokio::test]
async fn provider_failure_maps_to_500_envelope() {
    let spy = SpyProvider::failing();
    let app = test_app(spy.clone());

    let (status, body) = get_json(&app, "/weather?city=Beijing").await;

    assert_eq!(status, 500);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], 500);
    assert_eq!(body["error"]["error"], "weather provider request failed");
    assert!(body["error"]["message"].as_str().unwrap().contains("500"));
    assert_eq!(spy.call_count(), 1);
}

#[tokio::test]
async fn malformed_path_coordinates_get_enveloped_400() {
    let spy = SpyProvider::succeeding();
    let app = test_app(spy.clone());

    let (status, body) = get_json(&app, "/weather/coordinates/north/10").await;

    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("latitude must be a number")
    );
    assert_eq!(spy.call_count(), 0);
}
