mod common;

use axum::http::StatusCode;
use chronosim::web::{router, AppState};
use common::{events_body, offline_config, serve, Canned, FakeServices};
use serde_json::{json, Value};

async fn start_ui(config: chronosim::Config) -> String {
    let state = AppState::new(config).expect("app state");
    serve(router(state)).await
}

async fn get_json(url: &str) -> (StatusCode, Value) {
    let response = reqwest::get(url).await.expect("request");
    let status = StatusCode::from_u16(response.status().as_u16()).expect("status");
    let body = response.json::<Value>().await.expect("json body");
    (status, body)
}

#[tokio::test]
async fn index_page_is_served() {
    let base = start_ui(offline_config()).await;
    let response = reqwest::get(format!("{base}/")).await.unwrap();
    assert!(response.status().is_success());
    let html = response.text().await.unwrap();
    assert!(html.contains("Time-Travel Data Simulator"));

    let script = reqwest::get(format!("{base}/app.js")).await.unwrap();
    assert_eq!(
        script.headers()["content-type"],
        "application/javascript; charset=utf-8"
    );
}

#[tokio::test]
async fn config_endpoint_lists_categories() {
    let base = start_ui(offline_config()).await;
    let (status, body) = get_json(&format!("{base}/api/config")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["min_year"], 1900);
    assert_eq!(body["max_year"], 2100);
    assert_eq!(body["default_year"], 2023);
    assert_eq!(
        body["categories"],
        json!(["climate", "population", "land_use", "natural_events"])
    );
    assert_eq!(body["map"]["latitude"], 40.7128);
}

#[tokio::test]
async fn land_use_report_has_pie_chart_and_summary() {
    let base = start_ui(offline_config()).await;
    let (status, body) = get_json(&format!(
        "{base}/api/simulate?location=Berlin&year=2100&category=land_use"
    ))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["heading"], "Land Use Simulation for Berlin in 2100");
    assert_eq!(body["chart"]["kind"], "pie");
    assert_eq!(body["result"]["data"]["urban"], 0.8);
    assert_eq!(body["result"]["source"]["origin"], "model");
    assert!(body["summary"]
        .as_str()
        .unwrap()
        .contains("- Urban areas: 80.0%"));
    assert!(body["notice"].is_null());
}

#[tokio::test]
async fn defaults_fill_missing_query_fields() {
    let base = start_ui(offline_config()).await;
    let (status, body) = get_json(&format!("{base}/api/simulate?category=population")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["request"]["location"], "New York, USA");
    assert_eq!(body["request"]["year"], 2023);
    assert_eq!(body["request"]["category"], "population");
}

#[tokio::test]
async fn unknown_category_returns_marker() {
    let base = start_ui(offline_config()).await;
    let (status, body) = get_json(&format!("{base}/api/simulate?year=2000&category=economy")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid data type" }));
}

#[tokio::test]
async fn out_of_range_year_is_rejected() {
    let base = start_ui(offline_config()).await;
    let (status, body) = get_json(&format!("{base}/api/simulate?year=1850&category=climate")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("1850"));
}

#[tokio::test]
async fn malformed_year_is_rejected_as_json() {
    let base = start_ui(offline_config()).await;
    for raw in ["abc", "", "99999999999"] {
        let response = reqwest::get(format!("{base}/api/simulate?year={raw}&category=climate"))
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 400, "year={raw:?}");
        assert!(response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("application/json"));
        let body = response.json::<Value>().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("not a whole number"));
    }
}

#[tokio::test]
async fn fallback_results_carry_a_notice() {
    let services = FakeServices::start(
        Canned::with_status(StatusCode::SERVICE_UNAVAILABLE, json!({})),
        Canned::ok(events_body(&["floods"])),
        Canned::ok(json!({})),
    )
    .await;
    let base = start_ui(services.config()).await;

    let (_, climate) = get_json(&format!("{base}/api/simulate?year=1980&category=climate")).await;
    assert_eq!(climate["result"]["source"]["origin"], "fallback");
    assert!(climate["notice"].as_str().unwrap().contains("status 503"));

    let (_, events) =
        get_json(&format!("{base}/api/simulate?year=2040&category=natural_events")).await;
    assert_eq!(events["result"]["source"]["origin"], "live");
    assert_eq!(events["result"]["data"]["floods"], 1);
    assert_eq!(events["chart"]["values"], json!([0.0, 0.0, 1.0, 0.0, 0.0]));
}

#[tokio::test]
async fn status_endpoint_reports_each_service() {
    let services = FakeServices::start(
        Canned::ok(json!({ "daily": { "temperature_2m_mean": [1.0, 2.0] } })),
        Canned::ok(json!({})),
        Canned::with_status(StatusCode::FORBIDDEN, json!({ "error": "API_KEY_INVALID" })),
    )
    .await;
    let base = start_ui(services.config()).await;

    let (status, body) = get_json(&format!("{base}/api/status")).await;
    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["name"], "NASA API");
    assert_eq!(entries[0]["outcome"]["state"], "failed");
    assert_eq!(entries[0]["outcome"]["status"], 403);
    assert_eq!(
        entries[0]["message"],
        "NASA API: Connection failed (Status code: 403)"
    );
    assert_eq!(entries[1]["name"], "Open-Meteo API");
    assert_eq!(entries[1]["outcome"]["state"], "connected");

    assert_eq!(services.key_test.requests()[0]["api_key"], "test-key");
    let probe = &services.archive.requests()[0];
    assert_eq!(probe["start_date"], "2023-01-01");
    assert_eq!(probe["latitude"], "40.71");
}
