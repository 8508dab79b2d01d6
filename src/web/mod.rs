use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::info;

use crate::{
    api::ApiStatus,
    config::Config,
    error::RequestError,
    generators::PRESENT_YEAR,
    model::{Category, SimulationRequest, SimulationResult, Year, MAX_YEAR, MIN_YEAR},
    report::SimulationReport,
    simulator::TimeSimulator,
};

pub const DEFAULT_LOCATION: &str = "New York, USA";

#[derive(Clone)]
pub struct AppState {
    simulator: Arc<TimeSimulator>,
    config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let simulator = TimeSimulator::new(&config).context("failed to build HTTP client")?;
        Ok(Self {
            simulator: Arc::new(simulator),
            config: Arc::new(config),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/styles.css", get(styles))
        .route("/app.js", get(script))
        .route("/api/config", get(ui_config))
        .route("/api/simulate", get(simulate))
        .route("/api/status", get(api_status))
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "invalid listen address {}:{}",
                config.server.host, config.server.port
            )
        })?;
    let state = AppState::new(config)?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("simulator UI live at http://{addr} (Ctrl+C to stop)");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down web UI");
}

async fn index() -> Html<&'static str> {
    Html(include_str!("assets/index.html"))
}

async fn styles() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        include_str!("assets/styles.css"),
    )
}

async fn script() -> impl IntoResponse {
    (
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        include_str!("assets/app.js"),
    )
}

#[derive(Serialize)]
struct MapCenter {
    label: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Serialize)]
struct UiConfig {
    min_year: i32,
    max_year: i32,
    default_year: i32,
    default_location: &'static str,
    categories: Vec<&'static str>,
    map: MapCenter,
}

async fn ui_config(State(state): State<AppState>) -> Json<UiConfig> {
    let location = &state.config.location;
    Json(UiConfig {
        min_year: MIN_YEAR,
        max_year: MAX_YEAR,
        default_year: PRESENT_YEAR,
        default_location: DEFAULT_LOCATION,
        categories: Category::ALL.iter().map(|c| c.as_str()).collect(),
        map: MapCenter {
            label: location.label.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
        },
    })
}

#[derive(Debug, Deserialize)]
struct SimulateQuery {
    location: Option<String>,
    year: Option<String>,
    category: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn parse_year(raw: &str) -> Result<Year, RequestError> {
    let value = raw
        .trim()
        .parse::<i32>()
        .map_err(|_| RequestError::InvalidYear(raw.to_string()))?;
    Year::new(value)
}

fn bad_request(error: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorBody { error })).into_response()
}

async fn simulate(
    State(state): State<AppState>,
    Query(query): Query<SimulateQuery>,
) -> Response {
    let location = query
        .location
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| DEFAULT_LOCATION.to_string());
    let year = match query.year.as_deref().map_or(Year::new(PRESENT_YEAR), parse_year) {
        Ok(year) => year,
        Err(err) => return bad_request(err.to_string()),
    };
    let category = query
        .category
        .unwrap_or_else(|| Category::Climate.as_str().to_string());

    let result = state
        .simulator
        .simulate_named(&location, year.get(), &category)
        .await;
    match result {
        SimulationResult::Simulated(sourced) => {
            let request = SimulationRequest {
                location,
                year,
                category: sourced.data.category(),
            };
            Json(SimulationReport::new(request, sourced)).into_response()
        }
        unsupported @ SimulationResult::Unsupported { .. } => {
            (StatusCode::BAD_REQUEST, Json(unsupported)).into_response()
        }
    }
}

#[derive(Serialize)]
struct StatusEntry {
    #[serde(flatten)]
    status: ApiStatus,
    message: String,
}

async fn api_status(State(state): State<AppState>) -> Json<Vec<StatusEntry>> {
    let statuses = state.simulator.status_checker().check_all().await;
    Json(
        statuses
            .into_iter()
            .map(|status| StatusEntry {
                message: status.describe(),
                status,
            })
            .collect(),
    )
}
