//! Reachability checks for the external services. Diagnostic only.

use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use tracing::{info, warn};

use super::open_meteo::DAILY_MEAN_FIELD;
use crate::config::Config;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum StatusOutcome {
    Connected,
    Failed { status: u16 },
    Error { message: String },
}

impl StatusOutcome {
    pub fn is_connected(&self) -> bool {
        matches!(self, StatusOutcome::Connected)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiStatus {
    pub name: &'static str,
    pub outcome: StatusOutcome,
}

impl ApiStatus {
    pub fn describe(&self) -> String {
        match &self.outcome {
            StatusOutcome::Connected => format!("{}: Connected successfully", self.name),
            StatusOutcome::Failed { status } => {
                format!("{}: Connection failed (Status code: {status})", self.name)
            }
            StatusOutcome::Error { message } => {
                format!("{}: Connection error - {message}", self.name)
            }
        }
    }
}

pub struct StatusChecker {
    client: Client,
    key_test_url: String,
    api_key: String,
    archive_url: String,
    latitude: f64,
    longitude: f64,
}

impl StatusChecker {
    pub const KEY_SERVICE: &'static str = "NASA API";
    pub const ARCHIVE_SERVICE: &'static str = "Open-Meteo API";

    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            key_test_url: config.api.key_test_url.clone(),
            api_key: config.api.key.clone(),
            archive_url: config.api.archive_url.clone(),
            latitude: config.location.latitude,
            longitude: config.location.longitude,
        }
    }

    /// Pings every service; one failing does not stop the others.
    pub async fn check_all(&self) -> Vec<ApiStatus> {
        let key_request = self
            .client
            .get(&self.key_test_url)
            .query(&[("api_key", self.api_key.as_str())]);
        let archive_request = self.client.get(&self.archive_url).query(&[
            ("latitude", format!("{:.2}", self.latitude)),
            ("longitude", format!("{:.2}", self.longitude)),
            ("start_date", "2023-01-01".to_string()),
            ("end_date", "2023-01-02".to_string()),
            ("daily", DAILY_MEAN_FIELD.to_string()),
        ]);
        vec![
            check(Self::KEY_SERVICE, key_request).await,
            check(Self::ARCHIVE_SERVICE, archive_request).await,
        ]
    }
}

async fn check(name: &'static str, request: RequestBuilder) -> ApiStatus {
    let outcome = match request.send().await {
        Ok(response) if response.status().is_success() => StatusOutcome::Connected,
        Ok(response) => StatusOutcome::Failed {
            status: response.status().as_u16(),
        },
        Err(err) => StatusOutcome::Error {
            message: err.to_string(),
        },
    };
    if outcome.is_connected() {
        info!(service = name, "service reachable");
    } else {
        warn!(service = name, ?outcome, "service unreachable");
    }
    ApiStatus { name, outcome }
}
