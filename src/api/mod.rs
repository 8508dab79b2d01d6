//! Clients for the external data services.

pub mod eonet;
pub mod open_meteo;
pub mod status;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::model::FallbackReason;

pub use eonet::EventsClient;
pub use open_meteo::ArchiveClient;
pub use status::{ApiStatus, StatusChecker, StatusOutcome};

pub fn build_http_client(config: &ApiConfig) -> Result<Client, ApiError> {
    let client = Client::builder()
        .timeout(config.timeout())
        .user_agent(concat!("chronosim/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Fails on non-success status, then decodes the body as JSON.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        debug!(status = status.as_u16(), url = %response.url(), "non-success response");
        return Err(ApiError::Status(status.as_u16()));
    }
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))
}

impl From<ApiError> for FallbackReason {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Transport(err) => FallbackReason::Request(err.to_string()),
            ApiError::Status(code) => FallbackReason::Status(code),
            ApiError::Decode(msg) => FallbackReason::Decode(msg),
            ApiError::EmptySeries => FallbackReason::EmptySeries,
        }
    }
}
