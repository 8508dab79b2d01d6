use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::read_json;
use crate::config::{ApiConfig, LocationConfig};
use crate::error::ApiError;

pub const DAILY_MEAN_FIELD: &str = "temperature_2m_mean";

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    daily: DailySeries,
}

#[derive(Debug, Deserialize)]
struct DailySeries {
    #[serde(default)]
    temperature_2m_mean: Vec<Option<f64>>,
}

/// Historical weather archive for one fixed coordinate pair.
#[derive(Debug, Clone)]
pub struct ArchiveClient {
    client: Client,
    url: String,
    latitude: f64,
    longitude: f64,
    timezone: String,
}

impl ArchiveClient {
    pub fn new(client: Client, api: &ApiConfig, location: &LocationConfig) -> Self {
        Self {
            client,
            url: api.archive_url.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
            timezone: api.timezone.clone(),
        }
    }

    /// Mean of the daily mean temperatures over the calendar year.
    pub async fn mean_temperature(&self, year: i32) -> Result<f64, ApiError> {
        let (start, end) = year_bounds(year)?;
        let series = self.daily_means(start, end).await?;
        mean_of_series(&series).ok_or(ApiError::EmptySeries)
    }

    pub async fn daily_means(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Option<f64>>, ApiError> {
        debug!(%start, %end, url = %self.url, "querying weather archive");
        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("latitude", self.latitude.to_string()),
                ("longitude", self.longitude.to_string()),
                ("start_date", start.to_string()),
                ("end_date", end.to_string()),
                ("daily", DAILY_MEAN_FIELD.to_string()),
                ("timezone", self.timezone.clone()),
            ])
            .send()
            .await?;
        let body: ArchiveResponse = read_json(response).await?;
        Ok(body.daily.temperature_2m_mean)
    }
}

fn year_bounds(year: i32) -> Result<(NaiveDate, NaiveDate), ApiError> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1);
    let end = NaiveDate::from_ymd_opt(year, 12, 31);
    start
        .zip(end)
        .ok_or_else(|| ApiError::Decode(format!("invalid calendar year {year}")))
}

/// Average of the present values; `None` when nothing is present.
pub fn mean_of_series(series: &[Option<f64>]) -> Option<f64> {
    let values: Vec<f64> = series.iter().flatten().copied().collect();
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
