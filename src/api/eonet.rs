use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::read_json;
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::model::NaturalEventsRecord;

#[derive(Debug, Deserialize)]
struct EventsResponse {
    #[serde(default)]
    events: Vec<Event>,
}

#[derive(Debug, Deserialize)]
struct Event {
    #[serde(default)]
    categories: Vec<EventCategory>,
}

#[derive(Debug, Deserialize)]
struct EventCategory {
    id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Wildfire,
    Storm,
    Flood,
    Drought,
    Other,
}

/// Maps a catalog category id onto the buckets we report.
pub fn classify(category_id: &str) -> EventKind {
    match category_id {
        "wildfires" => EventKind::Wildfire,
        "severeStorms" | "volcanoes" => EventKind::Storm,
        "floods" => EventKind::Flood,
        "drought" => EventKind::Drought,
        _ => EventKind::Other,
    }
}

pub fn tally<'a>(category_ids: impl IntoIterator<Item = Option<&'a str>>) -> NaturalEventsRecord {
    let mut record = NaturalEventsRecord::default();
    for id in category_ids {
        match id.map(classify).unwrap_or(EventKind::Other) {
            EventKind::Wildfire => record.wildfires += 1,
            EventKind::Storm => record.storms += 1,
            EventKind::Flood => record.floods += 1,
            EventKind::Drought => record.drought += 1,
            EventKind::Other => record.other += 1,
        }
    }
    record
}

/// Open natural-events catalog.
#[derive(Debug, Clone)]
pub struct EventsClient {
    client: Client,
    url: String,
    api_key: String,
}

impl EventsClient {
    pub fn new(client: Client, api: &ApiConfig) -> Self {
        Self {
            client,
            url: api.events_url.clone(),
            api_key: api.key.clone(),
        }
    }

    /// Counts currently open events per bucket.
    pub async fn open_event_counts(&self) -> Result<NaturalEventsRecord, ApiError> {
        debug!(url = %self.url, "querying events catalog");
        let response = self
            .client
            .get(&self.url)
            .query(&[("api_key", self.api_key.as_str()), ("status", "open")])
            .send()
            .await?;
        let body: EventsResponse = read_json(response).await?;
        Ok(tally(body.events.iter().map(|event| {
            event.categories.first().map(|category| category.id.as_str())
        })))
    }
}
