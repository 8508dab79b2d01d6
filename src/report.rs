//! Chart descriptions and text summaries for simulation results.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{
    ClimateRecord, FallbackReason, LandUseRecord, NaturalEventsRecord, PopulationRecord, Record,
    SimulationRequest, Source, Sourced,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Pie,
}

/// Everything a front end needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub y_label: Option<String>,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub request: SimulationRequest,
    pub heading: String,
    pub result: Sourced<Record>,
    pub chart: ChartSpec,
    pub summary: String,
    pub notice: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl SimulationReport {
    pub fn new(request: SimulationRequest, result: Sourced<Record>) -> Self {
        let heading = format!(
            "{} Simulation for {} in {}",
            result.data.category().title(),
            request.location,
            request.year
        );
        let chart = chart(&result.data);
        let summary = summary(&request.location, request.year.get(), &result.data);
        let notice = notice(&result.source);
        Self {
            request,
            heading,
            result,
            chart,
            summary,
            notice,
            generated_at: Utc::now(),
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = format!("{}\n\n{}\n", self.heading, self.summary);
        if let Some(notice) = &self.notice {
            out.push_str(&format!("\nNote: {notice}\n"));
        }
        out
    }
}

pub fn chart(record: &Record) -> ChartSpec {
    match record {
        Record::Climate(ClimateRecord { temperature }) => ChartSpec {
            kind: ChartKind::Bar,
            title: "Simulated Temperature".into(),
            y_label: Some("Temperature (°C)".into()),
            labels: vec!["Temperature".into()],
            values: vec![*temperature],
            colors: vec!["orange".into()],
        },
        Record::Population(PopulationRecord { population }) => ChartSpec {
            kind: ChartKind::Bar,
            title: "Simulated Population".into(),
            y_label: Some("Population".into()),
            labels: vec!["Population".into()],
            values: vec![*population],
            colors: vec!["blue".into()],
        },
        Record::LandUse(record) => ChartSpec {
            kind: ChartKind::Pie,
            title: "Simulated Land Use Distribution".into(),
            y_label: None,
            labels: vec!["Urban".into(), "Forest".into(), "Agriculture".into()],
            values: vec![record.urban, record.forest, record.agriculture],
            colors: vec!["#FF9999".into(), "#66B2FF".into(), "#99FF99".into()],
        },
        Record::NaturalEvents(record) => ChartSpec {
            kind: ChartKind::Bar,
            title: "Simulated Natural Events".into(),
            y_label: Some("Event Count".into()),
            labels: record
                .entries()
                .iter()
                .map(|(name, _)| name.to_string())
                .collect(),
            values: record
                .entries()
                .iter()
                .map(|(_, count)| f64::from(*count))
                .collect(),
            colors: ["#FF6B6B", "#4ECDC4", "#45B7D1", "#FFBE0B", "#9D80CB"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
        },
    }
}

pub fn summary(location: &str, year: i32, record: &Record) -> String {
    match record {
        Record::Climate(ClimateRecord { temperature }) => format!(
            "The average temperature in {location} for {year} is projected to be {temperature:.2}°C."
        ),
        Record::Population(PopulationRecord { population }) => format!(
            "The estimated population of {location} in {year} is {} people.",
            group_thousands((*population).max(0.0) as u64)
        ),
        Record::LandUse(LandUseRecord {
            urban,
            forest,
            agriculture,
        }) => format!(
            "Land use distribution for {location} in {year}:\n\
             - Urban areas: {:.1}%\n\
             - Forest areas: {:.1}%\n\
             - Agricultural areas: {:.1}%",
            urban * 100.0,
            forest * 100.0,
            agriculture * 100.0
        ),
        Record::NaturalEvents(NaturalEventsRecord {
            wildfires,
            storms,
            floods,
            drought,
            other,
        }) => format!(
            "Predicted natural events for {location} in {year}:\n\
             - Wildfires: {wildfires}\n\
             - Storms: {storms}\n\
             - Floods: {floods}\n\
             - Droughts: {drought}\n\
             - Other events: {other}"
        ),
    }
}

/// User-facing note about where the numbers came from.
pub fn notice(source: &Source) -> Option<String> {
    match source {
        Source::Live => Some("Based on live data from the external service.".into()),
        Source::Model => None,
        Source::Fallback {
            reason: FallbackReason::OutOfRange,
        } => Some("No live data for this year; showing simulated values.".into()),
        Source::Fallback { reason } => Some(format!(
            "Live data unavailable ({reason}); showing simulated values."
        )),
    }
}

pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
