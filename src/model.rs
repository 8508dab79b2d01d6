use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RequestError;

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;

/// Marker returned by the dispatcher for an unrecognized category name.
pub const INVALID_CATEGORY: &str = "Invalid data type";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Climate,
    Population,
    LandUse,
    NaturalEvents,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Climate,
        Category::Population,
        Category::LandUse,
        Category::NaturalEvents,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Climate => "climate",
            Category::Population => "population",
            Category::LandUse => "land_use",
            Category::NaturalEvents => "natural_events",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Category::Climate => "Climate",
            Category::Population => "Population",
            Category::LandUse => "Land Use",
            Category::NaturalEvents => "Natural Events",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| RequestError::UnknownCategory(s.to_string()))
    }
}

/// Calendar year accepted by the request layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Year(i32);

impl Year {
    pub fn new(value: i32) -> Result<Self, RequestError> {
        if (MIN_YEAR..=MAX_YEAR).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RequestError::YearOutOfRange(value))
        }
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Year {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = i32::deserialize(deserializer)?;
        Year::new(value).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub location: String,
    pub year: Year,
    pub category: Category,
}

impl SimulationRequest {
    pub fn new(
        location: impl Into<String>,
        year: i32,
        category: Category,
    ) -> Result<Self, RequestError> {
        Ok(Self {
            location: location.into(),
            year: Year::new(year)?,
            category,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimateRecord {
    /// Mean annual temperature in °C.
    pub temperature: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopulationRecord {
    pub population: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandUseRecord {
    pub urban: f64,
    pub forest: f64,
    pub agriculture: f64,
}

impl LandUseRecord {
    pub fn total(&self) -> f64 {
        self.urban + self.forest + self.agriculture
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NaturalEventsRecord {
    pub wildfires: u32,
    pub storms: u32,
    pub floods: u32,
    pub drought: u32,
    pub other: u32,
}

impl NaturalEventsRecord {
    /// Counts in display order.
    pub fn entries(&self) -> [(&'static str, u32); 5] {
        [
            ("wildfires", self.wildfires),
            ("storms", self.storms),
            ("floods", self.floods),
            ("drought", self.drought),
            ("other", self.other),
        ]
    }

    pub fn total(&self) -> u32 {
        self.entries().iter().map(|(_, count)| count).sum()
    }
}

/// Category-shaped result. Serializes as the bare record map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Climate(ClimateRecord),
    Population(PopulationRecord),
    LandUse(LandUseRecord),
    NaturalEvents(NaturalEventsRecord),
}

impl Record {
    pub fn category(&self) -> Category {
        match self {
            Record::Climate(_) => Category::Climate,
            Record::Population(_) => Category::Population,
            Record::LandUse(_) => Category::LandUse,
            Record::NaturalEvents(_) => Category::NaturalEvents,
        }
    }
}

/// Why a generator used its formula instead of live data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FallbackReason {
    OutOfRange,
    Request(String),
    Status(u16),
    EmptySeries,
    Decode(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::OutOfRange => f.write_str("year outside the live data range"),
            FallbackReason::Request(msg) => write!(f, "request failed: {msg}"),
            FallbackReason::Status(code) => write!(f, "service answered with status {code}"),
            FallbackReason::EmptySeries => f.write_str("service returned no usable values"),
            FallbackReason::Decode(msg) => write!(f, "unreadable response: {msg}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum Source {
    /// Fetched from an external service.
    Live,
    /// Produced by a formula-only generator.
    Model,
    /// Formula used because the live path was skipped or failed.
    Fallback { reason: FallbackReason },
}

impl Source {
    pub fn is_live(&self) -> bool {
        matches!(self, Source::Live)
    }
}

/// A value paired with where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sourced<T> {
    pub data: T,
    pub source: Source,
}

impl<T> Sourced<T> {
    pub fn live(data: T) -> Self {
        Self {
            data,
            source: Source::Live,
        }
    }

    pub fn modelled(data: T) -> Self {
        Self {
            data,
            source: Source::Model,
        }
    }

    pub fn fallback(data: T, reason: FallbackReason) -> Self {
        Self {
            data,
            source: Source::Fallback { reason },
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Sourced<U> {
        Sourced {
            data: f(self.data),
            source: self.source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SimulationResult {
    Simulated(Sourced<Record>),
    Unsupported { error: String },
}

impl SimulationResult {
    pub fn unsupported() -> Self {
        SimulationResult::Unsupported {
            error: INVALID_CATEGORY.to_string(),
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, SimulationResult::Unsupported { .. })
    }
}
