use rand::Rng;
use rand_distr::{Distribution, Poisson};
use tracing::warn;

use super::PRESENT_YEAR;
use crate::api::EventsClient;
use crate::model::{FallbackReason, NaturalEventsRecord, Sourced};

/// Rates grow linearly only after this year.
pub const TREND_START_YEAR: i32 = 2000;

/// Base yearly rate and per-year increase for one event kind.
#[derive(Debug, Clone, Copy)]
pub struct EventRate {
    pub base: f64,
    pub slope: f64,
}

impl EventRate {
    pub fn at(self, year: i32) -> f64 {
        self.base + (year - TREND_START_YEAR).max(0) as f64 * self.slope
    }
}

pub const WILDFIRES: EventRate = EventRate { base: 10.0, slope: 0.2 };
pub const STORMS: EventRate = EventRate { base: 15.0, slope: 0.1 };
pub const FLOODS: EventRate = EventRate { base: 8.0, slope: 0.15 };
pub const DROUGHT: EventRate = EventRate { base: 5.0, slope: 0.1 };
pub const OTHER: EventRate = EventRate { base: 3.0, slope: 0.05 };

pub struct NaturalEventsGenerator {
    events: EventsClient,
}

impl NaturalEventsGenerator {
    pub fn new(events: EventsClient) -> Self {
        Self { events }
    }

    pub async fn generate<R: Rng + ?Sized>(
        &self,
        year: i32,
        rng: &mut R,
    ) -> Sourced<NaturalEventsRecord> {
        if year < PRESENT_YEAR {
            return Sourced::fallback(simulate(year, rng), FallbackReason::OutOfRange);
        }
        match self.events.open_event_counts().await {
            Ok(record) => Sourced::live(record),
            Err(err) => {
                warn!(year, error = %err, "events catalog unavailable, using event model");
                Sourced::fallback(simulate(year, rng), err.into())
            }
        }
    }
}

pub fn simulate<R: Rng + ?Sized>(year: i32, rng: &mut R) -> NaturalEventsRecord {
    NaturalEventsRecord {
        wildfires: draw(WILDFIRES.at(year), rng),
        storms: draw(STORMS.at(year), rng),
        floods: draw(FLOODS.at(year), rng),
        drought: draw(DROUGHT.at(year), rng),
        other: draw(OTHER.at(year), rng),
    }
}

fn draw<R: Rng + ?Sized>(rate: f64, rng: &mut R) -> u32 {
    Poisson::new(rate)
        .map(|dist| dist.sample(rng) as u32)
        .unwrap_or(0)
}
