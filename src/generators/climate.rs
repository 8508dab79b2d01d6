use std::ops::RangeInclusive;

use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::warn;

use super::PRESENT_YEAR;
use crate::api::ArchiveClient;
use crate::model::{ClimateRecord, FallbackReason, Sourced};

/// Years the weather archive can answer for.
pub const ARCHIVE_YEARS: RangeInclusive<i32> = 1940..=PRESENT_YEAR;
pub const WARMING_RATE: f64 = 0.03;

const PROJECTED_MEAN: f64 = 15.0;
const PROJECTED_SD: f64 = 2.0;
const HISTORICAL_MEAN: f64 = 14.0;
const HISTORICAL_SD: f64 = 3.0;

pub struct ClimateGenerator {
    archive: ArchiveClient,
}

impl ClimateGenerator {
    pub fn new(archive: ArchiveClient) -> Self {
        Self { archive }
    }

    pub async fn generate<R: Rng + ?Sized>(
        &self,
        year: i32,
        rng: &mut R,
    ) -> Sourced<ClimateRecord> {
        if !ARCHIVE_YEARS.contains(&year) {
            return Sourced::fallback(simulate(year, rng), FallbackReason::OutOfRange);
        }
        match self.archive.mean_temperature(year).await {
            Ok(temperature) => Sourced::live(ClimateRecord { temperature }),
            Err(err) => {
                warn!(year, error = %err, "weather archive unavailable, using climate model");
                Sourced::fallback(simulate(year, rng), err.into())
            }
        }
    }
}

pub fn simulate<R: Rng + ?Sized>(year: i32, rng: &mut R) -> ClimateRecord {
    let temperature = if year > PRESENT_YEAR {
        let base = sample_normal(PROJECTED_MEAN, PROJECTED_SD, rng);
        base + warming(year)
    } else {
        sample_normal(HISTORICAL_MEAN, HISTORICAL_SD, rng)
    };
    ClimateRecord { temperature }
}

/// Deterministic warming added on top of the projected base.
pub fn warming(year: i32) -> f64 {
    (year - PRESENT_YEAR).max(0) as f64 * WARMING_RATE
}

fn sample_normal<R: Rng + ?Sized>(mean: f64, sd: f64, rng: &mut R) -> f64 {
    Normal::new(mean, sd)
        .map(|dist| dist.sample(rng))
        .unwrap_or(mean)
}
