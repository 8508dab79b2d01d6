use rand::Rng;

use super::PRESENT_YEAR;
use crate::model::PopulationRecord;

pub const MIN_POPULATION: f64 = 10_000.0;
pub const ANNUAL_GROWTH: f64 = 1.01;
const HISTORICAL_SPAN_YEARS: f64 = 123.0;

pub fn simulate<R: Rng + ?Sized>(year: i32, rng: &mut R) -> PopulationRecord {
    let base = 1_000_000.0 * rng.gen_range(0.5..5.0);
    PopulationRecord {
        population: project(base, year),
    }
}

/// Scales a present-day base population to `year`.
pub fn project(base: f64, year: i32) -> f64 {
    let population = if year > PRESENT_YEAR {
        base * ANNUAL_GROWTH.powi(year - PRESENT_YEAR)
    } else {
        let share = (year - 1900) as f64 / HISTORICAL_SPAN_YEARS;
        base * share.max(0.1)
    };
    population.max(MIN_POPULATION)
}
