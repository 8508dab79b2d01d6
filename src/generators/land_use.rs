use tracing::warn;

use super::PRESENT_YEAR;
use crate::model::LandUseRecord;

pub const MAX_URBAN: f64 = 0.8;
pub const MIN_FOREST: f64 = 0.1;

pub fn simulate(year: i32) -> LandUseRecord {
    let (urban, forest) = if year > PRESENT_YEAR {
        let elapsed = (year - PRESENT_YEAR) as f64;
        (
            (0.3 + elapsed * 0.01).min(MAX_URBAN),
            (0.3 - elapsed * 0.005).max(MIN_FOREST),
        )
    } else {
        let elapsed = (year - 1900) as f64;
        (
            (elapsed * 0.002).clamp(0.05, 0.3),
            (0.6 - elapsed * 0.001).clamp(0.2, 0.6),
        )
    };
    balance(year, urban, forest)
}

/// Agriculture takes the residual share. A negative residual is rescaled away
/// so the three shares always sum to one.
fn balance(year: i32, urban: f64, forest: f64) -> LandUseRecord {
    let agriculture = 1.0 - urban - forest;
    if agriculture >= 0.0 {
        return LandUseRecord {
            urban,
            forest,
            agriculture,
        };
    }
    warn!(year, urban, forest, "land use shares exceed 1, rescaling");
    let total = urban + forest;
    let urban = urban / total;
    LandUseRecord {
        urban,
        forest: 1.0 - urban,
        agriculture: 0.0,
    }
}
