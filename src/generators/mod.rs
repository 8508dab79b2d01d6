//! One generator per data category.
//!
//! Each generator exposes its formula as a plain function over an injected
//! RNG; climate and natural events additionally try a live service first.

pub mod climate;
pub mod land_use;
pub mod natural_events;
pub mod population;

pub use climate::ClimateGenerator;
pub use natural_events::NaturalEventsGenerator;

/// Last year treated as "present"; later years are projections.
pub const PRESENT_YEAR: i32 = 2023;
