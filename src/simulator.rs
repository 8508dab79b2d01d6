use tracing::{info, warn};

use crate::api::{build_http_client, ArchiveClient, EventsClient, StatusChecker};
use crate::config::Config;
use crate::error::ApiError;
use crate::generators::{land_use, population, ClimateGenerator, NaturalEventsGenerator};
use crate::model::{Category, Record, SimulationResult, Sourced};
use crate::rng::RngManager;

/// Routes a category to its generator.
pub struct TimeSimulator {
    climate: ClimateGenerator,
    natural_events: NaturalEventsGenerator,
    status: StatusChecker,
    rng: RngManager,
}

impl TimeSimulator {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = build_http_client(&config.api)?;
        Ok(Self {
            climate: ClimateGenerator::new(ArchiveClient::new(
                client.clone(),
                &config.api,
                &config.location,
            )),
            natural_events: NaturalEventsGenerator::new(EventsClient::new(
                client.clone(),
                &config.api,
            )),
            status: StatusChecker::new(client, config),
            rng: RngManager::new(config.seed),
        })
    }

    pub fn status_checker(&self) -> &StatusChecker {
        &self.status
    }

    /// The location is carried for display only; every query uses the
    /// configured coordinates.
    pub async fn simulate(
        &self,
        location: &str,
        year: i32,
        category: Category,
    ) -> Sourced<Record> {
        let mut rng = self.rng.stream(category.as_str());
        let result = match category {
            Category::Climate => self
                .climate
                .generate(year, &mut rng)
                .await
                .map(Record::Climate),
            Category::Population => {
                Sourced::modelled(Record::Population(population::simulate(year, &mut rng)))
            }
            Category::LandUse => Sourced::modelled(Record::LandUse(land_use::simulate(year))),
            Category::NaturalEvents => self
                .natural_events
                .generate(year, &mut rng)
                .await
                .map(Record::NaturalEvents),
        };
        info!(
            location,
            year,
            category = category.as_str(),
            live = result.source.is_live(),
            "simulation complete"
        );
        result
    }

    /// Like [`simulate`](Self::simulate) but takes the category by name and
    /// answers unknown names with the error marker.
    pub async fn simulate_named(
        &self,
        location: &str,
        year: i32,
        category: &str,
    ) -> SimulationResult {
        match category.parse::<Category>() {
            Ok(category) => {
                SimulationResult::Simulated(self.simulate(location, year, category).await)
            }
            Err(err) => {
                warn!(location, year, error = %err, "rejecting simulation request");
                SimulationResult::unsupported()
            }
        }
    }
}
