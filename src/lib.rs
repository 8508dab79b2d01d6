pub mod api;
pub mod config;
pub mod error;
pub mod generators;
pub mod model;
pub mod report;
pub mod rng;
pub mod simulator;
pub mod web;

pub use config::Config;
pub use model::{Category, Record, SimulationRequest, SimulationResult, Source, Sourced};
pub use report::SimulationReport;
pub use simulator::TimeSimulator;
