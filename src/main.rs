use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use chronosim::{
    config::Config, model::Year, web, SimulationReport, SimulationRequest, SimulationResult,
    TimeSimulator,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Time-travel data simulator")]
struct Cli {
    /// Path to a YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Master seed for reproducible simulations
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the web UI
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run one simulation and print the result
    Simulate {
        #[arg(long, default_value = "New York, USA")]
        location: String,
        #[arg(long, default_value_t = 2023)]
        year: i32,
        /// climate, population, land_use or natural_events
        #[arg(long, default_value = "climate")]
        category: String,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check that the external services are reachable
    Status {
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    init_tracing(&config.logging.level);

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            web::run(config).await
        }
        Command::Simulate {
            location,
            year,
            category,
            json,
        } => {
            let simulator = TimeSimulator::new(&config).context("failed to build HTTP client")?;
            let request_year = Year::new(year)?;
            let sourced = match simulator.simulate_named(&location, year, &category).await {
                SimulationResult::Simulated(sourced) => sourced,
                unsupported @ SimulationResult::Unsupported { .. } => {
                    println!("{}", serde_json::to_string(&unsupported)?);
                    bail!("unknown data category '{category}'");
                }
            };
            let request = SimulationRequest {
                location,
                year: request_year,
                category: sourced.data.category(),
            };
            let report = SimulationReport::new(request, sourced);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.render_text());
            }
            Ok(())
        }
        Command::Status { json } => {
            let simulator = TimeSimulator::new(&config).context("failed to build HTTP client")?;
            let statuses = simulator.status_checker().check_all().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&statuses)?);
            } else {
                for status in &statuses {
                    println!("{}", status.describe());
                }
            }
            Ok(())
        }
    }
}
